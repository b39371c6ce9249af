// Copyright (C) 2015-2025 The Neo Project.
//
// config.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Listener and RPC client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Neo N3 MainNet RPC endpoint
pub const MAINNET: &str = "https://mainnet1.neo.coz.io:443";
/// Public Neo N3 TestNet RPC endpoint
pub const TESTNET: &str = "https://testnet1.neo.coz.io:443";

/// Delay between two block polls
pub const DEFAULT_WAIT_FOR_EVENT_MS: u64 = 4000;
/// Attempts `wait_for_application_log` spreads its timeout over
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
/// Timeout of `wait_for_application_log` when none is given
pub const DEFAULT_APPLICATION_LOG_TIMEOUT_MS: u64 = 30_000;
/// Default timeout of a single RPC request
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

/// Retry policy of `wait_for_application_log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaitForApplicationLogOptions {
    pub max_attempts: u32,
    /// Fixed delay between attempts. Derived from the timeout when absent.
    pub wait_ms: Option<u64>,
}

impl Default for WaitForApplicationLogOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            wait_ms: None,
        }
    }
}

impl WaitForApplicationLogOptions {
    /// Delay between attempts for a total budget of `timeout`.
    pub fn wait_between_attempts(&self, timeout: Duration) -> Duration {
        match self.wait_ms {
            Some(wait_ms) => Duration::from_millis(wait_ms),
            None => timeout / self.max_attempts.max(1),
        }
    }
}

/// Event listener options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventListenerOptions {
    /// Log block scans, callback failures and RPC errors.
    pub debug: bool,
    pub wait_for_event_ms: u64,
    pub wait_for_application_log: WaitForApplicationLogOptions,
}

impl Default for EventListenerOptions {
    fn default() -> Self {
        Self {
            debug: false,
            wait_for_event_ms: DEFAULT_WAIT_FOR_EVENT_MS,
            wait_for_application_log: WaitForApplicationLogOptions::default(),
        }
    }
}

impl EventListenerOptions {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_wait_for_event_ms(mut self, wait_for_event_ms: u64) -> Self {
        self.wait_for_event_ms = wait_for_event_ms;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.wait_for_application_log.max_attempts = max_attempts;
        self
    }

    pub fn with_wait_ms(mut self, wait_ms: u64) -> Self {
        self.wait_for_application_log.wait_ms = Some(wait_ms);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.wait_for_event_ms)
    }
}

/// Connection settings of the JSON-RPC client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RpcClientConfig {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_ms: u64,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            url: TESTNET.to_string(),
            user: None,
            password: None,
            timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
        }
    }
}

impl RpcClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn mainnet() -> Self {
        Self::new(MAINNET)
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET)
    }

    /// Sends HTTP basic auth with every request.
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
