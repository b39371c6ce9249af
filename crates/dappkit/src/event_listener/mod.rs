// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Contract event subscriptions backed by block polling.
//!
//! Callbacks are registered per contract and event name. While at least one
//! callback is registered a single background task walks the chain one block
//! at a time, reads the application log of every transaction and hands each
//! matching notification to its callbacks. The task stops by itself once the
//! last callback is removed.

mod poller;
mod registry;

pub use registry::{EventCallback, ListenerId, ListenerRegistry};

use crate::chain_client::{ChainClient, RpcClient};
use crate::config::{
    EventListenerOptions, RpcClientConfig, DEFAULT_APPLICATION_LOG_TIMEOUT_MS,
};
use crate::confirmation;
use crate::error::{CallbackError, DappkitError, DappkitResult};
use neo_dappkit_types::{ApplicationLog, Neo3Event, Notification};
use parking_lot::Mutex;
use poller::BlockPoller;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

pub(crate) const LOG_TARGET: &str = "neo_dappkit::event_listener";

/// Whether the listener is currently walking blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerState {
    Idle,
    Polling,
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerState::Idle => f.write_str("idle"),
            ListenerState::Polling => f.write_str("polling"),
        }
    }
}

/// State shared between the listener handle and its polling task.
pub(crate) struct Shared {
    pub(crate) registry: ListenerRegistry,
    pub(crate) state: ListenerState,
    /// Set while a polling task is alive, so at most one ever runs.
    pub(crate) loop_active: bool,
}

/// Subscribes callbacks to contract events and waits for transaction results.
///
/// Registering a callback must happen inside a tokio runtime, which the
/// polling task is spawned on. Dropping the listener stops polling after the
/// block being scanned.
pub struct EventListener {
    client: Arc<dyn ChainClient>,
    options: EventListenerOptions,
    shared: Arc<Mutex<Shared>>,
}

impl EventListener {
    pub fn new(client: Arc<dyn ChainClient>, options: EventListenerOptions) -> Self {
        Self {
            client,
            options,
            shared: Arc::new(Mutex::new(Shared {
                registry: ListenerRegistry::new(),
                state: ListenerState::Idle,
                loop_active: false,
            })),
        }
    }

    /// A listener talking JSON-RPC to the node described by `config`.
    pub fn connect(config: &RpcClientConfig, options: EventListenerOptions) -> DappkitResult<Self> {
        let client = RpcClient::new(config)?;
        Ok(Self::new(Arc::new(client), options))
    }

    pub fn options(&self) -> &EventListenerOptions {
        &self.options
    }

    pub fn client(&self) -> &Arc<dyn ChainClient> {
        &self.client
    }

    pub fn state(&self) -> ListenerState {
        self.shared.lock().state
    }

    /// Number of registered callbacks, over all contracts and events.
    pub fn listener_count(&self) -> usize {
        self.shared.lock().registry.len()
    }

    pub fn is_listening(&self, contract: &str, eventname: &str) -> bool {
        self.shared.lock().registry.contains_event(contract, eventname)
    }

    /// Registers `callback` for `eventname` notifications of `contract` and
    /// starts polling if needed.
    ///
    /// Fails with [`DappkitError::NoRuntime`] outside a tokio runtime, in
    /// which case nothing is registered.
    pub fn add_event_listener<F>(
        &self,
        contract: &str,
        eventname: &str,
        callback: F,
    ) -> DappkitResult<ListenerId>
    where
        F: Fn(&Notification) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|err| DappkitError::NoRuntime(err.to_string()))?;

        let (id, spawn_loop) = {
            let mut shared = self.shared.lock();
            let id = shared.registry.insert(contract, eventname, Arc::new(callback));
            shared.state = ListenerState::Polling;
            let spawn_loop = !shared.loop_active;
            shared.loop_active = true;
            (id, spawn_loop)
        };

        if self.options.debug {
            debug!(target: LOG_TARGET, contract, event = eventname, %id, "Listener added");
        }
        if spawn_loop {
            let poller = BlockPoller::new(self.client.clone(), self.options.clone(), self.shared.clone());
            handle.spawn(poller.run());
        }
        Ok(id)
    }

    /// Removes one callback. Returns false when `id` was not registered there.
    pub fn remove_event_listener(&self, contract: &str, eventname: &str, id: ListenerId) -> bool {
        self.update_registry(|registry| registry.remove(contract, eventname, id))
    }

    /// Removes every callback of `contract`.
    pub fn remove_all_event_listeners_of_contract(&self, contract: &str) -> bool {
        self.update_registry(|registry| registry.remove_contract(contract))
    }

    /// Removes every callback of one event of `contract`.
    pub fn remove_all_event_listeners_of_event(&self, contract: &str, eventname: &str) -> bool {
        self.update_registry(|registry| registry.remove_event(contract, eventname))
    }

    fn update_registry(&self, change: impl FnOnce(&mut ListenerRegistry) -> bool) -> bool {
        let mut shared = self.shared.lock();
        let removed = change(&mut shared.registry);
        if shared.registry.is_empty() {
            shared.state = ListenerState::Idle;
        }
        removed
    }

    /// Polls for the application log of `tx_id` until it is available or
    /// `timeout` (30 seconds by default) elapses.
    ///
    /// At least one attempt is always made. On timeout the last RPC error is
    /// returned.
    pub async fn wait_for_application_log(
        &self,
        tx_id: &str,
        timeout: Option<Duration>,
    ) -> DappkitResult<ApplicationLog> {
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_APPLICATION_LOG_TIMEOUT_MS));
        let wait = self.options.wait_for_application_log.wait_between_attempts(timeout);
        let deadline = Instant::now() + timeout;

        let mut last_error;
        loop {
            match self.client.get_application_log(tx_id).await {
                Ok(log) => return Ok(log),
                Err(err) => {
                    if self.options.debug {
                        warn!(target: LOG_TARGET, tx = tx_id, error = %err, "Application log not available yet");
                    }
                    last_error = err;
                }
            }

            sleep(wait).await;
            if Instant::now() >= deadline {
                break;
            }
        }

        Err(last_error)
    }

    pub fn confirm_halt(&self, log: &ApplicationLog) -> DappkitResult<()> {
        confirmation::confirm_halt(log)
    }

    pub fn confirm_stack_true(&self, log: &ApplicationLog) -> DappkitResult<()> {
        confirmation::confirm_stack_true(log)
    }

    pub fn get_notification_state<'a>(
        &self,
        log: &'a ApplicationLog,
        event: &Neo3Event,
    ) -> Option<&'a Notification> {
        confirmation::get_notification_state(log, event)
    }

    pub fn confirm_transaction(
        &self,
        log: &ApplicationLog,
        event_to_check: Option<&Neo3Event>,
        confirm_stack_true_result: bool,
    ) -> DappkitResult<()> {
        confirmation::confirm_transaction(log, event_to_check, confirm_stack_true_result)
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let mut shared = self.shared.lock();
        shared.registry.clear();
        shared.state = ListenerState::Idle;
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("EventListener")
            .field("options", &self.options)
            .field("state", &shared.state)
            .field("listeners", &shared.registry.len())
            .finish()
    }
}
