// Copyright (C) 2015-2025 The Neo Project.
//
// poller.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::registry::EventCallback;
use super::{ListenerState, Shared, LOG_TARGET};
use crate::chain_client::ChainClient;
use crate::config::EventListenerOptions;
use crate::error::{DappkitError, DappkitResult};
use neo_dappkit_types::Notification;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, warn};

enum BlockScan {
    Processed,
    /// The tracked height is ahead of the node.
    NodeBehind,
}

/// Background task delivering notifications block by block.
///
/// The task ends on its own once the listener goes `Idle`. A block being
/// scanned is always finished first.
pub(super) struct BlockPoller {
    client: Arc<dyn ChainClient>,
    options: EventListenerOptions,
    shared: Arc<Mutex<Shared>>,
}

impl BlockPoller {
    pub(super) fn new(
        client: Arc<dyn ChainClient>,
        options: EventListenerOptions,
        shared: Arc<Mutex<Shared>>,
    ) -> Self {
        Self {
            client,
            options,
            shared,
        }
    }

    pub(super) async fn run(self) {
        let debug = self.options.debug;
        if debug {
            debug!(target: LOG_TARGET, "Block polling loop started");
        }

        let mut height: Option<u32> = None;
        while self.keep_polling() {
            if height.is_none() {
                match self.client.get_block_count().await {
                    Ok(count) => height = Some(count),
                    Err(err) if debug => {
                        warn!(target: LOG_TARGET, error = %err, "Failed to read the block count")
                    }
                    Err(_) => {}
                }
            }

            sleep(self.options.poll_interval()).await;
            if !self.keep_polling() {
                break;
            }
            let Some(current) = height else {
                continue;
            };

            if debug {
                debug!(target: LOG_TARGET, height = current, "Checking block");
            }
            // the height only moves once a block was fully scanned
            match self.scan_block(current).await {
                Ok(BlockScan::Processed) => height = Some(current.saturating_add(1)),
                Ok(BlockScan::NodeBehind) => {
                    if debug {
                        debug!(
                            target: LOG_TARGET,
                            height = current,
                            "Block height is ahead of node. Waiting for node to catch up"
                        );
                    }
                }
                Err(err) => {
                    if debug {
                        warn!(target: LOG_TARGET, height = current, error = %err, "Block scan failed, retrying");
                    }
                }
            }
        }

        if debug {
            debug!(target: LOG_TARGET, "Block polling loop stopped");
        }
    }

    /// Reads the listener state; an `Idle` answer also releases the loop slot.
    fn keep_polling(&self) -> bool {
        let mut shared = self.shared.lock();
        if shared.state == ListenerState::Polling {
            return true;
        }
        shared.loop_active = false;
        false
    }

    async fn scan_block(&self, height: u32) -> DappkitResult<BlockScan> {
        let count = self.client.get_block_count().await?;
        let index = match height.checked_sub(1) {
            Some(index) if height <= count => index,
            _ => return Ok(BlockScan::NodeBehind),
        };

        let block = self.client.get_block(index).await?;
        for transaction in &block.tx {
            let Some(hash) = transaction.hash.as_deref() else {
                if self.options.debug {
                    debug!(target: LOG_TARGET, block = index, "Transaction hash not found. Skipping transaction");
                }
                continue;
            };

            // an unreadable log would stall the height forever; only transport
            // and node errors retry the block
            let log = match self.client.get_application_log(hash).await {
                Ok(log) => log,
                Err(DappkitError::Serialization(err)) => {
                    if self.options.debug {
                        warn!(target: LOG_TARGET, tx = hash, error = %err, "Unreadable application log. Skipping transaction");
                    }
                    continue;
                }
                Err(err) => return Err(err),
            };
            let Some(execution) = log.first_execution() else {
                if self.options.debug {
                    debug!(target: LOG_TARGET, tx = hash, "Application log has no executions");
                }
                continue;
            };

            for notification in &execution.notifications {
                self.deliver(notification);
            }
        }

        Ok(BlockScan::Processed)
    }

    fn deliver(&self, notification: &Notification) {
        let callbacks = self
            .shared
            .lock()
            .registry
            .callbacks_for(&notification.contract, &notification.eventname);

        if callbacks.is_empty() {
            if self.options.debug {
                debug!(
                    target: LOG_TARGET,
                    contract = %notification.contract,
                    event = %notification.eventname,
                    "No listeners for notification"
                );
            }
            return;
        }

        for callback in &callbacks {
            self.invoke(callback, notification);
        }
    }

    /// Runs one callback, containing its errors and panics.
    fn invoke(&self, callback: &EventCallback, notification: &Notification) {
        if self.options.debug {
            debug!(target: LOG_TARGET, event = %notification.eventname, "Calling listener");
        }

        let failure = match panic::catch_unwind(AssertUnwindSafe(|| callback(notification))) {
            Ok(Ok(())) => return,
            Ok(Err(err)) => DappkitError::Callback(err.to_string()),
            Err(payload) => DappkitError::Callback(panic_message(payload.as_ref())),
        };
        if self.options.debug {
            warn!(target: LOG_TARGET, event = %notification.eventname, error = %failure, "Listener callback failed");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
