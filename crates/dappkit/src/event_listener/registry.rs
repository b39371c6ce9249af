// Copyright (C) 2015-2025 The Neo Project.
//
// registry.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::CallbackError;
use indexmap::IndexMap;
use neo_dappkit_types::Notification;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with every matching notification.
pub type EventCallback = Arc<dyn Fn(&Notification) -> Result<(), CallbackError> + Send + Sync>;

/// Handle returned when a callback is registered, used to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

type EventListeners = IndexMap<ListenerId, EventCallback>;

/// Callbacks keyed by contract, then event name, in registration order.
///
/// Empty event and contract entries are pruned as soon as they empty out.
#[derive(Default)]
pub struct ListenerRegistry {
    contracts: IndexMap<String, IndexMap<String, EventListeners>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contract: &str, eventname: &str, callback: EventCallback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.contracts
            .entry(contract.to_string())
            .or_default()
            .entry(eventname.to_string())
            .or_default()
            .insert(id, callback);
        id
    }

    /// Removes one callback. Returns false when it was not registered.
    pub fn remove(&mut self, contract: &str, eventname: &str, id: ListenerId) -> bool {
        let Some(events) = self.contracts.get_mut(contract) else {
            return false;
        };
        let Some(listeners) = events.get_mut(eventname) else {
            return false;
        };
        if listeners.shift_remove(&id).is_none() {
            return false;
        }

        if listeners.is_empty() {
            events.shift_remove(eventname);
            if events.is_empty() {
                self.contracts.shift_remove(contract);
            }
        }
        true
    }

    pub fn remove_event(&mut self, contract: &str, eventname: &str) -> bool {
        let Some(events) = self.contracts.get_mut(contract) else {
            return false;
        };
        let removed = events.shift_remove(eventname).is_some();
        if events.is_empty() {
            self.contracts.shift_remove(contract);
        }
        removed
    }

    pub fn remove_contract(&mut self, contract: &str) -> bool {
        self.contracts.shift_remove(contract).is_some()
    }

    /// Snapshot of the callbacks for an event, in registration order.
    pub fn callbacks_for(&self, contract: &str, eventname: &str) -> Vec<EventCallback> {
        self.contracts
            .get(contract)
            .and_then(|events| events.get(eventname))
            .map(|listeners| listeners.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_event(&self, contract: &str, eventname: &str) -> bool {
        self.contracts
            .get(contract)
            .map_or(false, |events| events.contains_key(eventname))
    }

    pub fn contains_contract(&self, contract: &str) -> bool {
        self.contracts.contains_key(contract)
    }

    /// Total number of registered callbacks.
    pub fn len(&self) -> usize {
        self.contracts
            .values()
            .flat_map(IndexMap::values)
            .map(IndexMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contracts.clear();
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (contract, events) in &self.contracts {
            for (eventname, listeners) in events {
                map.entry(&format!("{contract}/{eventname}"), &listeners.len());
            }
        }
        map.finish()
    }
}
