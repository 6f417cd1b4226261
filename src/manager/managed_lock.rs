// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal lock wrapper for the lock manager.

use tokio::sync::watch;

use crate::event::DeviceId;
use crate::interpreter::EventInterpreter;
use crate::state::{DeviceSnapshot, LockEvent};

use super::device_config::DeviceConfig;

/// Internal representation of a lock in the manager.
pub(crate) struct ManagedLock {
    pub id: DeviceId,
    pub config: DeviceConfig,
    pub interpreter: EventInterpreter,
    pub available: bool,
    pub snapshot: DeviceSnapshot,
    snapshot_tx: watch::Sender<DeviceSnapshot>,
}

impl ManagedLock {
    pub fn new(config: DeviceConfig) -> Self {
        let snapshot = DeviceSnapshot::new();
        let (snapshot_tx, _) = watch::channel(snapshot.clone());
        Self {
            id: DeviceId::new(),
            interpreter: EventInterpreter::new(config.profile.clone()),
            config,
            available: true,
            snapshot,
            snapshot_tx,
        }
    }

    pub fn watch_snapshot(&self) -> watch::Receiver<DeviceSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Applies an event, then publishes the new snapshot to watchers.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn apply(&mut self, event: &LockEvent) -> bool {
        if !self.snapshot.apply(event) {
            return false;
        }
        self.snapshot_tx.send_replace(self.snapshot.clone());
        true
    }

    /// Returns `true` if availability changed.
    pub fn set_available(&mut self, available: bool) -> bool {
        if self.available == available {
            return false;
        }
        self.available = available;
        true
    }
}

impl std::fmt::Debug for ManagedLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedLock")
            .field("id", &self.id)
            .field("ieee", &self.config.ieee)
            .field("display_name", &self.config.display_name())
            .field("available", &self.available)
            .finish_non_exhaustive()
    }
}
