// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed callbacks for lock state changes.
//!
//! - [`SubscriptionId`] - Handle returned on registration, used to unsubscribe
//! - [`CallbackRegistry`] - Stores callbacks and dispatches applied events

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::event::DeviceId;
use crate::state::{LastUnlockRecord, LockEvent, SettingChange};
use crate::types::{BatteryPercentage, DoorState, FirmwareVersion};

/// Handle of a registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type UnlockedCallback = Arc<dyn Fn(DeviceId, &LastUnlockRecord) + Send + Sync>;
type DoorStateCallback = Arc<dyn Fn(DeviceId, DoorState) + Send + Sync>;
type SettingCallback = Arc<dyn Fn(DeviceId, SettingChange) + Send + Sync>;
type FirmwareCallback = Arc<dyn Fn(DeviceId, &FirmwareVersion) + Send + Sync>;
type BatteryCallback = Arc<dyn Fn(DeviceId, BatteryPercentage) + Send + Sync>;
type AvailabilityCallback = Arc<dyn Fn(DeviceId, bool) + Send + Sync>;
type EventCallback = Arc<dyn Fn(DeviceId, &LockEvent) + Send + Sync>;

/// Registry of callbacks invoked when a lock's snapshot changes.
///
/// Callbacks only fire for events that actually changed the snapshot, and
/// run synchronously on the task that applied the event.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// use nimly_lib::event::DeviceId;
/// use nimly_lib::state::LockEvent;
/// use nimly_lib::subscription::CallbackRegistry;
/// use nimly_lib::types::DoorState;
///
/// let registry = CallbackRegistry::new();
/// let opened = Arc::new(AtomicBool::new(false));
/// let flag = opened.clone();
///
/// registry.on_door_state_changed(move |_, state| {
///     flag.store(state == DoorState::Open, Ordering::SeqCst);
/// });
///
/// registry.dispatch(DeviceId::new(), &LockEvent::door_state(DoorState::Open));
/// assert!(opened.load(Ordering::SeqCst));
/// ```
pub struct CallbackRegistry {
    next_id: AtomicU64,
    unlocked: RwLock<HashMap<SubscriptionId, UnlockedCallback>>,
    door_state: RwLock<HashMap<SubscriptionId, DoorStateCallback>>,
    setting: RwLock<HashMap<SubscriptionId, SettingCallback>>,
    firmware: RwLock<HashMap<SubscriptionId, FirmwareCallback>>,
    battery: RwLock<HashMap<SubscriptionId, BatteryCallback>>,
    availability: RwLock<HashMap<SubscriptionId, AvailabilityCallback>>,
    event: RwLock<HashMap<SubscriptionId, EventCallback>>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            unlocked: RwLock::new(HashMap::new()),
            door_state: RwLock::new(HashMap::new()),
            setting: RwLock::new(HashMap::new()),
            firmware: RwLock::new(HashMap::new()),
            battery: RwLock::new(HashMap::new()),
            availability: RwLock::new(HashMap::new()),
            event: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a callback for new last-unlock records.
    pub fn on_unlocked<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, &LastUnlockRecord) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.unlocked.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for door open/closed changes.
    pub fn on_door_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, DoorState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.door_state.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for LED, volume and auto relock changes.
    pub fn on_setting_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, SettingChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.setting.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for firmware version reports.
    pub fn on_firmware_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, &FirmwareVersion) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.firmware.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for battery level changes.
    pub fn on_battery_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, BatteryPercentage) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.battery.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for availability changes.
    pub fn on_availability_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, bool) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.availability.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback receiving every applied event.
    pub fn on_event<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceId, &LockEvent) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.event.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.unlocked.write().remove(&id).is_some()
            || self.door_state.write().remove(&id).is_some()
            || self.setting.write().remove(&id).is_some()
            || self.firmware.write().remove(&id).is_some()
            || self.battery.write().remove(&id).is_some()
            || self.availability.write().remove(&id).is_some()
            || self.event.write().remove(&id).is_some()
    }

    /// Removes every callback.
    pub fn clear(&self) {
        self.unlocked.write().clear();
        self.door_state.write().clear();
        self.setting.write().clear();
        self.firmware.write().clear();
        self.battery.write().clear();
        self.availability.write().clear();
        self.event.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Calls the callbacks matching an applied event.
    pub fn dispatch(&self, device_id: DeviceId, event: &LockEvent) {
        for callback in self.event.read().values() {
            callback(device_id, event);
        }
        self.dispatch_typed(device_id, event);
    }

    fn dispatch_typed(&self, device_id: DeviceId, event: &LockEvent) {
        match event {
            LockEvent::Unlock(record) => {
                for callback in self.unlocked.read().values() {
                    callback(device_id, record);
                }
            }
            LockEvent::DoorState(state) => {
                for callback in self.door_state.read().values() {
                    callback(device_id, *state);
                }
            }
            LockEvent::SettingChanged(change) => {
                for callback in self.setting.read().values() {
                    callback(device_id, *change);
                }
            }
            LockEvent::Firmware(version) => {
                for callback in self.firmware.read().values() {
                    callback(device_id, version);
                }
            }
            LockEvent::Battery(percentage) => {
                for callback in self.battery.read().values() {
                    callback(device_id, *percentage);
                }
            }
        }
    }

    /// Calls the availability callbacks.
    pub fn dispatch_availability(&self, device_id: DeviceId, available: bool) {
        for callback in self.availability.read().values() {
            callback(device_id, available);
        }
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.unlocked.read().len()
            + self.door_state.read().len()
            + self.setting.read().len()
            + self.firmware.read().len()
            + self.battery.read().len()
            + self.availability.read().len()
            + self.event.read().len()
    }

    /// Returns `true` if no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish_non_exhaustive()
    }
}
