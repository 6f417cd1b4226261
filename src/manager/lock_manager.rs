// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock manager coordinating notifications, snapshots and setting writes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast, watch};

use crate::codec::encode_setting;
use crate::error::Error;
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::interpreter::Notification;
use crate::state::{DeviceSnapshot, LockEvent, SettingChange};
use crate::subscription::CallbackRegistry;
use crate::types::{AutoRelockSeconds, IeeeAddress, OperatorType, SettingLevel, Timestamp};

use super::device_config::DeviceConfig;
use super::managed_lock::ManagedLock;
use super::writer::AttributeWriter;

/// Manager for a set of Nimly locks.
///
/// The host feeds every notification it receives from a lock into
/// [`handle_notification`](Self::handle_notification). The manager decodes
/// it, merges it into the lock's [`DeviceSnapshot`] and, when the snapshot
/// changed, publishes a [`DeviceEvent::SnapshotChanged`] and runs the
/// registered callbacks.
///
/// Setting writes go through the host's [`AttributeWriter`]. The snapshot is
/// only updated once the write succeeded.
///
/// # Examples
///
/// ```
/// use nimly_lib::interpreter::Notification;
/// use nimly_lib::manager::{DeviceConfig, LockManager, NullWriter};
/// use nimly_lib::types::{OperatorType, SettingLevel};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> nimly_lib::Result<()> {
///     let manager = LockManager::new(NullWriter);
///     let config = DeviceConfig::parse("00:0d:6f:ff:fe:12:34:56")?;
///     let device_id = manager.add_device(config).await;
///
///     // Operator attribute reported by the lock
///     let report = Notification::attribute_report(0x0101, 0x0100, 2_u8);
///     assert!(manager.handle_notification(device_id, &report).await?);
///
///     manager.set_led(device_id, SettingLevel::High).await?;
///
///     let snapshot = manager.get_snapshot(device_id).await.unwrap();
///     assert_eq!(snapshot.last_unlock().unwrap().operator(), OperatorType::Manual);
///     assert_eq!(snapshot.led_level(), Some(SettingLevel::High));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct LockManager<W> {
    /// Managed locks, keyed by device ID.
    devices: Arc<RwLock<HashMap<DeviceId, ManagedLock>>>,
    /// Event bus for broadcasting device events.
    event_bus: EventBus,
    /// Typed callbacks, run alongside the event bus.
    callbacks: Arc<CallbackRegistry>,
    /// The host's write primitive.
    writer: Arc<W>,
}

impl<W: AttributeWriter> LockManager<W> {
    /// Creates a new lock manager writing through `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            devices: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::new(),
            callbacks: Arc::new(CallbackRegistry::new()),
            writer: Arc::new(writer),
        }
    }

    /// Creates a new lock manager with custom event bus capacity.
    #[must_use]
    pub fn with_capacity(writer: W, event_capacity: usize) -> Self {
        Self {
            devices: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::with_capacity(event_capacity),
            callbacks: Arc::new(CallbackRegistry::new()),
            writer: Arc::new(writer),
        }
    }

    /// Returns the host's write primitive.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to device events.
    ///
    /// Returns a receiver that will receive all events for all managed locks.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    /// Returns the callback registry.
    #[must_use]
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    // =========================================================================
    // Device Management
    // =========================================================================

    /// Adds a lock to the manager.
    ///
    /// Adding a lock whose IEEE address is already managed returns the
    /// existing ID and leaves its configuration untouched.
    pub async fn add_device(&self, config: DeviceConfig) -> DeviceId {
        let ieee = config.ieee;
        let mut devices = self.devices.write().await;

        if let Some(existing) = devices.values().find(|d| d.config.ieee == ieee) {
            tracing::debug!(device_id = %existing.id, %ieee, "lock already managed");
            return existing.id;
        }

        let device = ManagedLock::new(config);
        let device_id = device.id;
        devices.insert(device_id, device);
        drop(devices);

        tracing::debug!(%device_id, %ieee, "lock added");
        self.event_bus
            .publish(DeviceEvent::device_added(device_id, ieee));

        device_id
    }

    /// Removes a lock from the manager.
    ///
    /// # Returns
    ///
    /// Returns `true` if the lock was found and removed, `false` otherwise.
    pub async fn remove_device(&self, device_id: DeviceId) -> bool {
        let removed = self.devices.write().await.remove(&device_id).is_some();

        if removed {
            self.event_bus
                .publish(DeviceEvent::device_removed(device_id));
        }

        removed
    }

    /// Returns a list of all device IDs.
    pub async fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.read().await.keys().copied().collect()
    }

    /// Returns the number of managed locks.
    pub async fn device_count(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Looks up a lock by its IEEE address.
    pub async fn device_id_for_ieee(&self, ieee: IeeeAddress) -> Option<DeviceId> {
        self.devices
            .read()
            .await
            .values()
            .find(|d| d.config.ieee == ieee)
            .map(|d| d.id)
    }

    /// Returns the configuration of a lock.
    pub async fn device_config(&self, device_id: DeviceId) -> Option<DeviceConfig> {
        self.devices
            .read()
            .await
            .get(&device_id)
            .map(|d| d.config.clone())
    }

    /// Returns the display name for a lock.
    pub async fn display_name(&self, device_id: DeviceId) -> Option<String> {
        self.devices
            .read()
            .await
            .get(&device_id)
            .map(|d| d.config.display_name())
    }

    // =========================================================================
    // Availability
    // =========================================================================

    /// Records whether the host can currently reach a lock.
    ///
    /// Returns `true` if availability changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the lock is not managed.
    pub async fn set_available(&self, device_id: DeviceId, available: bool) -> Result<bool, Error> {
        let mut devices = self.devices.write().await;
        let device = devices.get_mut(&device_id).ok_or(Error::DeviceNotFound)?;
        let changed = device.set_available(available);
        drop(devices);

        if changed {
            tracing::debug!(%device_id, available, "availability changed");
            self.callbacks.dispatch_availability(device_id, available);
            self.event_bus
                .publish(DeviceEvent::availability_changed(device_id, available));
        }
        Ok(changed)
    }

    /// Returns true if the lock is managed and available.
    pub async fn is_available(&self, device_id: DeviceId) -> bool {
        self.devices
            .read()
            .await
            .get(&device_id)
            .is_some_and(|d| d.available)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Returns the current snapshot of a lock.
    pub async fn get_snapshot(&self, device_id: DeviceId) -> Option<DeviceSnapshot> {
        self.devices
            .read()
            .await
            .get(&device_id)
            .map(|d| d.snapshot.clone())
    }

    /// Watches a lock's snapshot.
    ///
    /// The receiver always holds the latest snapshot.
    pub async fn watch_device(&self, device_id: DeviceId) -> Option<watch::Receiver<DeviceSnapshot>> {
        self.devices
            .read()
            .await
            .get(&device_id)
            .map(ManagedLock::watch_snapshot)
    }

    /// Handles a notification received now.
    ///
    /// Returns `true` if the lock's snapshot changed. Notifications that do
    /// not map to a lock event are dropped and return `false`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the lock is not managed.
    pub async fn handle_notification(
        &self,
        device_id: DeviceId,
        notification: &Notification,
    ) -> Result<bool, Error> {
        self.handle_notification_at(device_id, notification, Utc::now())
            .await
    }

    /// Handles a notification received at `received_at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the lock is not managed.
    pub async fn handle_notification_at(
        &self,
        device_id: DeviceId,
        notification: &Notification,
        received_at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut devices = self.devices.write().await;
        let device = devices.get_mut(&device_id).ok_or(Error::DeviceNotFound)?;

        let Some(event) = device.interpreter.interpret(notification, received_at) else {
            return Ok(false);
        };

        let changed = device.apply(&event);
        let snapshot = changed.then(|| device.snapshot.clone());
        drop(devices);

        if let Some(snapshot) = snapshot {
            self.notify(device_id, event, snapshot);
        }
        Ok(changed)
    }

    /// Parses a JSON notification and handles it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the JSON is not a notification, or
    /// `Error::DeviceNotFound` if the lock is not managed.
    pub async fn handle_json(&self, device_id: DeviceId, json: &str) -> Result<bool, Error> {
        let notification = Notification::from_json(json)?;
        self.handle_notification(device_id, &notification).await
    }

    /// Applies an already interpreted event to a lock.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the lock is not managed.
    pub async fn apply_event(&self, device_id: DeviceId, event: LockEvent) -> Result<bool, Error> {
        let mut devices = self.devices.write().await;
        let device = devices.get_mut(&device_id).ok_or(Error::DeviceNotFound)?;

        let changed = device.apply(&event);
        let snapshot = changed.then(|| device.snapshot.clone());
        drop(devices);

        if let Some(snapshot) = snapshot {
            self.notify(device_id, event, snapshot);
        }
        Ok(changed)
    }

    /// Records an unlock issued by the home-automation platform now.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the lock is not managed.
    pub async fn record_remote_unlock(&self, device_id: DeviceId) -> Result<bool, Error> {
        self.record_remote_unlock_at(device_id, Utc::now()).await
    }

    /// Records an unlock issued by the home-automation platform at `at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the lock is not managed.
    pub async fn record_remote_unlock_at(
        &self,
        device_id: DeviceId,
        at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let event = LockEvent::unlock(OperatorType::HomeAssistant, Timestamp::observed(at));
        self.apply_event(device_id, event).await
    }

    fn notify(&self, device_id: DeviceId, event: LockEvent, snapshot: DeviceSnapshot) {
        self.callbacks.dispatch(device_id, &event);
        self.event_bus
            .publish(DeviceEvent::snapshot_changed(device_id, event, snapshot));
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Sets the LED brightness level.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is not managed, is unavailable, or the
    /// write fails.
    pub async fn set_led(&self, device_id: DeviceId, level: SettingLevel) -> Result<(), Error> {
        self.write_setting(device_id, SettingChange::Led(level))
            .await
    }

    /// Sets the sound volume level.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is not managed, is unavailable, or the
    /// write fails.
    pub async fn set_volume(&self, device_id: DeviceId, level: SettingLevel) -> Result<(), Error> {
        self.write_setting(device_id, SettingChange::Volume(level))
            .await
    }

    /// Sets the auto relock time in seconds.
    ///
    /// The value is validated before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if `seconds` is outside 0..=3600, or an error if
    /// the lock is not managed, is unavailable, or the write fails.
    pub async fn set_auto_relock(&self, device_id: DeviceId, seconds: i64) -> Result<(), Error> {
        let seconds = AutoRelockSeconds::new(seconds)?;
        self.write_setting(device_id, SettingChange::AutoRelock(seconds))
            .await
    }

    /// Writes a setting and applies it once the lock accepted it.
    ///
    /// A lock removed while its write is in flight still reports success.
    async fn write_setting(&self, device_id: DeviceId, change: SettingChange) -> Result<(), Error> {
        let write = {
            let devices = self.devices.read().await;
            let device = devices.get(&device_id).ok_or(Error::DeviceNotFound)?;
            if !device.available {
                return Err(Error::DeviceUnavailable);
            }
            encode_setting(device.interpreter.profile(), &change)
        };

        if let Err(e) = self.writer.write_attribute(device_id, &write).await {
            tracing::warn!(
                %device_id,
                setting = %change.axis(),
                value = %write.value,
                error = %e,
                "setting write failed"
            );
            return Err(e.into());
        }

        match self.apply_event(device_id, change.into()).await {
            // Removed while the write was in flight; the lock still took it
            Err(Error::DeviceNotFound) => {
                tracing::debug!(%device_id, setting = %change.axis(), "lock removed after setting write");
                Ok(())
            }
            result => result.map(|_| ()),
        }
    }
}

impl<W: AttributeWriter + Default> Default for LockManager<W> {
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> Clone for LockManager<W> {
    fn clone(&self) -> Self {
        Self {
            devices: Arc::clone(&self.devices),
            event_bus: self.event_bus.clone(),
            callbacks: Arc::clone(&self.callbacks),
            writer: Arc::clone(&self.writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AttributeWrite;
    use crate::error::{ValueError, WriteError};
    use crate::manager::NullWriter;
    use crate::types::DoorState;
    use chrono::TimeZone;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct FailingWriter {
        attempts: Mutex<Vec<AttributeWrite>>,
    }

    impl AttributeWriter for FailingWriter {
        async fn write_attribute(
            &self,
            _device_id: DeviceId,
            write: &AttributeWrite,
        ) -> Result<(), WriteError> {
            self.attempts.lock().push(write.clone());
            Err(WriteError::Timeout(5000))
        }
    }

    /// Writer that removes the target lock while its write is in flight.
    #[derive(Debug, Default)]
    struct RemovingWriter {
        devices: Mutex<Option<Arc<RwLock<HashMap<DeviceId, ManagedLock>>>>>,
    }

    impl AttributeWriter for RemovingWriter {
        async fn write_attribute(
            &self,
            device_id: DeviceId,
            _write: &AttributeWrite,
        ) -> Result<(), WriteError> {
            let devices = self.devices.lock().clone();
            if let Some(devices) = devices {
                devices.write().await.remove(&device_id);
            }
            Ok(())
        }
    }

    fn config() -> DeviceConfig {
        DeviceConfig::new(IeeeAddress::new(0x000d_6fff_fe12_3456))
    }

    #[tokio::test]
    async fn add_and_remove() {
        let manager = LockManager::new(NullWriter);
        let mut events = manager.subscribe();

        let id = manager.add_device(config()).await;
        assert_eq!(manager.device_count().await, 1);
        assert!(matches!(
            events.recv().await.unwrap(),
            DeviceEvent::DeviceAdded { device_id, .. } if device_id == id
        ));

        assert!(manager.remove_device(id).await);
        assert!(!manager.remove_device(id).await);
        assert_eq!(manager.device_count().await, 0);
    }

    #[tokio::test]
    async fn add_same_ieee_twice() {
        let manager = LockManager::new(NullWriter);
        let first = manager.add_device(config()).await;
        let second = manager
            .add_device(config().with_friendly_name("Other"))
            .await;

        assert_eq!(first, second);
        assert_eq!(manager.device_count().await, 1);
        assert_eq!(manager.display_name(first).await.unwrap(), "00:0d:6f:ff:fe:12:34:56");
    }

    #[tokio::test]
    async fn lookup_by_ieee() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;

        assert_eq!(
            manager.device_id_for_ieee(IeeeAddress::new(0x000d_6fff_fe12_3456)).await,
            Some(id)
        );
        assert_eq!(manager.device_id_for_ieee(IeeeAddress::new(1)).await, None);
    }

    #[tokio::test]
    async fn unknown_device() {
        let manager = LockManager::new(NullWriter);
        let id = DeviceId::new();
        let report = Notification::attribute_report(0x0101, 0x0003, 1_u8);

        assert!(matches!(
            manager.handle_notification(id, &report).await,
            Err(Error::DeviceNotFound)
        ));
        assert!(matches!(
            manager.set_led(id, SettingLevel::Low).await,
            Err(Error::DeviceNotFound)
        ));
        assert!(manager.get_snapshot(id).await.is_none());
    }

    #[tokio::test]
    async fn notification_updates_snapshot_once() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;
        let report = Notification::attribute_report(0x0101, 0x0003, 0_u8);

        assert!(manager.handle_notification(id, &report).await.unwrap());
        assert!(!manager.handle_notification(id, &report).await.unwrap());
        assert_eq!(
            manager.get_snapshot(id).await.unwrap().door_state(),
            DoorState::Open
        );
    }

    #[tokio::test]
    async fn unmodelled_notification_is_ignored() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;
        let report = Notification::attribute_report(0x0006, 0x0000, 1_u8);

        assert!(!manager.handle_notification(id, &report).await.unwrap());
        assert_eq!(manager.get_snapshot(id).await.unwrap(), DeviceSnapshot::new());
    }

    #[tokio::test]
    async fn remote_unlock_is_home_assistant() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert!(manager.record_remote_unlock_at(id, at).await.unwrap());

        let snapshot = manager.get_snapshot(id).await.unwrap();
        let record = snapshot.last_unlock().unwrap();
        assert_eq!(record.operator(), OperatorType::HomeAssistant);
        assert_eq!(record.event_type(), "rf_unlock");
        assert_eq!(record.timestamp().at(), at);
    }

    #[tokio::test]
    async fn successful_write_updates_snapshot() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;

        manager.set_volume(id, SettingLevel::Medium).await.unwrap();
        manager.set_auto_relock(id, 120).await.unwrap();

        let snapshot = manager.get_snapshot(id).await.unwrap();
        assert_eq!(snapshot.volume_level(), Some(SettingLevel::Medium));
        assert_eq!(snapshot.auto_relock().map(|s| s.seconds()), Some(120));
    }

    #[tokio::test]
    async fn failed_write_keeps_snapshot() {
        let manager = LockManager::new(FailingWriter::default());
        let id = manager.add_device(config()).await;

        let result = manager.set_led(id, SettingLevel::High).await;

        assert!(matches!(result, Err(Error::Write(WriteError::Timeout(5000)))));
        assert_eq!(manager.writer().attempts.lock().len(), 1);
        assert_eq!(manager.get_snapshot(id).await.unwrap().led_level(), None);
    }

    #[tokio::test]
    async fn accepted_write_to_removed_lock_succeeds() {
        let manager = LockManager::new(RemovingWriter::default());
        *manager.writer().devices.lock() = Some(Arc::clone(&manager.devices));
        let id = manager.add_device(config()).await;
        let mut events = manager.subscribe();

        assert!(manager.set_led(id, SettingLevel::High).await.is_ok());
        assert_eq!(manager.device_count().await, 0);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn out_of_range_relock_sends_nothing() {
        let manager = LockManager::new(FailingWriter::default());
        let id = manager.add_device(config()).await;

        for seconds in [-1, 3601] {
            assert!(matches!(
                manager.set_auto_relock(id, seconds).await,
                Err(Error::Value(ValueError::OutOfRange { .. }))
            ));
        }
        assert!(manager.writer().attempts.lock().is_empty());
    }

    #[tokio::test]
    async fn unavailable_lock_rejects_writes() {
        let manager = LockManager::new(FailingWriter::default());
        let id = manager.add_device(config()).await;

        assert!(manager.set_available(id, false).await.unwrap());
        assert!(!manager.is_available(id).await);
        assert!(matches!(
            manager.set_volume(id, SettingLevel::Off).await,
            Err(Error::DeviceUnavailable)
        ));
        assert!(manager.writer().attempts.lock().is_empty());
    }

    #[tokio::test]
    async fn availability_events() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;
        let mut events = manager.subscribe();

        assert!(!manager.set_available(id, true).await.unwrap());
        assert!(manager.set_available(id, false).await.unwrap());

        let event = events.recv().await.unwrap();
        assert!(matches!(
            event,
            DeviceEvent::AvailabilityChanged { available: false, .. }
        ));
    }

    #[tokio::test]
    async fn watch_follows_changes() {
        let manager = LockManager::new(NullWriter);
        let id = manager.add_device(config()).await;
        let mut rx = manager.watch_device(id).await.unwrap();

        manager
            .apply_event(id, LockEvent::door_state(DoorState::Closed))
            .await
            .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().door_state(), DoorState::Closed);
    }

    #[tokio::test]
    async fn clone_shares_devices() {
        let manager = LockManager::new(NullWriter);
        let other = manager.clone();
        let id = manager.add_device(config()).await;

        assert_eq!(other.device_ids().await, vec![id]);
    }
}
