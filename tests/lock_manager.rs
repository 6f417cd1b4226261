// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the lock manager using a recording writer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use nimly_lib::cluster::{basic_attrs, door_lock_attrs, id, power_attrs};
use nimly_lib::codec::AttributeWrite;
use nimly_lib::error::{Error, ValueError, WriteError};
use nimly_lib::event::{DeviceEvent, DeviceId};
use nimly_lib::interpreter::Notification;
use nimly_lib::manager::{AttributeWriter, DeviceConfig, LockManager};
use nimly_lib::state::DeviceSnapshot;
use nimly_lib::types::{
    AutoRelockSeconds, DoorState, OperatorType, RawValue, SettingLevel, TimeSource,
};
use parking_lot::Mutex;
use tokio::sync::broadcast::error::TryRecvError;

/// Writer recording every attempt, optionally failing them.
#[derive(Debug, Default)]
struct MockWriter {
    writes: Mutex<Vec<(DeviceId, AttributeWrite)>>,
    failure: Mutex<Option<WriteError>>,
}

impl MockWriter {
    fn fail_with(&self, error: WriteError) {
        *self.failure.lock() = Some(error);
    }

    fn writes(&self) -> Vec<AttributeWrite> {
        self.writes.lock().iter().map(|(_, w)| w.clone()).collect()
    }

    fn last_value(&self) -> Option<RawValue> {
        self.writes.lock().last().map(|(_, w)| w.value.clone())
    }
}

impl AttributeWriter for MockWriter {
    async fn write_attribute(
        &self,
        device_id: DeviceId,
        write: &AttributeWrite,
    ) -> Result<(), WriteError> {
        self.writes.lock().push((device_id, write.clone()));
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

/// Zigbee local time for 2024-01-01T00:00:00Z.
const ZIGBEE_2024: u32 = 757_382_400;

/// Builds an Operation Event Notification payload with an empty PIN.
fn operation_event(source: u8, code: u8, user_id: u16, local_time: u32) -> Vec<u8> {
    let mut payload = vec![source, code];
    payload.extend_from_slice(&user_id.to_le_bytes());
    payload.push(0);
    payload.extend_from_slice(&local_time.to_le_bytes());
    payload
}

fn door_lock_report(attribute: u16, value: impl Into<RawValue>) -> Notification {
    Notification::attribute_report(id::DOOR_LOCK, attribute, value)
}

async fn setup() -> (LockManager<MockWriter>, DeviceId) {
    let manager = LockManager::new(MockWriter::default());
    let config = DeviceConfig::parse("00:0d:6f:ff:fe:12:34:56")
        .unwrap()
        .with_friendly_name("Front Door");
    let device_id = manager.add_device(config).await;
    (manager, device_id)
}

// ============================================================================
// Inbound Notifications
// ============================================================================

mod inbound {
    use super::*;

    #[tokio::test]
    async fn operator_report_records_manual_unlock() {
        let (manager, lock) = setup().await;
        let seed = [
            door_lock_report(door_lock_attrs::DOOR_STATE, 1_u8),
            door_lock_report(door_lock_attrs::LED_SETTINGS, 2_u8),
            Notification::attribute_report(id::BASIC, basic_attrs::SW_BUILD_ID, "1.4.0"),
            Notification::attribute_report(id::POWER_CONFIG, power_attrs::BATTERY_PERCENTAGE_REMAINING, 180_u8),
        ];
        for notification in &seed {
            assert!(manager.handle_notification_at(lock, notification, t0()).await.unwrap());
        }
        let before = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(before.door_state(), DoorState::Closed);
        assert_eq!(before.firmware().map(ToString::to_string).as_deref(), Some("1.4.0"));
        assert_eq!(before.battery().map(|b| b.value()), Some(90));

        let changed = manager
            .handle_notification_at(
                lock,
                &door_lock_report(door_lock_attrs::LAST_OPERATOR, 2_u8),
                t0(),
            )
            .await
            .unwrap();

        assert!(changed);
        let after = manager.get_snapshot(lock).await.unwrap();
        let record = after.last_unlock().unwrap();
        assert_eq!(record.operator(), OperatorType::Manual);
        assert_eq!(record.timestamp().at(), t0());
        assert_eq!(record.timestamp().source(), TimeSource::Observed);

        assert_eq!(after.door_state(), DoorState::Closed);
        assert_eq!(after.led_level(), Some(SettingLevel::Medium));
        assert_eq!(after.firmware(), before.firmware());
        assert_eq!(after.battery(), before.battery());
        assert_eq!(after.volume_level(), None);
        assert_eq!(after.auto_relock(), None);
    }

    #[tokio::test]
    async fn unknown_operator_code_is_unknown() {
        let (manager, lock) = setup().await;

        let changed = manager
            .handle_notification_at(
                lock,
                &door_lock_report(door_lock_attrs::LAST_OPERATOR, 9_u8),
                t0(),
            )
            .await
            .unwrap();

        assert!(changed);
        let snapshot = manager.get_snapshot(lock).await.unwrap();
        let record = snapshot.last_unlock().unwrap();
        assert_eq!(record.operator(), OperatorType::Unknown);
        assert_eq!(record.event_type(), "unknown_unlock");
    }

    #[tokio::test]
    async fn operation_event_uses_device_time() {
        let (manager, lock) = setup().await;
        let payload = operation_event(0, 0x02, 3, ZIGBEE_2024);

        manager
            .handle_notification_at(lock, &Notification::cluster_command(id::DOOR_LOCK, 0x20, payload), t0())
            .await
            .unwrap();

        let snapshot = manager.get_snapshot(lock).await.unwrap();
        let record = snapshot.last_unlock().unwrap();
        assert_eq!(record.operator(), OperatorType::Keypad);
        assert_eq!(record.raw_code(), Some(3));
        assert_eq!(record.timestamp().source(), TimeSource::Device);
        assert_eq!(
            record.timestamp().at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn older_unlock_does_not_replace_newer() {
        let (manager, lock) = setup().await;
        let newer = operation_event(0, 0x02, 1, ZIGBEE_2024);
        // Device clock claims a later time, but it was received earlier
        let older = operation_event(1, 0x02, 2, ZIGBEE_2024 + 60);

        assert!(
            manager
                .handle_notification_at(lock, &Notification::cluster_command(id::DOOR_LOCK, 0x20, newer), t0())
                .await
                .unwrap()
        );
        let mut events = manager.subscribe();
        assert!(
            !manager
                .handle_notification_at(
                    lock,
                    &Notification::cluster_command(id::DOOR_LOCK, 0x20, older),
                    t0() - Duration::seconds(5),
                )
                .await
                .unwrap()
        );

        let snapshot = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(snapshot.last_unlock().unwrap().raw_code(), Some(1));
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn unsynced_lock_clock_does_not_block_later_unlocks() {
        let (manager, lock) = setup().await;
        let remote_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(manager.record_remote_unlock_at(lock, remote_at).await.unwrap());

        // Lock clock never set from the hub: reads 2000-01-02
        let keypad = operation_event(0, 0x02, 4, 100_000);
        let changed = manager
            .handle_notification_at(
                lock,
                &Notification::cluster_command(id::DOOR_LOCK, 0x20, keypad),
                remote_at + Duration::minutes(1),
            )
            .await
            .unwrap();

        assert!(changed);
        let snapshot = manager.get_snapshot(lock).await.unwrap();
        let record = snapshot.last_unlock().unwrap();
        assert_eq!(record.operator(), OperatorType::Keypad);
        assert_eq!(record.raw_code(), Some(4));
        assert_eq!(record.timestamp().source(), TimeSource::Device);
        assert_eq!(
            record.timestamp().at(),
            Utc.with_ymd_and_hms(2000, 1, 2, 3, 46, 40).unwrap()
        );
        assert_eq!(record.received_at(), remote_at + Duration::minutes(1));

        // A remote unlock received later still replaces the device-time record
        assert!(
            manager
                .record_remote_unlock_at(lock, remote_at + Duration::minutes(2))
                .await
                .unwrap()
        );
        assert_eq!(
            manager.get_snapshot(lock).await.unwrap().last_unlock().unwrap().operator(),
            OperatorType::HomeAssistant
        );
    }

    #[tokio::test]
    async fn observed_unlocks_follow_receipt_order() {
        let (manager, lock) = setup().await;
        let report = door_lock_report(door_lock_attrs::LAST_OPERATOR, 0_u8);

        manager.handle_notification_at(lock, &report, t0()).await.unwrap();
        assert!(
            !manager
                .handle_notification_at(lock, &report, t0() - Duration::seconds(5))
                .await
                .unwrap()
        );
        assert!(
            manager
                .handle_notification_at(lock, &report, t0() + Duration::seconds(5))
                .await
                .unwrap()
        );

        let snapshot = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(
            snapshot.last_unlock().unwrap().timestamp().at(),
            t0() + Duration::seconds(5)
        );
    }

    #[tokio::test]
    async fn lock_operations_leave_snapshot_alone() {
        let (manager, lock) = setup().await;
        // lock and failed unlock (invalid PIN)
        for code in [0x01, 0x05] {
            let payload = operation_event(0, code, 1, ZIGBEE_2024);
            assert!(
                !manager
                    .handle_notification_at(lock, &Notification::cluster_command(id::DOOR_LOCK, 0x20, payload), t0())
                    .await
                    .unwrap()
            );
        }
        assert_eq!(manager.get_snapshot(lock).await.unwrap(), DeviceSnapshot::new());
    }

    #[tokio::test]
    async fn truncated_frame_is_dropped() {
        let (manager, lock) = setup().await;
        let notification = Notification::cluster_command(id::DOOR_LOCK, 0x20, vec![0x00_u8, 0x02, 0x01]);

        assert!(!manager.handle_notification_at(lock, &notification, t0()).await.unwrap());
    }

    #[tokio::test]
    async fn partial_updates_touch_one_field() {
        let (manager, lock) = setup().await;
        manager
            .handle_notification_at(lock, &door_lock_report(door_lock_attrs::SOUND_VOLUME, 3_u8), t0())
            .await
            .unwrap();
        manager
            .handle_notification_at(lock, &door_lock_report(door_lock_attrs::LED_SETTINGS, 1_u8), t0())
            .await
            .unwrap();

        let snapshot = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(snapshot.volume_level(), Some(SettingLevel::High));
        assert_eq!(snapshot.led_level(), Some(SettingLevel::Low));
        assert_eq!(snapshot.door_state(), DoorState::Unknown);
        assert!(snapshot.last_unlock().is_none());
    }

    #[tokio::test]
    async fn out_of_table_setting_clamps() {
        let (manager, lock) = setup().await;
        manager
            .handle_notification_at(lock, &door_lock_report(door_lock_attrs::LED_SETTINGS, 7_u8), t0())
            .await
            .unwrap();
        manager
            .handle_notification_at(lock, &door_lock_report(door_lock_attrs::AUTO_RELOCK_TIME, 90_000_u32), t0())
            .await
            .unwrap();

        let snapshot = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(snapshot.led_level(), Some(SettingLevel::High));
        assert_eq!(snapshot.auto_relock().map(|s| s.seconds()), Some(AutoRelockSeconds::MAX));
    }

    #[tokio::test]
    async fn battery_half_percent_units() {
        let (manager, lock) = setup().await;
        let report = |value: u8| {
            Notification::attribute_report(id::POWER_CONFIG, power_attrs::BATTERY_PERCENTAGE_REMAINING, value)
        };

        manager.handle_notification_at(lock, &report(150), t0()).await.unwrap();
        assert!(!manager.handle_notification_at(lock, &report(0xFF), t0()).await.unwrap());

        let snapshot = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(snapshot.battery().map(|b| b.value()), Some(75));
    }
}

// ============================================================================
// Settings Writes
// ============================================================================

mod settings {
    use super::*;

    #[tokio::test]
    async fn level_writes_round_trip() {
        let (manager, lock) = setup().await;

        for level in SettingLevel::ALL {
            manager.set_led(lock, level).await.unwrap();
            let written = manager.writer().last_value().unwrap();

            // The lock echoing the written value back changes nothing
            let echo = door_lock_report(door_lock_attrs::LED_SETTINGS, written);
            assert!(!manager.handle_notification_at(lock, &echo, t0()).await.unwrap());
            assert_eq!(manager.get_snapshot(lock).await.unwrap().led_level(), Some(level));
        }
    }

    #[tokio::test]
    async fn volume_write_targets_volume_attribute() {
        let (manager, lock) = setup().await;

        manager.set_volume(lock, SettingLevel::Low).await.unwrap();

        let writes = manager.writer().writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].cluster, id::DOOR_LOCK);
        assert_eq!(writes[0].attribute, door_lock_attrs::SOUND_VOLUME);
        assert_eq!(writes[0].value, RawValue::Int(1));
    }

    #[tokio::test]
    async fn auto_relock_round_trip() {
        let (manager, lock) = setup().await;

        for seconds in [0, 1, 30, 1800, 3600] {
            manager.set_auto_relock(lock, seconds).await.unwrap();
            let written = manager.writer().last_value().unwrap();
            assert_eq!(written, RawValue::Int(seconds));

            let echo = door_lock_report(door_lock_attrs::AUTO_RELOCK_TIME, written);
            assert!(!manager.handle_notification_at(lock, &echo, t0()).await.unwrap());
        }
    }

    #[tokio::test]
    async fn auto_relock_range_is_enforced() {
        let (manager, lock) = setup().await;

        for seconds in [-1, 3601, i64::MAX] {
            let result = manager.set_auto_relock(lock, seconds).await;
            assert!(matches!(
                result,
                Err(Error::Value(ValueError::OutOfRange { min: 0, max: 3600, actual })) if actual == seconds
            ));
        }
        assert!(manager.writer().writes().is_empty());
        assert!(manager.get_snapshot(lock).await.unwrap().auto_relock().is_none());
    }

    #[tokio::test]
    async fn failed_write_leaves_snapshot_unchanged() {
        let (manager, lock) = setup().await;
        manager.set_volume(lock, SettingLevel::Low).await.unwrap();
        let before = manager.get_snapshot(lock).await.unwrap();
        let mut events = manager.subscribe();

        manager
            .writer()
            .fail_with(WriteError::Rejected("NOT_AUTHORIZED".to_string()));
        let result = manager.set_volume(lock, SettingLevel::High).await;

        assert!(matches!(result, Err(Error::Write(WriteError::Rejected(_)))));
        assert_eq!(manager.get_snapshot(lock).await.unwrap(), before);
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn writes_go_to_the_right_lock() {
        let (manager, first) = setup().await;
        let second = manager
            .add_device(DeviceConfig::parse("00:0d:6f:ff:fe:ab:cd:ef").unwrap())
            .await;

        manager.set_led(second, SettingLevel::Medium).await.unwrap();

        let recorded = manager.writer().writes.lock().clone();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, second);
        assert!(manager.get_snapshot(first).await.unwrap().led_level().is_none());
    }
}

// ============================================================================
// Events and Callbacks
// ============================================================================

mod notifications {
    use super::*;

    #[tokio::test]
    async fn events_only_on_change() {
        let (manager, lock) = setup().await;
        let mut events = manager.subscribe();
        let report = door_lock_report(door_lock_attrs::DOOR_STATE, 0_u8);

        manager.handle_notification_at(lock, &report, t0()).await.unwrap();
        manager.handle_notification_at(lock, &report, t0()).await.unwrap();

        match events.try_recv().unwrap() {
            DeviceEvent::SnapshotChanged {
                device_id,
                snapshot,
                ..
            } => {
                assert_eq!(device_id, lock);
                assert_eq!(snapshot.door_state(), DoorState::Open);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn callbacks_fire_once_per_change() {
        let (manager, lock) = setup().await;
        let unlocks = Arc::new(AtomicUsize::new(0));
        let settings = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&unlocks);
        manager.callbacks().on_unlocked(move |_, record| {
            assert_eq!(record.operator(), OperatorType::HomeAssistant);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&settings);
        manager.callbacks().on_setting_changed(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.record_remote_unlock_at(lock, t0()).await.unwrap();
        manager.record_remote_unlock_at(lock, t0()).await.unwrap();
        manager.set_led(lock, SettingLevel::Low).await.unwrap();
        manager.set_led(lock, SettingLevel::Low).await.unwrap();

        assert_eq!(unlocks.load(Ordering::SeqCst), 1);
        assert_eq!(settings.load(Ordering::SeqCst), 1);
        // Both writes were still sent
        assert_eq!(manager.writer().writes().len(), 2);
    }

    #[tokio::test]
    async fn availability_callbacks() {
        let (manager, lock) = setup().await;
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        manager.callbacks().on_availability_changed(move |_, available| {
            log.lock().push(available);
        });

        manager.set_available(lock, false).await.unwrap();
        manager.set_available(lock, false).await.unwrap();
        manager.set_available(lock, true).await.unwrap();

        assert_eq!(*seen.lock(), vec![false, true]);
    }
}

// ============================================================================
// JSON Notifications
// ============================================================================

mod json {
    use super::*;

    #[tokio::test]
    async fn attribute_report_json() {
        let (manager, lock) = setup().await;
        let json = r#"{"type": "attribute_report", "cluster": 257, "attribute": 36, "value": 2}"#;

        assert!(manager.handle_json(lock, json).await.unwrap());
        assert_eq!(
            manager.get_snapshot(lock).await.unwrap().volume_level(),
            Some(SettingLevel::Medium)
        );
    }

    #[tokio::test]
    async fn firmware_text_json() {
        let (manager, lock) = setup().await;
        let json = r#"{"type": "attribute_report", "cluster": 0, "attribute": 16384, "value": " 2.3.1 "}"#;

        assert!(manager.handle_json(lock, json).await.unwrap());
        let snapshot = manager.get_snapshot(lock).await.unwrap();
        assert_eq!(snapshot.firmware().unwrap().as_str(), "2.3.1");
    }

    #[tokio::test]
    async fn cluster_command_json() {
        let (manager, lock) = setup().await;
        // schedule unlock by keypad source, no user, clock not set
        let json = r#"{"type": "cluster_command", "cluster": 257, "command": 32,
                       "payload": [0, 12, 255, 255, 0, 0, 0, 0, 0]}"#;

        assert!(manager.handle_json(lock, json).await.unwrap());
        let snapshot = manager.get_snapshot(lock).await.unwrap();
        let record = snapshot.last_unlock().unwrap();
        assert_eq!(record.operator(), OperatorType::Schedule);
        assert_eq!(record.raw_code(), None);
        assert_eq!(record.timestamp().source(), TimeSource::Observed);
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let (manager, lock) = setup().await;

        let result = manager.handle_json(lock, r#"{"type": "attribute_report"}"#).await;

        assert!(matches!(result, Err(Error::Parse(_))));
        assert_eq!(manager.get_snapshot(lock).await.unwrap(), DeviceSnapshot::new());
    }
}
