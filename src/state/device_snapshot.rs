// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device state snapshot.

use crate::types::{
    AutoRelockSeconds, BatteryPercentage, DoorState, FirmwareVersion, SettingLevel,
};

use super::{LastUnlockRecord, LockEvent, SettingChange};

/// Best-known state of one lock.
///
/// Every field starts unknown and is filled in as the lock reports it. Events
/// are merged field by field: an event only touches the field it carries.
///
/// # Examples
///
/// ```
/// use nimly_lib::state::{DeviceSnapshot, LockEvent};
/// use nimly_lib::types::SettingLevel;
///
/// let mut snapshot = DeviceSnapshot::new();
/// snapshot.apply(&LockEvent::led(SettingLevel::Medium));
///
/// assert_eq!(snapshot.led_level(), Some(SettingLevel::Medium));
/// assert_eq!(snapshot.volume_level(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceSnapshot {
    last_unlock: Option<LastUnlockRecord>,
    door_state: DoorState,
    led_level: Option<SettingLevel>,
    volume_level: Option<SettingLevel>,
    auto_relock: Option<AutoRelockSeconds>,
    firmware: Option<FirmwareVersion>,
    battery: Option<BatteryPercentage>,
}

impl DeviceSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    /// Returns the last unlock, if one has been seen.
    #[must_use]
    pub fn last_unlock(&self) -> Option<&LastUnlockRecord> {
        self.last_unlock.as_ref()
    }

    /// Returns the door state.
    #[must_use]
    pub fn door_state(&self) -> DoorState {
        self.door_state
    }

    /// Returns the LED level.
    #[must_use]
    pub fn led_level(&self) -> Option<SettingLevel> {
        self.led_level
    }

    /// Returns the sound volume level.
    #[must_use]
    pub fn volume_level(&self) -> Option<SettingLevel> {
        self.volume_level
    }

    /// Returns the auto relock delay.
    #[must_use]
    pub fn auto_relock(&self) -> Option<AutoRelockSeconds> {
        self.auto_relock
    }

    /// Returns the firmware version.
    #[must_use]
    pub fn firmware(&self) -> Option<&FirmwareVersion> {
        self.firmware.as_ref()
    }

    /// Returns the battery level.
    #[must_use]
    pub fn battery(&self) -> Option<BatteryPercentage> {
        self.battery
    }

    // ========== Event Application ==========

    /// Applies an event and returns whether the snapshot actually changed.
    ///
    /// An unlock received before the recorded one is ignored, so a delayed
    /// or retransmitted report cannot roll the last unlock back. Unlocks are
    /// ordered by receipt instant, never by the lock's own clock. Unlocks
    /// received at the same instant replace each other in apply order.
    pub fn apply(&mut self, event: &LockEvent) -> bool {
        match event {
            LockEvent::Unlock(record) => self.apply_unlock(record),
            LockEvent::DoorState(state) => replace(&mut self.door_state, *state),
            LockEvent::Firmware(version) => {
                if self.firmware.as_ref() == Some(version) {
                    false
                } else {
                    self.firmware = Some(version.clone());
                    true
                }
            }
            LockEvent::Battery(percentage) => replace(&mut self.battery, Some(*percentage)),
            LockEvent::SettingChanged(change) => match change {
                SettingChange::Led(level) => replace(&mut self.led_level, Some(*level)),
                SettingChange::Volume(level) => replace(&mut self.volume_level, Some(*level)),
                SettingChange::AutoRelock(seconds) => {
                    replace(&mut self.auto_relock, Some(*seconds))
                }
            },
        }
    }

    fn apply_unlock(&mut self, record: &LastUnlockRecord) -> bool {
        if let Some(current) = &self.last_unlock {
            if record.received_at() < current.received_at() {
                tracing::debug!(
                    operator = %record.operator(),
                    received_at = %record.received_at(),
                    current = %current.received_at(),
                    "ignoring unlock older than the recorded one"
                );
                return false;
            }
            if current == record {
                return false;
            }
        }
        self.last_unlock = Some(*record);
        true
    }

    /// Resets every field to unknown.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
