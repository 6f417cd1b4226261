// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domain events produced by the interpreter.
//!
//! Each [`LockEvent`] touches exactly one snapshot field.
//!
//! # Examples
//!
//! ```
//! use nimly_lib::state::{DeviceSnapshot, LockEvent};
//! use nimly_lib::types::{DoorState, OperatorType, Timestamp};
//!
//! let mut snapshot = DeviceSnapshot::new();
//!
//! let changed = snapshot.apply(&LockEvent::unlock(OperatorType::Keypad, Timestamp::now()));
//! assert!(changed);
//!
//! let changed = snapshot.apply(&LockEvent::door_state(DoorState::Closed));
//! assert!(changed);
//! assert!(!snapshot.apply(&LockEvent::door_state(DoorState::Closed)));
//! ```

use chrono::{DateTime, Utc};

use crate::types::{
    AutoRelockSeconds, BatteryPercentage, DoorState, FirmwareVersion, OperatorType, SettingAxis,
    SettingLevel, Timestamp,
};

/// Who unlocked the door, and when.
///
/// The displayed [`Timestamp`] may come from the lock's own clock, which is
/// often unset or drifting. Records are therefore ordered by
/// [`received_at`](Self::received_at), the instant the notification reached
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LastUnlockRecord {
    operator: OperatorType,
    timestamp: Timestamp,
    received_at: DateTime<Utc>,
    raw_code: Option<u16>,
}

impl LastUnlockRecord {
    /// Creates a record without a user identifier.
    ///
    /// The receipt instant defaults to the timestamp's instant; use
    /// [`with_received_at`](Self::with_received_at) when the timestamp
    /// comes from the device.
    #[must_use]
    pub const fn new(operator: OperatorType, timestamp: Timestamp) -> Self {
        Self {
            operator,
            timestamp,
            received_at: timestamp.at(),
            raw_code: None,
        }
    }

    /// Sets the instant the notification was received.
    #[must_use]
    pub const fn with_received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    /// Attaches the user identifier (PIN slot, RFID slot, ...) reported by
    /// the lock.
    #[must_use]
    pub const fn with_raw_code(mut self, raw_code: u16) -> Self {
        self.raw_code = Some(raw_code);
        self
    }

    /// Returns how the door was unlocked.
    #[must_use]
    pub const fn operator(&self) -> OperatorType {
        self.operator
    }

    /// Returns when the door was unlocked.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns when the notification carrying this unlock was received.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Returns the user identifier, if the lock reported one.
    #[must_use]
    pub const fn raw_code(&self) -> Option<u16> {
        self.raw_code
    }

    /// Returns the event type label (`keypad_unlock`, ...).
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.operator.event_type()
    }
}

/// A confirmed change to one of the writable settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SettingChange {
    /// LED level.
    Led(SettingLevel),
    /// Sound volume level.
    Volume(SettingLevel),
    /// Auto relock delay.
    AutoRelock(AutoRelockSeconds),
}

impl SettingChange {
    /// Returns the setting this change applies to.
    #[must_use]
    pub const fn axis(&self) -> SettingAxis {
        match self {
            Self::Led(_) => SettingAxis::Led,
            Self::Volume(_) => SettingAxis::Volume,
            Self::AutoRelock(_) => SettingAxis::AutoRelock,
        }
    }
}

/// An interpreted lock event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LockEvent {
    /// The door was unlocked.
    Unlock(LastUnlockRecord),

    /// The door was opened or closed.
    DoorState(DoorState),

    /// The lock reported its firmware version.
    Firmware(FirmwareVersion),

    /// The lock reported its battery level.
    Battery(BatteryPercentage),

    /// A setting changed on the device.
    SettingChanged(SettingChange),
}

impl LockEvent {
    /// Creates an unlock event without a user identifier.
    #[must_use]
    pub const fn unlock(operator: OperatorType, timestamp: Timestamp) -> Self {
        Self::Unlock(LastUnlockRecord::new(operator, timestamp))
    }

    /// Creates a door state event.
    #[must_use]
    pub const fn door_state(state: DoorState) -> Self {
        Self::DoorState(state)
    }

    /// Creates a firmware event.
    #[must_use]
    pub fn firmware(version: FirmwareVersion) -> Self {
        Self::Firmware(version)
    }

    /// Creates a battery event.
    #[must_use]
    pub const fn battery(percentage: BatteryPercentage) -> Self {
        Self::Battery(percentage)
    }

    /// Creates an LED level change.
    #[must_use]
    pub const fn led(level: SettingLevel) -> Self {
        Self::SettingChanged(SettingChange::Led(level))
    }

    /// Creates a sound volume change.
    #[must_use]
    pub const fn volume(level: SettingLevel) -> Self {
        Self::SettingChanged(SettingChange::Volume(level))
    }

    /// Creates an auto relock change.
    #[must_use]
    pub const fn auto_relock(seconds: AutoRelockSeconds) -> Self {
        Self::SettingChanged(SettingChange::AutoRelock(seconds))
    }
}

impl From<SettingChange> for LockEvent {
    fn from(change: SettingChange) -> Self {
        Self::SettingChanged(change)
    }
}
