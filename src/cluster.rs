// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zigbee Cluster Library identifiers used by the Nimly Touch Pro.
//!
//! Only the clusters, attributes and commands the translation layer reads or
//! writes are listed here. Identifiers are plain `u16`/`u8` constants so they
//! can be matched directly against what the host hands over.

/// Cluster identifiers.
pub mod id {
    /// Basic cluster (manufacturer, model, software build).
    pub const BASIC: u16 = 0x0000;
    /// Power configuration cluster (battery).
    pub const POWER_CONFIG: u16 = 0x0001;
    /// OTA upgrade cluster (firmware file version).
    pub const OTA_UPGRADE: u16 = 0x0019;
    /// Door lock cluster.
    pub const DOOR_LOCK: u16 = 0x0101;
    /// Vendor specific cluster exposed by the lock.
    pub const MANUFACTURER_SPECIFIC: u16 = 0xFEA2;
}

/// Door lock cluster attributes.
pub mod door_lock_attrs {
    /// Lock mechanism state (handled by the generic lock entity).
    pub const LOCK_STATE: u16 = 0x0000;
    /// Door state (open/closed).
    pub const DOOR_STATE: u16 = 0x0003;
    /// LED settings level.
    pub const LED_SETTINGS: u16 = 0x0022;
    /// Auto relock time in seconds.
    pub const AUTO_RELOCK_TIME: u16 = 0x0023;
    /// Sound volume level.
    pub const SOUND_VOLUME: u16 = 0x0024;
    /// Inside status LED toggle.
    pub const ENABLE_INSIDE_STATUS_LED: u16 = 0x002A;
    /// Keypad operation event mask.
    pub const KEYPAD_OPERATION_EVENT_MASK: u16 = 0x0041;
    /// RF operation event mask.
    pub const RF_OPERATION_EVENT_MASK: u16 = 0x0042;
    /// Manual operation event mask.
    pub const MANUAL_OPERATION_EVENT_MASK: u16 = 0x0043;
    /// Source of the last lock operation (vendor range).
    pub const LAST_OPERATOR: u16 = 0x0100;
}

/// Power configuration cluster attributes.
pub mod power_attrs {
    /// Battery percentage remaining, in half percent units.
    pub const BATTERY_PERCENTAGE_REMAINING: u16 = 0x0021;
}

/// OTA upgrade cluster attributes.
pub mod ota_attrs {
    /// Currently running firmware file version.
    pub const CURRENT_FILE_VERSION: u16 = 0x0002;
}

/// Basic cluster attributes.
pub mod basic_attrs {
    /// Software build identifier string.
    pub const SW_BUILD_ID: u16 = 0x4000;
}

/// Door lock cluster server-to-client commands.
pub mod door_lock_commands {
    /// Operation event notification (lock/unlock activity).
    pub const OPERATION_EVENT_NOTIFICATION: u8 = 0x20;
    /// Programming event notification (PIN/user changes).
    pub const PROGRAMMING_EVENT_NOTIFICATION: u8 = 0x21;
}

/// Operation event codes carried by an operation event notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperationEventCode {
    /// Unknown or manufacturer specific.
    UnknownOrManufacturerSpecific = 0x00,
    /// Lock.
    Lock = 0x01,
    /// Unlock.
    Unlock = 0x02,
    /// Lock failed, invalid PIN or ID.
    LockFailureInvalidPin = 0x03,
    /// Lock failed, invalid schedule.
    LockFailureInvalidSchedule = 0x04,
    /// Unlock failed, invalid PIN or ID.
    UnlockFailureInvalidPin = 0x05,
    /// Unlock failed, invalid schedule.
    UnlockFailureInvalidSchedule = 0x06,
    /// One touch lock.
    OneTouchLock = 0x07,
    /// Key lock.
    KeyLock = 0x08,
    /// Key unlock.
    KeyUnlock = 0x09,
    /// Auto lock.
    AutoLock = 0x0A,
    /// Schedule lock.
    ScheduleLock = 0x0B,
    /// Schedule unlock.
    ScheduleUnlock = 0x0C,
    /// Manual lock (key or thumbturn).
    ManualLock = 0x0D,
    /// Manual unlock (key or thumbturn).
    ManualUnlock = 0x0E,
}

impl OperationEventCode {
    /// Decodes a raw event code, returning `None` for codes outside the table.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0x00 => Self::UnknownOrManufacturerSpecific,
            0x01 => Self::Lock,
            0x02 => Self::Unlock,
            0x03 => Self::LockFailureInvalidPin,
            0x04 => Self::LockFailureInvalidSchedule,
            0x05 => Self::UnlockFailureInvalidPin,
            0x06 => Self::UnlockFailureInvalidSchedule,
            0x07 => Self::OneTouchLock,
            0x08 => Self::KeyLock,
            0x09 => Self::KeyUnlock,
            0x0A => Self::AutoLock,
            0x0B => Self::ScheduleLock,
            0x0C => Self::ScheduleUnlock,
            0x0D => Self::ManualLock,
            0x0E => Self::ManualUnlock,
            _ => return None,
        })
    }

    /// Returns `true` if the event left the door unlocked.
    #[must_use]
    pub const fn is_unlock(self) -> bool {
        matches!(
            self,
            Self::Unlock | Self::KeyUnlock | Self::ScheduleUnlock | Self::ManualUnlock
        )
    }
}
