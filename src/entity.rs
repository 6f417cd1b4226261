// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity descriptors for the host's entity layer.
//!
//! A Nimly lock is exposed as one lock entity plus six auxiliary entities.
//! This module names them, builds their stable unique ids and renders their
//! state from a [`DeviceSnapshot`].

use crate::state::{DeviceSnapshot, LockEvent, SettingChange};
use crate::types::{IeeeAddress, SettingLevel};

/// The entities registered for each lock.
///
/// # Examples
///
/// ```
/// use nimly_lib::entity::EntityKind;
/// use nimly_lib::types::IeeeAddress;
///
/// let ieee: IeeeAddress = "00:0d:6f:ff:fe:12:34:56".parse().unwrap();
///
/// assert_eq!(
///     EntityKind::DoorState.unique_id(ieee, 11),
///     "00:0d:6f:ff:fe:12:34:56_11_door_state"
/// );
/// assert_eq!(EntityKind::DoorState.entity_name("Front Door"), "Front Door Door State");
/// assert_eq!(EntityKind::Lock.entity_name("Front Door"), "Front Door");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// The lock itself.
    Lock,
    /// Door open/closed binary sensor.
    DoorState,
    /// Firmware version sensor.
    Firmware,
    /// Last unlock source sensor.
    LastUser,
    /// LED brightness select.
    LedSettings,
    /// Sound volume select.
    SoundVolume,
    /// Auto relock time number.
    AutoRelock,
}

impl EntityKind {
    /// All entities, in registration order.
    pub const ALL: [Self; 7] = [
        Self::Lock,
        Self::DoorState,
        Self::Firmware,
        Self::LastUser,
        Self::LedSettings,
        Self::SoundVolume,
        Self::AutoRelock,
    ];

    /// Returns the suffix appended to the device name, if any.
    #[must_use]
    pub const fn name_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Lock => None,
            Self::DoorState => Some("Door State"),
            Self::Firmware => Some("Firmware Version"),
            Self::LastUser => Some("Last User"),
            Self::LedSettings => Some("LED Settings"),
            Self::SoundVolume => Some("Sound Volume"),
            Self::AutoRelock => Some("Auto Relock Time"),
        }
    }

    /// Returns the suffix of the entity's unique id.
    #[must_use]
    pub const fn unique_id_suffix(&self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::DoorState => "door_state",
            Self::Firmware => "firmware",
            Self::LastUser => "last_user",
            Self::LedSettings => "led_settings",
            Self::SoundVolume => "sound_volume",
            Self::AutoRelock => "auto_relock",
        }
    }

    /// Builds the unique id `{ieee}_{endpoint}_{suffix}`.
    #[must_use]
    pub fn unique_id(&self, ieee: IeeeAddress, endpoint: u8) -> String {
        format!("{ieee}_{endpoint}_{}", self.unique_id_suffix())
    }

    /// Builds the entity name from the device name.
    #[must_use]
    pub fn entity_name(&self, device_name: &str) -> String {
        match self.name_suffix() {
            Some(suffix) => format!("{device_name} {suffix}"),
            None => device_name.to_string(),
        }
    }

    /// Returns the select options, for select entities.
    #[must_use]
    pub fn select_options(&self) -> Option<[&'static str; 4]> {
        match self {
            Self::LedSettings | Self::SoundVolume => Some(SettingLevel::labels()),
            _ => None,
        }
    }

    /// Returns the entities whose state an event can change.
    #[must_use]
    pub fn affected_by(event: &LockEvent) -> Vec<Self> {
        match event {
            LockEvent::Unlock(_) => vec![Self::Lock, Self::LastUser],
            LockEvent::DoorState(_) => vec![Self::DoorState],
            LockEvent::Firmware(_) => vec![Self::Firmware],
            // Battery is reported by the host's generic power entity
            LockEvent::Battery(_) => Vec::new(),
            LockEvent::SettingChanged(SettingChange::Led(_)) => vec![Self::LedSettings],
            LockEvent::SettingChanged(SettingChange::Volume(_)) => vec![Self::SoundVolume],
            LockEvent::SettingChanged(SettingChange::AutoRelock(_)) => vec![Self::AutoRelock],
        }
    }

    /// Renders the entity's state from a snapshot.
    ///
    /// Returns `None` when the value has not been reported yet. The lock
    /// entity's locked state is owned by the host and is never rendered here.
    #[must_use]
    pub fn state(&self, snapshot: &DeviceSnapshot) -> Option<String> {
        match self {
            Self::Lock => None,
            Self::DoorState => snapshot
                .door_state()
                .is_open()
                .map(|open| if open { "on" } else { "off" }.to_string()),
            Self::Firmware => snapshot.firmware().map(ToString::to_string),
            Self::LastUser => Some(
                snapshot
                    .last_unlock()
                    .map_or("Unknown", |record| record.operator().label())
                    .to_string(),
            ),
            Self::LedSettings => snapshot.led_level().map(|level| level.label().to_string()),
            Self::SoundVolume => snapshot
                .volume_level()
                .map(|level| level.label().to_string()),
            Self::AutoRelock => snapshot.auto_relock().map(|s| s.seconds().to_string()),
        }
    }
}
