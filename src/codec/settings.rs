// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings encoding.
//!
//! Turns user-facing setting values into the attribute writes the lock
//! expects. Level encodings read the same [`LevelTable`](super::LevelTable)
//! as the decoder, so every encoded value decodes back to its input.

use crate::cluster::{door_lock_attrs, id};
use crate::codec::profile::LockProfile;
use crate::error::ValueError;
use crate::state::SettingChange;
use crate::types::{AutoRelockSeconds, RawValue, SettingLevel};

/// One attribute write to hand to the host's write primitive.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttributeWrite {
    /// Target cluster.
    pub cluster: u16,
    /// Target attribute.
    pub attribute: u16,
    /// Raw value to write.
    pub value: RawValue,
}

impl AttributeWrite {
    /// Creates a door lock cluster write.
    #[must_use]
    pub fn door_lock(attribute: u16, value: impl Into<RawValue>) -> Self {
        Self {
            cluster: id::DOOR_LOCK,
            attribute,
            value: value.into(),
        }
    }
}

/// Encodes an LED level.
#[must_use]
pub fn encode_led(profile: &LockProfile, level: SettingLevel) -> AttributeWrite {
    AttributeWrite::door_lock(
        door_lock_attrs::LED_SETTINGS,
        profile.led_levels().encode(level),
    )
}

/// Encodes a sound volume level.
#[must_use]
pub fn encode_volume(profile: &LockProfile, level: SettingLevel) -> AttributeWrite {
    AttributeWrite::door_lock(
        door_lock_attrs::SOUND_VOLUME,
        profile.volume_levels().encode(level),
    )
}

/// Validates and encodes an auto relock delay.
///
/// Out-of-range values are rejected, never clamped.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if `seconds` is outside `[0, 3600]`.
///
/// # Examples
///
/// ```
/// use nimly_lib::codec::{decode_auto_relock, encode_auto_relock};
///
/// let write = encode_auto_relock(90).unwrap();
/// assert_eq!(decode_auto_relock(&write.value).unwrap().seconds(), 90);
///
/// assert!(encode_auto_relock(-1).is_err());
/// assert!(encode_auto_relock(3601).is_err());
/// ```
pub fn encode_auto_relock(seconds: i64) -> Result<AttributeWrite, ValueError> {
    let seconds = AutoRelockSeconds::new(seconds)?;
    Ok(encode_auto_relock_seconds(seconds))
}

/// Encodes an already validated auto relock delay.
#[must_use]
pub fn encode_auto_relock_seconds(seconds: AutoRelockSeconds) -> AttributeWrite {
    AttributeWrite::door_lock(door_lock_attrs::AUTO_RELOCK_TIME, seconds.seconds())
}

/// Encodes any setting change.
#[must_use]
pub fn encode_setting(profile: &LockProfile, change: &SettingChange) -> AttributeWrite {
    match change {
        SettingChange::Led(level) => encode_led(profile, *level),
        SettingChange::Volume(level) => encode_volume(profile, *level),
        SettingChange::AutoRelock(seconds) => encode_auto_relock_seconds(*seconds),
    }
}
