// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute decoding.
//!
//! Maps `(cluster, attribute, raw value)` triples to typed domain values.
//! Decoding never fails: unknown codes degrade to `Unknown` or to the nearest
//! valid level, and only attributes that are not modelled at all (or whose
//! value has the wrong type) produce `None`.

use crate::cluster::{basic_attrs, door_lock_attrs, id, ota_attrs, power_attrs};
use crate::codec::profile::LockProfile;
use crate::types::{
    AutoRelockSeconds, BatteryPercentage, DoorState, FirmwareVersion, OperatorType, RawValue,
    SettingLevel,
};

/// OTA file version reported before any image has been identified.
const OTA_FILE_VERSION_UNSET: i64 = 0xFFFF_FFFF;

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedAttribute {
    /// Source of the last lock operation.
    Operator(OperatorType),
    /// Door open/closed state.
    DoorState(DoorState),
    /// LED brightness level.
    Led(SettingLevel),
    /// Sound volume level.
    Volume(SettingLevel),
    /// Auto relock delay.
    AutoRelock(AutoRelockSeconds),
    /// Firmware version.
    Firmware(FirmwareVersion),
    /// Remaining battery charge.
    Battery(BatteryPercentage),
}

/// Decodes one attribute report.
///
/// Returns `None` for attributes this crate does not model and for values of
/// the wrong type.
///
/// # Examples
///
/// ```
/// use nimly_lib::cluster::{door_lock_attrs, id};
/// use nimly_lib::codec::{DecodedAttribute, LockProfile, decode_attribute};
/// use nimly_lib::types::{OperatorType, RawValue};
///
/// let decoded = decode_attribute(
///     &LockProfile::default(),
///     id::DOOR_LOCK,
///     door_lock_attrs::LAST_OPERATOR,
///     &RawValue::Int(2),
/// );
/// assert_eq!(decoded, Some(DecodedAttribute::Operator(OperatorType::Manual)));
/// ```
#[must_use]
pub fn decode_attribute(
    profile: &LockProfile,
    cluster: u16,
    attribute: u16,
    raw: &RawValue,
) -> Option<DecodedAttribute> {
    match (cluster, attribute) {
        (id::DOOR_LOCK, door_lock_attrs::LAST_OPERATOR) => {
            Some(DecodedAttribute::Operator(decode_operator(profile, raw)))
        }
        (id::DOOR_LOCK, door_lock_attrs::DOOR_STATE) => {
            Some(DecodedAttribute::DoorState(decode_door_state(profile, raw)))
        }
        (id::DOOR_LOCK, door_lock_attrs::LED_SETTINGS) => {
            decode_led(profile, raw).map(DecodedAttribute::Led)
        }
        (id::DOOR_LOCK, door_lock_attrs::SOUND_VOLUME) => {
            decode_volume(profile, raw).map(DecodedAttribute::Volume)
        }
        (id::DOOR_LOCK, door_lock_attrs::AUTO_RELOCK_TIME) => {
            decode_auto_relock(raw).map(DecodedAttribute::AutoRelock)
        }
        (id::POWER_CONFIG, power_attrs::BATTERY_PERCENTAGE_REMAINING) => {
            decode_battery(raw).map(DecodedAttribute::Battery)
        }
        (id::OTA_UPGRADE, ota_attrs::CURRENT_FILE_VERSION)
        | (id::BASIC, basic_attrs::SW_BUILD_ID) => {
            decode_firmware(raw).map(DecodedAttribute::Firmware)
        }
        _ => None,
    }
}

/// Decodes an operator source. Non-integer values are [`OperatorType::Unknown`].
#[must_use]
pub fn decode_operator(profile: &LockProfile, raw: &RawValue) -> OperatorType {
    raw.as_int()
        .map_or(OperatorType::Unknown, |code| profile.operator(code))
}

/// Decodes a door state. Non-integer values are [`DoorState::Unknown`].
#[must_use]
pub fn decode_door_state(profile: &LockProfile, raw: &RawValue) -> DoorState {
    raw.as_int()
        .map_or(DoorState::Unknown, |code| profile.door_state(code))
}

/// Decodes an LED level, clamping out-of-table codes to the nearest level.
#[must_use]
pub fn decode_led(profile: &LockProfile, raw: &RawValue) -> Option<SettingLevel> {
    integer(raw, "led_settings").map(|code| profile.led_levels().decode_nearest(code))
}

/// Decodes a sound volume level, clamping out-of-table codes to the nearest
/// level.
#[must_use]
pub fn decode_volume(profile: &LockProfile, raw: &RawValue) -> Option<SettingLevel> {
    integer(raw, "sound_volume").map(|code| profile.volume_levels().decode_nearest(code))
}

/// Decodes an auto relock delay, clamping into the valid range.
///
/// Unlike [`encode_auto_relock`](crate::codec::encode_auto_relock), decoding
/// clamps: the device has already applied whatever value it reports.
#[must_use]
pub fn decode_auto_relock(raw: &RawValue) -> Option<AutoRelockSeconds> {
    integer(raw, "auto_relock_time").map(AutoRelockSeconds::clamped)
}

/// Decodes a battery report in half-percent units.
#[must_use]
pub fn decode_battery(raw: &RawValue) -> Option<BatteryPercentage> {
    integer(raw, "battery_percentage_remaining").and_then(BatteryPercentage::from_half_percent)
}

/// Decodes a firmware version from either an OTA file version or a build id
/// string.
#[must_use]
pub fn decode_firmware(raw: &RawValue) -> Option<FirmwareVersion> {
    match raw {
        RawValue::Int(OTA_FILE_VERSION_UNSET) => None,
        RawValue::Int(version) => match u32::try_from(*version) {
            Ok(version) => Some(FirmwareVersion::from_file_version(version)),
            Err(_) => {
                tracing::debug!(version, "firmware file version outside u32 range");
                None
            }
        },
        RawValue::Text(text) if !text.trim().is_empty() => Some(FirmwareVersion::from_text(text)),
        RawValue::Text(_) => None,
        RawValue::Bool(_) => {
            tracing::debug!(kind = raw.kind(), "unexpected firmware value type");
            None
        }
    }
}

fn integer(raw: &RawValue, field: &'static str) -> Option<i64> {
    let value = raw.as_int();
    if value.is_none() {
        tracing::debug!(field, kind = raw.kind(), "expected an integer attribute value");
    }
    value
}
