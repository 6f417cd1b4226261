// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery level type.

use std::fmt;

use crate::error::ValueError;

/// Raw value the power configuration cluster uses for "not reported".
const BATTERY_UNREPORTED: i64 = 0xFF;

/// Remaining battery charge as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use nimly_lib::types::BatteryPercentage;
///
/// // Zigbee reports battery in half percent steps
/// let battery = BatteryPercentage::from_half_percent(150).unwrap();
/// assert_eq!(battery.value(), 75);
///
/// assert!(BatteryPercentage::from_half_percent(0xFF).is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct BatteryPercentage(u8);

impl BatteryPercentage {
    /// Empty battery.
    pub const EMPTY: Self = Self(0);

    /// Full battery.
    pub const FULL: Self = Self(100);

    /// Creates a battery percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Converts a raw half-percent reading, clamping into [0, 100].
    ///
    /// Returns `None` for the "not reported" marker.
    #[must_use]
    pub fn from_half_percent(raw: i64) -> Option<Self> {
        if raw == BATTERY_UNREPORTED {
            return None;
        }
        let percent = (raw / 2).clamp(0, 100);
        // Safe: clamped to 0-100
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = percent as u8;
        Some(Self(percent))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for BatteryPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for BatteryPercentage {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatteryPercentage> for u8 {
    fn from(value: BatteryPercentage) -> Self {
        value.0
    }
}
