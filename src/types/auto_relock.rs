// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Auto relock timer type.

use std::fmt;

use crate::error::ValueError;

/// Auto relock delay in seconds (0-3600, 0 disables relocking).
///
/// Construction through [`AutoRelockSeconds::new`] rejects values outside the
/// range. Silently clamping a relock timer would change a safety setting the
/// user did not ask for, so only the decoder (which must never fail on a
/// device report) uses [`AutoRelockSeconds::clamped`].
///
/// # Examples
///
/// ```
/// use nimly_lib::types::AutoRelockSeconds;
///
/// let relock = AutoRelockSeconds::new(30).unwrap();
/// assert_eq!(relock.seconds(), 30);
/// assert!(!relock.is_disabled());
///
/// assert!(AutoRelockSeconds::new(-1).is_err());
/// assert!(AutoRelockSeconds::new(3601).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u16")]
pub struct AutoRelockSeconds(u16);

impl AutoRelockSeconds {
    /// Minimum value (relock disabled).
    pub const MIN: u16 = 0;

    /// Maximum value (one hour).
    pub const MAX: u16 = 3600;

    /// Relocking disabled.
    pub const DISABLED: Self = Self(0);

    /// Delay used by the lock out of the box.
    pub const DEFAULT: Self = Self(30);

    /// Creates a relock delay.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `seconds` is outside [0, 3600].
    pub fn new(seconds: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&seconds) {
            return Err(ValueError::OutOfRange {
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
                actual: seconds,
            });
        }
        // Safe: range checked above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seconds = seconds as u16;
        Ok(Self(seconds))
    }

    /// Creates a relock delay, clamping into [0, 3600].
    #[must_use]
    pub fn clamped(seconds: i64) -> Self {
        let clamped = seconds.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // Safe: clamped into u16 range
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seconds = clamped as u16;
        Self(seconds)
    }

    /// Returns the delay in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u16 {
        self.0
    }

    /// Returns `true` if relocking is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.0 == 0
    }
}

impl Default for AutoRelockSeconds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AutoRelockSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl TryFrom<i64> for AutoRelockSeconds {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AutoRelockSeconds> for u16 {
    fn from(value: AutoRelockSeconds) -> Self {
        value.0
    }
}
