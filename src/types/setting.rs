// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setting levels shared by the LED and sound volume axes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Four-step level used for both LED brightness and sound volume.
///
/// Levels are ordered from `Off` to `High`, which is what the decoder relies
/// on when it clamps an out-of-table raw value to the nearest level.
///
/// # Examples
///
/// ```
/// use nimly_lib::types::SettingLevel;
///
/// let level: SettingLevel = "Medium".parse().unwrap();
/// assert_eq!(level, SettingLevel::Medium);
/// assert_eq!(level.label(), "Medium");
/// assert!(SettingLevel::Off < SettingLevel::High);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SettingLevel {
    /// Disabled.
    Off,
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
}

impl SettingLevel {
    /// All levels, lowest first.
    pub const ALL: [Self; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    /// Returns the option label shown in select entities.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns all option labels, lowest first.
    #[must_use]
    pub fn labels() -> [&'static str; 4] {
        Self::ALL.map(|level| level.label())
    }
}

impl fmt::Display for SettingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SettingLevel {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValueError::InvalidLevel(s.to_string())),
        }
    }
}

/// A user-adjustable setting of the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingAxis {
    /// LED brightness.
    Led,
    /// Sound volume.
    Volume,
    /// Auto relock timer.
    AutoRelock,
}

impl fmt::Display for SettingAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Led => "led",
            Self::Volume => "volume",
            Self::AutoRelock => "auto_relock",
        })
    }
}
