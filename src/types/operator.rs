// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operator type: who or what performed the last unlock.

use std::fmt;

/// Classified source of an unlock action.
///
/// The set is closed: raw codes the decoder does not recognise become
/// [`OperatorType::Unknown`] instead of an error.
///
/// # Examples
///
/// ```
/// use nimly_lib::types::OperatorType;
///
/// assert_eq!(OperatorType::Keypad.as_str(), "keypad");
/// assert_eq!(OperatorType::HomeAssistant.event_type(), "rf_unlock");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    /// Unlocked over Zigbee by the home-automation platform.
    HomeAssistant,
    /// Unlocked with a PIN on the keypad.
    Keypad,
    /// Unlocked by hand (key or thumbturn).
    Manual,
    /// Unlocked by a stored schedule.
    Schedule,
    /// Source could not be determined.
    #[default]
    Unknown,
}

impl OperatorType {
    /// All operator types, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::HomeAssistant,
        Self::Keypad,
        Self::Manual,
        Self::Schedule,
        Self::Unknown,
    ];

    /// Returns the snake-case identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HomeAssistant => "home_assistant",
            Self::Keypad => "keypad",
            Self::Manual => "manual",
            Self::Schedule => "schedule",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the human readable "last user" label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HomeAssistant => "Home Assistant",
            Self::Keypad => "Keypad",
            Self::Manual => "Manual",
            Self::Schedule => "Schedule",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the event type label attached to lock entity attributes.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::HomeAssistant => "rf_unlock",
            Self::Keypad => "keypad_unlock",
            Self::Manual => "manual_unlock",
            Self::Schedule => "schedule_unlock",
            Self::Unknown => "unknown_unlock",
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
