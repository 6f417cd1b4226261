// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical door state.

use std::fmt;

/// Whether the door leaf is open or closed.
///
/// This is independent of the lock mechanism: a door can be unlocked yet
/// closed, or locked while still ajar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    /// Door is open.
    Open,
    /// Door is closed.
    Closed,
    /// Door state has not been reported or could not be decoded.
    #[default]
    Unknown,
}

impl DoorState {
    /// Returns the snake-case identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the binary sensor reading (`true` when open), if known.
    #[must_use]
    pub const fn is_open(&self) -> Option<bool> {
        match self {
            Self::Open => Some(true),
            Self::Closed => Some(false),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
