// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware version reported by the lock.

use std::fmt;

/// Firmware version string, read-only and device-reported.
///
/// The OTA cluster reports the running image as a 32-bit file version; it is
/// rendered as `major.minor.patch.build`, one byte each, most significant
/// first. Text versions (from the basic cluster's software build id) are kept
/// as reported.
///
/// # Examples
///
/// ```
/// use nimly_lib::types::FirmwareVersion;
///
/// let fw = FirmwareVersion::from_file_version(0x0102_0304);
/// assert_eq!(fw.as_str(), "1.2.3.4");
///
/// let fw = FirmwareVersion::from_text("  2.1.0b  ");
/// assert_eq!(fw.as_str(), "2.1.0b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FirmwareVersion(String);

impl FirmwareVersion {
    /// Renders a 32-bit OTA file version.
    #[must_use]
    pub fn from_file_version(version: u32) -> Self {
        let [major, minor, patch, build] = version.to_be_bytes();
        Self(format!("{major}.{minor}.{patch}.{build}"))
    }

    /// Wraps a textual version, trimming surrounding whitespace.
    #[must_use]
    pub fn from_text(version: &str) -> Self {
        Self(version.trim().to_string())
    }

    /// Returns the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
