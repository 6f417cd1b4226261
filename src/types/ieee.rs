// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IEEE (EUI-64) address of a Zigbee device.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// 64-bit IEEE address identifying a paired lock.
///
/// Parses both the colon-separated form hosts display
/// (`00:0d:6f:ff:fe:12:34:56`) and the hexadecimal form
/// (`0x000d6ffffe123456`). Always displayed colon-separated in lower case.
///
/// # Examples
///
/// ```
/// use nimly_lib::types::IeeeAddress;
///
/// let a: IeeeAddress = "00:0D:6F:FF:FE:12:34:56".parse().unwrap();
/// let b: IeeeAddress = "0x000d6ffffe123456".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "00:0d:6f:ff:fe:12:34:56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IeeeAddress(u64);

impl IeeeAddress {
    /// Creates an address from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IeeeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0.to_be_bytes();
        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for IeeeAddress {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::InvalidIeeeAddress(s.to_string());
        let trimmed = s.trim();

        let hex: String = if let Some(stripped) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            stripped.to_string()
        } else {
            let parts: Vec<&str> = trimmed.split(':').collect();
            if parts.len() != 8 || parts.iter().any(|p| p.len() != 2) {
                return Err(invalid());
            }
            parts.concat()
        };

        if hex.len() != 16 {
            return Err(invalid());
        }
        u64::from_str_radix(&hex, 16).map(Self).map_err(|_| invalid())
    }
}

impl TryFrom<String> for IeeeAddress {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IeeeAddress> for String {
    fn from(value: IeeeAddress) -> Self {
        value.to_string()
    }
}
