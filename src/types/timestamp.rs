// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event timestamps that remember where their time came from.
//!
//! Most consumer locks do not echo wall-clock time, so an event is normally
//! stamped with the moment the notification was received. When the lock
//! does include its Zigbee local time, that time is kept instead. The
//! [`TimeSource`] tag keeps the two apart.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Unix time of the Zigbee epoch (2000-01-01T00:00:00Z).
const ZIGBEE_EPOCH_UNIX: i64 = 946_684_800;

/// Zigbee local time values meaning "clock not set".
const ZIGBEE_TIME_UNSET: [u32; 2] = [0, u32::MAX];

/// Where a timestamp's instant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// Receipt time of the notification.
    Observed,
    /// Time supplied by the lock's own clock.
    Device,
}

/// Instant of an event plus its [`TimeSource`].
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use nimly_lib::types::{TimeSource, Timestamp};
///
/// let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
/// let ts = Timestamp::observed(at);
/// assert_eq!(ts.source(), TimeSource::Observed);
/// assert_eq!(ts.at(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Timestamp {
    at: DateTime<Utc>,
    source: TimeSource,
}

impl Timestamp {
    /// Creates a receipt-time timestamp.
    #[must_use]
    pub const fn observed(at: DateTime<Utc>) -> Self {
        Self {
            at,
            source: TimeSource::Observed,
        }
    }

    /// Creates a device-time timestamp.
    #[must_use]
    pub const fn device(at: DateTime<Utc>) -> Self {
        Self {
            at,
            source: TimeSource::Device,
        }
    }

    /// Creates a receipt-time timestamp for the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self::observed(Utc::now())
    }

    /// Picks the device's Zigbee local time when it is set, falling back to
    /// the receipt time otherwise.
    #[must_use]
    pub fn from_zigbee_or_observed(zigbee_local_time: Option<u32>, received_at: DateTime<Utc>) -> Self {
        zigbee_local_time
            .and_then(zigbee_time_to_utc)
            .map_or_else(|| Self::observed(received_at), Self::device)
    }

    /// Returns the instant.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Returns where the instant came from.
    #[must_use]
    pub const fn source(&self) -> TimeSource {
        self.source
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.source {
            TimeSource::Observed => "observed",
            TimeSource::Device => "device",
        };
        write!(f, "{} ({tag})", self.at.to_rfc3339())
    }
}

/// Converts Zigbee local time (seconds since 2000-01-01 UTC) to UTC.
///
/// Returns `None` for the "not set" markers.
#[must_use]
pub fn zigbee_time_to_utc(seconds: u32) -> Option<DateTime<Utc>> {
    if ZIGBEE_TIME_UNSET.contains(&seconds) {
        return None;
    }
    DateTime::<Utc>::from_timestamp(ZIGBEE_EPOCH_UNIX, 0)
        .map(|epoch| epoch + Duration::seconds(i64::from(seconds)))
}
