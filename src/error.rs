// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `nimly_lib` library.
//!
//! Only two kinds of failure ever reach a caller: a setting value that does
//! not fit the device's range ([`ValueError`]) and a write that the device
//! or transport did not accept ([`WriteError`]). Undecodable attribute values
//! and unknown notifications are absorbed by the decoder and interpreter.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed validation before anything was sent.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A notification or frame could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The host's write primitive reported a failure.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// Device was not found in the manager.
    #[error("device not found")]
    DeviceNotFound,

    /// Device is currently marked unavailable by the host.
    #[error("device is unavailable")]
    DeviceUnavailable,
}

/// Errors related to value validation and constraints.
///
/// `OutOfRange` is the range rejection for outgoing settings: the value is
/// reported back to the user instead of being clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// An unknown setting level label was provided.
    #[error("invalid setting level: {0}")]
    InvalidLevel(String),

    /// An IEEE address string could not be parsed.
    #[error("invalid IEEE address: {0}")]
    InvalidIeeeAddress(String),

    /// A code table maps two entries onto the same raw code or value.
    #[error("code table has a duplicate entry for raw code {0}")]
    DuplicateCode(i64),
}

/// Errors raised while parsing notifications and command frames.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A frame ended before a field could be read.
    #[error("frame truncated: needed {needed} bytes at offset {offset}, have {len}")]
    Truncated {
        /// Offset of the field being read.
        offset: usize,
        /// Number of bytes the field needs.
        needed: usize,
        /// Total frame length.
        len: usize,
    },

    /// A raw value had the wrong type for its attribute.
    #[error("unexpected value type for {field}: {message}")]
    UnexpectedType {
        /// The attribute that failed to parse.
        field: String,
        /// Description of the mismatch.
        message: String,
    },
}

/// Failures reported by the host's attribute write primitive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The device answered with a failure status.
    #[error("write rejected by device: {0}")]
    Rejected(String),

    /// No answer arrived in time.
    #[error("write timed out after {0} ms")]
    Timeout(u64),

    /// The device is not reachable.
    #[error("device is offline")]
    Offline,

    /// Any other transport failure.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 3600,
            actual: 3601,
        };
        assert_eq!(err.to_string(), "value 3601 is out of range [0, 3600]");
    }

    #[test]
    fn negative_value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 3600,
            actual: -1,
        };
        assert_eq!(err.to_string(), "value -1 is out of range [0, 3600]");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidLevel("loud".to_string()).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidLevel(_))));
    }

    #[test]
    fn error_from_write_error() {
        let err: Error = WriteError::Offline.into();
        assert_eq!(err.to_string(), "write error: device is offline");
    }

    #[test]
    fn truncated_display() {
        let err = ParseError::Truncated {
            offset: 4,
            needed: 2,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "frame truncated: needed 2 bytes at offset 4, have 5"
        );
    }
}
