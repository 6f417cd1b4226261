// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notifications delivered by the host's device-proxy layer.

use crate::error::ParseError;
use crate::types::RawValue;

/// A raw notification pushed by a lock.
///
/// # JSON Format
///
/// Host bridges emit notifications as tagged JSON objects:
///
/// ```json
/// {"type": "attribute_report", "cluster": 257, "attribute": 256, "value": 2}
/// {"type": "cluster_command", "cluster": 257, "command": 32, "payload": [2, 2, 1, 0, 0, 0, 0, 0, 0]}
/// ```
///
/// # Examples
///
/// ```
/// use nimly_lib::interpreter::Notification;
/// use nimly_lib::types::RawValue;
///
/// let json = r#"{"type": "attribute_report", "cluster": 257, "attribute": 3, "value": 1}"#;
/// let notification = Notification::from_json(json).unwrap();
///
/// assert_eq!(
///     notification,
///     Notification::attribute_report(0x0101, 0x0003, RawValue::Int(1))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// An attribute report (unsolicited or polled).
    AttributeReport {
        /// Source cluster.
        cluster: u16,
        /// Reported attribute.
        attribute: u16,
        /// Reported value.
        value: RawValue,
    },

    /// A cluster-specific command sent by the lock.
    ClusterCommand {
        /// Source cluster.
        cluster: u16,
        /// Command identifier.
        command: u8,
        /// Command payload, without the ZCL header.
        #[serde(default)]
        payload: Vec<u8>,
    },
}

impl Notification {
    /// Creates an attribute report.
    #[must_use]
    pub fn attribute_report(cluster: u16, attribute: u16, value: impl Into<RawValue>) -> Self {
        Self::AttributeReport {
            cluster,
            attribute,
            value: value.into(),
        }
    }

    /// Creates a cluster command.
    #[must_use]
    pub fn cluster_command(cluster: u16, command: u8, payload: impl Into<Vec<u8>>) -> Self {
        Self::ClusterCommand {
            cluster,
            command,
            payload: payload.into(),
        }
    }

    /// Parses a notification from a host bridge's JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the JSON is malformed or does not describe
    /// a notification.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the cluster the notification came from.
    #[must_use]
    pub fn cluster(&self) -> u16 {
        match self {
            Self::AttributeReport { cluster, .. } | Self::ClusterCommand { cluster, .. } => {
                *cluster
            }
        }
    }
}
