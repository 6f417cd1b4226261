// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification of notifications into lock events.

use chrono::{DateTime, Utc};

use crate::cluster::{OperationEventCode, door_lock_commands, id};
use crate::codec::{DecodedAttribute, LockProfile, decode_attribute};
use crate::state::{LastUnlockRecord, LockEvent, SettingChange};
use crate::types::{OperatorType, RawValue, Timestamp};

use super::{Notification, OperationEventFrame};

/// Turns raw notifications into [`LockEvent`]s.
///
/// Notifications that do not map to any event (unknown clusters, vendor
/// diagnostics, lock operations, malformed frames) are dropped with a
/// debug-level trace. Nothing here returns an error.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use nimly_lib::interpreter::{EventInterpreter, Notification};
/// use nimly_lib::state::LockEvent;
/// use nimly_lib::types::{OperatorType, Timestamp};
///
/// let interpreter = EventInterpreter::default();
/// let t0 = Utc::now();
///
/// let event = interpreter.interpret(&Notification::attribute_report(0x0101, 0x0100, 2_u8), t0);
/// assert_eq!(
///     event,
///     Some(LockEvent::unlock(OperatorType::Manual, Timestamp::observed(t0)))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventInterpreter {
    profile: LockProfile,
}

impl EventInterpreter {
    /// Creates an interpreter using the given code tables.
    #[must_use]
    pub const fn new(profile: LockProfile) -> Self {
        Self { profile }
    }

    /// Returns the code tables in use.
    #[must_use]
    pub const fn profile(&self) -> &LockProfile {
        &self.profile
    }

    /// Interprets one notification received at `received_at`.
    #[must_use]
    pub fn interpret(
        &self,
        notification: &Notification,
        received_at: DateTime<Utc>,
    ) -> Option<LockEvent> {
        match notification {
            Notification::AttributeReport {
                cluster,
                attribute,
                value,
            } => self.interpret_attribute(*cluster, *attribute, value, received_at),
            Notification::ClusterCommand {
                cluster,
                command,
                payload,
            } => self.interpret_command(*cluster, *command, payload, received_at),
        }
    }

    /// Interprets an attribute report.
    #[must_use]
    pub fn interpret_attribute(
        &self,
        cluster: u16,
        attribute: u16,
        value: &RawValue,
        received_at: DateTime<Utc>,
    ) -> Option<LockEvent> {
        let Some(decoded) = decode_attribute(&self.profile, cluster, attribute, value) else {
            tracing::debug!(
                cluster = format_args!("{cluster:#06x}"),
                attribute = format_args!("{attribute:#06x}"),
                %value,
                "dropping unmodelled attribute report"
            );
            return None;
        };

        let event = match decoded {
            DecodedAttribute::Operator(operator) => {
                LockEvent::unlock(operator, Timestamp::observed(received_at))
            }
            DecodedAttribute::DoorState(state) => LockEvent::DoorState(state),
            DecodedAttribute::Led(level) => SettingChange::Led(level).into(),
            DecodedAttribute::Volume(level) => SettingChange::Volume(level).into(),
            DecodedAttribute::AutoRelock(seconds) => SettingChange::AutoRelock(seconds).into(),
            DecodedAttribute::Firmware(version) => LockEvent::Firmware(version),
            DecodedAttribute::Battery(percentage) => LockEvent::Battery(percentage),
        };
        Some(event)
    }

    /// Interprets a cluster-specific command.
    #[must_use]
    pub fn interpret_command(
        &self,
        cluster: u16,
        command: u8,
        payload: &[u8],
        received_at: DateTime<Utc>,
    ) -> Option<LockEvent> {
        if (cluster, command) != (id::DOOR_LOCK, door_lock_commands::OPERATION_EVENT_NOTIFICATION)
        {
            tracing::debug!(
                cluster = format_args!("{cluster:#06x}"),
                command = format_args!("{command:#04x}"),
                len = payload.len(),
                "dropping unrecognized cluster command"
            );
            return None;
        }

        let frame = match OperationEventFrame::parse(payload) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed operation event");
                return None;
            }
        };

        let Some(code) = OperationEventCode::from_raw(frame.event_code) else {
            tracing::debug!(
                code = format_args!("{:#04x}", frame.event_code),
                "dropping unknown operation event code"
            );
            return None;
        };

        if !code.is_unlock() {
            tracing::debug!(?code, source = frame.source, "operation event is not an unlock");
            return None;
        }

        let operator = match code {
            OperationEventCode::KeyUnlock | OperationEventCode::ManualUnlock => {
                OperatorType::Manual
            }
            OperationEventCode::ScheduleUnlock => OperatorType::Schedule,
            _ => self.profile.operator(i64::from(frame.source)),
        };
        let timestamp = Timestamp::from_zigbee_or_observed(Some(frame.local_time), received_at);

        let mut record = LastUnlockRecord::new(operator, timestamp).with_received_at(received_at);
        if let Some(user_id) = frame.user_id() {
            record = record.with_raw_code(user_id);
        }
        Some(LockEvent::Unlock(record))
    }
}
