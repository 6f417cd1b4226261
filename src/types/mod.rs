// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domain value types for the Nimly Touch Pro.
//!
//! Range-limited types check their bounds at construction time, so a value
//! that exists is always one the lock accepts.
//!
//! # Types
//!
//! - [`OperatorType`] - Source of the last unlock (keypad, manual, ...)
//! - [`DoorState`] - Door open/closed, independent of the bolt
//! - [`SettingLevel`] - Off/Low/Medium/High for LED and volume
//! - [`AutoRelockSeconds`] - Relock delay (0-3600 s, 0 disables)
//! - [`FirmwareVersion`] - Device-reported firmware string
//! - [`BatteryPercentage`] - Remaining charge (0-100%)
//! - [`RawValue`] - Undecoded attribute value
//! - [`Timestamp`] - Event instant tagged with its [`TimeSource`]
//! - [`IeeeAddress`] - Zigbee EUI-64 address

mod auto_relock;
mod battery;
mod door_state;
mod firmware;
mod ieee;
mod operator;
mod raw_value;
mod setting;
mod timestamp;

pub use auto_relock::AutoRelockSeconds;
pub use battery::BatteryPercentage;
pub use door_state::DoorState;
pub use firmware::FirmwareVersion;
pub use ieee::IeeeAddress;
pub use operator::OperatorType;
pub use raw_value::RawValue;
pub use setting::{SettingAxis, SettingLevel};
pub use timestamp::{TimeSource, Timestamp, zigbee_time_to_utc};
