// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute decoding and settings encoding.
//!
//! Both directions share the code tables of a [`LockProfile`]. All functions
//! are pure.

mod decoder;
mod profile;
mod settings;
mod table;

pub use decoder::{
    DecodedAttribute, decode_attribute, decode_auto_relock, decode_battery, decode_door_state,
    decode_firmware, decode_led, decode_operator, decode_volume,
};
pub use profile::LockProfile;
pub use settings::{
    AttributeWrite, encode_auto_relock, encode_auto_relock_seconds, encode_led, encode_setting,
    encode_volume,
};
pub use table::{CodeTable, LevelTable};
