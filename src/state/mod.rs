// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock state aggregation.
//!
//! A [`DeviceSnapshot`] holds the best-known state of one lock. Interpreted
//! [`LockEvent`]s are merged into it field by field.
//!
//! # Examples
//!
//! ```
//! use nimly_lib::state::{DeviceSnapshot, LockEvent};
//! use nimly_lib::types::{OperatorType, Timestamp};
//!
//! let mut snapshot = DeviceSnapshot::new();
//! snapshot.apply(&LockEvent::unlock(OperatorType::Manual, Timestamp::now()));
//!
//! assert_eq!(
//!     snapshot.last_unlock().map(|r| r.operator()),
//!     Some(OperatorType::Manual)
//! );
//! ```

mod device_snapshot;
mod lock_event;

pub use device_snapshot::DeviceSnapshot;
pub use lock_event::{LastUnlockRecord, LockEvent, SettingChange};
