// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback subscriptions for lock state changes.
//!
//! An alternative to the [`EventBus`](crate::event::EventBus) for hosts that
//! prefer synchronous callbacks per change kind. The manager owns one
//! [`CallbackRegistry`], reachable through
//! [`LockManager::callbacks`](crate::manager::LockManager::callbacks).
//!
//! ```
//! use nimly_lib::manager::{LockManager, NullWriter};
//!
//! let manager = LockManager::new(NullWriter);
//! let sub_id = manager.callbacks().on_unlocked(|device_id, record| {
//!     println!("{device_id} unlocked by {}", record.operator());
//! });
//!
//! manager.callbacks().unsubscribe(sub_id);
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
