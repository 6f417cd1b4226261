// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interpretation of device-pushed notifications.
//!
//! [`Notification`] is what the host delivers; [`EventInterpreter`] turns it
//! into at most one [`LockEvent`](crate::state::LockEvent).

mod event_interpreter;
mod frame;
mod notification;

pub use event_interpreter::EventInterpreter;
pub use frame::OperationEventFrame;
pub use notification::Notification;
