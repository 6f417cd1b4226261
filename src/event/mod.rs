// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notification for host adapters.
//!
//! The [`EventBus`] broadcasts [`DeviceEvent`]s over a tokio broadcast
//! channel so several entity platforms can follow the same locks.
//!
//! # Examples
//!
//! ```
//! use nimly_lib::event::{DeviceEvent, DeviceId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::availability_changed(DeviceId::new(), true));
//! assert!(rx.try_recv().unwrap().is_availability());
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;
