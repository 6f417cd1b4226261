// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock manager for coordinating multiple Nimly locks.
//!
//! # Overview
//!
//! The [`LockManager`] sits between the host's Zigbee stack and its entity
//! layer:
//!
//! - **Inbound**: notifications are decoded and merged into a per-lock
//!   [`DeviceSnapshot`](crate::state::DeviceSnapshot)
//! - **Outbound**: setting changes are validated, encoded and sent through an
//!   [`AttributeWriter`] supplied by the host
//! - **Events**: snapshot changes are published on a broadcast channel, a
//!   per-lock watch channel and the [`CallbackRegistry`](crate::subscription::CallbackRegistry)
//!
//! # Examples
//!
//! ## Event Subscription
//!
//! ```no_run
//! use nimly_lib::event::DeviceEvent;
//! use nimly_lib::manager::{LockManager, NullWriter};
//!
//! # fn example() {
//! let manager = LockManager::new(NullWriter);
//! let mut events = manager.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             DeviceEvent::SnapshotChanged { device_id, event, .. } => {
//!                 println!("Lock {device_id}: {event:?}");
//!             }
//!             DeviceEvent::AvailabilityChanged { device_id, available } => {
//!                 println!("Lock {device_id} available: {available}");
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Watching a Lock
//!
//! ```no_run
//! use nimly_lib::manager::{DeviceConfig, LockManager, NullWriter};
//!
//! # async fn example() -> nimly_lib::Result<()> {
//! let manager = LockManager::new(NullWriter);
//! let device_id = manager
//!     .add_device(DeviceConfig::parse("00:0d:6f:ff:fe:12:34:56")?)
//!     .await;
//!
//! if let Some(mut snapshot_rx) = manager.watch_device(device_id).await {
//!     tokio::spawn(async move {
//!         while snapshot_rx.changed().await.is_ok() {
//!             let snapshot = snapshot_rx.borrow();
//!             println!("Door: {}", snapshot.door_state());
//!         }
//!     });
//! }
//! # Ok(())
//! # }
//! ```

mod device_config;
mod lock_manager;
mod managed_lock;
mod writer;

pub use device_config::DeviceConfig;
pub use lock_manager::LockManager;
pub use writer::{AttributeWriter, NullWriter};
