// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `nimly_lib` - Attribute and event translation for Nimly Touch Pro locks.
//!
//! This library turns the raw Zigbee attribute reports and cluster commands a
//! Nimly Touch Pro door lock emits into typed lock state, and turns setting
//! changes back into the attribute writes the lock expects. The Zigbee stack
//! itself belongs to the host; this crate only translates.
//!
//! # Supported Features
//!
//! - **Unlock tracking**: who unlocked the door last (keypad, app, manual,
//!   schedule) and when, with out-of-order reports ignored
//! - **Door state**: open/closed reed sensor
//! - **Settings**: LED brightness, sound volume, auto relock time
//! - **Device info**: firmware version and battery level
//!
//! # Layers
//!
//! - [`codec`]: attribute decoding and setting encoding over a configurable
//!   [`LockProfile`]
//! - [`interpreter`]: turns [`Notification`]s into [`LockEvent`]s
//! - [`state`]: the per-lock [`DeviceSnapshot`] and its merge rules
//! - [`manager`]: the [`LockManager`] tying it together for many locks
//!
//! # Quick Start
//!
//! ```
//! use nimly_lib::{DeviceConfig, LockManager, Notification, NullWriter};
//! use nimly_lib::types::DoorState;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> nimly_lib::Result<()> {
//!     let manager = LockManager::new(NullWriter);
//!     let lock = manager
//!         .add_device(DeviceConfig::parse("00:0d:6f:ff:fe:12:34:56")?.with_friendly_name("Front Door"))
//!         .await;
//!
//!     let json = r#"{"type":"attribute_report","cluster":257,"attribute":3,"value":1}"#;
//!     manager.handle_json(lock, json).await?;
//!
//!     let snapshot = manager.get_snapshot(lock).await.unwrap();
//!     assert_eq!(snapshot.door_state(), DoorState::Closed);
//!
//!     // Invalid values are rejected before anything is sent
//!     assert!(manager.set_auto_relock(lock, 7200).await.is_err());
//!     Ok(())
//! }
//! ```
//!
//! ## Callbacks
//!
//! ```
//! use nimly_lib::{LockManager, NullWriter};
//!
//! let manager = LockManager::new(NullWriter);
//!
//! manager.callbacks().on_door_state_changed(|device_id, state| {
//!     println!("{device_id}: door {state}");
//! });
//! manager.callbacks().on_setting_changed(|device_id, change| {
//!     println!("{device_id}: {} changed", change.axis());
//! });
//! ```

pub mod cluster;
pub mod codec;
pub mod entity;
pub mod error;
pub mod event;
pub mod interpreter;
pub mod manager;
pub mod state;
pub mod subscription;
pub mod types;

pub use codec::{AttributeWrite, LockProfile};
pub use entity::EntityKind;
pub use error::{Error, ParseError, Result, ValueError, WriteError};
pub use event::{DeviceEvent, DeviceId, EventBus};
pub use interpreter::{EventInterpreter, Notification};
pub use manager::{AttributeWriter, DeviceConfig, LockManager, NullWriter};
pub use state::{DeviceSnapshot, LastUnlockRecord, LockEvent, SettingChange};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use types::{
    AutoRelockSeconds, BatteryPercentage, DoorState, FirmwareVersion, IeeeAddress, OperatorType,
    RawValue, SettingLevel, Timestamp,
};
