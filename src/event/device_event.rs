// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events published by the lock manager.

use crate::state::{DeviceSnapshot, LockEvent};
use crate::types::IeeeAddress;

use super::DeviceId;

/// Events emitted by the [`LockManager`](crate::manager::LockManager).
///
/// Host adapters subscribe to these to refresh their entities.
/// [`DeviceEvent::SnapshotChanged`] is only sent when a field actually
/// changed.
///
/// # Examples
///
/// ```
/// use nimly_lib::event::{DeviceEvent, DeviceId};
/// use nimly_lib::types::IeeeAddress;
///
/// let device_id = DeviceId::new();
/// let added = DeviceEvent::device_added(device_id, IeeeAddress::new(0x000d_6fff_fe12_3456));
///
/// assert!(added.is_lifecycle());
/// assert_eq!(added.device_id(), device_id);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum DeviceEvent {
    /// A lock was added to the manager.
    DeviceAdded {
        /// The ID of the added lock.
        device_id: DeviceId,
        /// The lock's IEEE address.
        ieee: IeeeAddress,
    },

    /// A lock was removed from the manager.
    DeviceRemoved {
        /// The ID of the removed lock.
        device_id: DeviceId,
    },

    /// The host reported the lock as reachable or unreachable.
    AvailabilityChanged {
        /// The ID of the lock.
        device_id: DeviceId,
        /// Whether the lock is now available.
        available: bool,
    },

    /// A lock event changed the snapshot.
    SnapshotChanged {
        /// The ID of the lock.
        device_id: DeviceId,
        /// The event that was applied.
        event: LockEvent,
        /// The snapshot after applying the event.
        snapshot: DeviceSnapshot,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::DeviceAdded { device_id, .. }
            | Self::DeviceRemoved { device_id }
            | Self::AvailabilityChanged { device_id, .. }
            | Self::SnapshotChanged { device_id, .. } => *device_id,
        }
    }

    /// Returns `true` if this is a lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if this is an availability event.
    #[must_use]
    pub fn is_availability(&self) -> bool {
        matches!(self, Self::AvailabilityChanged { .. })
    }

    /// Returns `true` if this is a snapshot change.
    #[must_use]
    pub fn is_snapshot_change(&self) -> bool {
        matches!(self, Self::SnapshotChanged { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(device_id: DeviceId, ieee: IeeeAddress) -> Self {
        Self::DeviceAdded { device_id, ieee }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(device_id: DeviceId) -> Self {
        Self::DeviceRemoved { device_id }
    }

    /// Creates an availability event.
    #[must_use]
    pub fn availability_changed(device_id: DeviceId, available: bool) -> Self {
        Self::AvailabilityChanged {
            device_id,
            available,
        }
    }

    /// Creates a snapshot changed event.
    #[must_use]
    pub fn snapshot_changed(device_id: DeviceId, event: LockEvent, snapshot: DeviceSnapshot) -> Self {
        Self::SnapshotChanged {
            device_id,
            event,
            snapshot,
        }
    }
}
