// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host's attribute write primitive.

use std::sync::Arc;

use crate::codec::AttributeWrite;
use crate::error::WriteError;
use crate::event::DeviceId;

/// Sends attribute writes to a lock through the host's Zigbee stack.
///
/// Implementations report failure but never retry; retry policy belongs to
/// the transport.
///
/// # Examples
///
/// ```
/// use nimly_lib::codec::AttributeWrite;
/// use nimly_lib::error::WriteError;
/// use nimly_lib::event::DeviceId;
/// use nimly_lib::manager::AttributeWriter;
///
/// struct Offline;
///
/// impl AttributeWriter for Offline {
///     async fn write_attribute(
///         &self,
///         _device_id: DeviceId,
///         _write: &AttributeWrite,
///     ) -> Result<(), WriteError> {
///         Err(WriteError::Offline)
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait AttributeWriter {
    /// Writes one attribute and waits for the device's answer.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` if the device rejected the write or could not be
    /// reached.
    async fn write_attribute(
        &self,
        device_id: DeviceId,
        write: &AttributeWrite,
    ) -> Result<(), WriteError>;
}

impl<W: AttributeWriter> AttributeWriter for Arc<W> {
    async fn write_attribute(
        &self,
        device_id: DeviceId,
        write: &AttributeWrite,
    ) -> Result<(), WriteError> {
        W::write_attribute(self, device_id, write).await
    }
}

/// Writer that accepts every write without sending anything.
///
/// Useful for read-only integrations and documentation examples.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWriter;

impl AttributeWriter for NullWriter {
    async fn write_attribute(
        &self,
        device_id: DeviceId,
        write: &AttributeWrite,
    ) -> Result<(), WriteError> {
        tracing::trace!(
            %device_id,
            cluster = write.cluster,
            attribute = write.attribute,
            value = %write.value,
            "discarding attribute write"
        );
        Ok(())
    }
}
