// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door lock command frame parsing.

use crate::error::ParseError;

/// ZCL string length marking an invalid (absent) string.
const STRING_INVALID: u8 = 0xFF;

/// User id reported when no user is associated with the operation.
const USER_ID_NONE: u16 = 0xFFFF;

/// Payload of an Operation Event Notification (door lock command `0x20`).
///
/// # Examples
///
/// ```
/// use nimly_lib::interpreter::OperationEventFrame;
///
/// // keypad (0), unlock (0x02), user 3, PIN "12", local time 60 s
/// let payload = [0x00, 0x02, 0x03, 0x00, 0x02, b'1', b'2', 0x3C, 0, 0, 0];
/// let frame = OperationEventFrame::parse(&payload).unwrap();
///
/// assert_eq!(frame.source, 0);
/// assert_eq!(frame.event_code, 0x02);
/// assert_eq!(frame.user_id(), Some(3));
/// assert_eq!(frame.local_time, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEventFrame {
    /// Operation event source code.
    pub source: u8,
    /// Operation event code.
    pub event_code: u8,
    /// Raw user id.
    pub user_id: u16,
    /// PIN as sent by the lock (often empty).
    pub pin: Vec<u8>,
    /// Zigbee local time, seconds since 2000-01-01 UTC.
    pub local_time: u32,
    /// Trailing data string, if present.
    pub data: Option<String>,
}

impl OperationEventFrame {
    /// Parses a frame payload (without the ZCL header).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Truncated` if the payload ends inside a field.
    pub fn parse(payload: &[u8]) -> Result<Self, ParseError> {
        let mut reader = FrameReader::new(payload);

        let source = reader.u8()?;
        let event_code = reader.u8()?;
        let user_id = reader.u16_le()?;
        let pin = reader.octet_string()?.to_vec();
        let local_time = reader.u32_le()?;
        let data = if reader.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(reader.octet_string()?).into_owned())
        };

        Ok(Self {
            source,
            event_code,
            user_id,
            pin,
            local_time,
            data,
        })
    }

    /// Returns the user id, or `None` if the lock reported no user.
    #[must_use]
    pub fn user_id(&self) -> Option<u16> {
        (self.user_id != USER_ID_NONE).then_some(self.user_id)
    }
}

/// Little-endian cursor over a frame payload.
struct FrameReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> FrameReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn is_empty(&self) -> bool {
        self.offset >= self.buf.len()
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ParseError> {
        let end = self.offset + needed;
        let bytes = self.buf.get(self.offset..end).ok_or(ParseError::Truncated {
            offset: self.offset,
            needed,
            len: self.buf.len(),
        })?;
        self.offset = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16_le(&mut self) -> Result<u16, ParseError> {
        self.array().map(u16::from_le_bytes)
    }

    fn u32_le(&mut self) -> Result<u32, ParseError> {
        self.array().map(u32::from_le_bytes)
    }

    /// Reads a length-prefixed ZCL octet/character string.
    fn octet_string(&mut self) -> Result<&'a [u8], ParseError> {
        match self.u8()? {
            STRING_INVALID => Ok(&[]),
            len => self.take(usize::from(len)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_data() {
        let payload = [0x02, 0x0E, 0xFF, 0xFF, 0x00, 0x10, 0x00, 0x00, 0x00];
        let frame = OperationEventFrame::parse(&payload).unwrap();
        assert_eq!(frame.source, 0x02);
        assert_eq!(frame.event_code, 0x0E);
        assert_eq!(frame.user_id(), None);
        assert!(frame.pin.is_empty());
        assert_eq!(frame.local_time, 0x10);
        assert_eq!(frame.data, None);
    }

    #[test]
    fn parse_with_data() {
        let payload = [
            0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, b'a', b'b', b'c',
        ];
        let frame = OperationEventFrame::parse(&payload).unwrap();
        assert_eq!(frame.user_id(), Some(1));
        assert_eq!(frame.data.as_deref(), Some("abc"));
    }

    #[test]
    fn invalid_pin_string_is_empty() {
        let payload = [0x00, 0x02, 0x01, 0x00, 0xFF, 0x00, 0x00, 0x00, 0x00];
        let frame = OperationEventFrame::parse(&payload).unwrap();
        assert!(frame.pin.is_empty());
        assert_eq!(frame.local_time, 0);
    }

    #[test]
    fn truncated_header() {
        let err = OperationEventFrame::parse(&[0x00, 0x02, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Truncated {
                offset: 2,
                needed: 2,
                len: 3
            }
        ));
    }

    #[test]
    fn truncated_pin() {
        let err = OperationEventFrame::parse(&[0x00, 0x02, 0x01, 0x00, 0x04, b'1']).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Truncated {
                offset: 5,
                needed: 4,
                ..
            }
        ));
    }

    #[test]
    fn truncated_local_time() {
        let err = OperationEventFrame::parse(&[0x00, 0x02, 0x01, 0x00, 0x00, 0x01]).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { needed: 4, .. }));
    }

    #[test]
    fn empty_payload() {
        assert!(matches!(
            OperationEventFrame::parse(&[]),
            Err(ParseError::Truncated { offset: 0, .. })
        ));
    }
}
