// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw-to-domain mapping tables.
//!
//! Decoding and encoding both read the same table, so an encoded value always
//! decodes back to what was encoded.

use std::borrow::Cow;

use crate::error::ValueError;
use crate::types::SettingLevel;

/// Decode table from raw codes to a closed domain enum.
///
/// Codes missing from the table decode to `None`; callers substitute their
/// domain's "unknown" value. Built-in tables are borrowed from statics;
/// tables loaded at runtime are owned.
///
/// # Examples
///
/// ```
/// use nimly_lib::codec::CodeTable;
/// use nimly_lib::types::DoorState;
///
/// static DOOR: [(i64, DoorState); 2] = [(0, DoorState::Open), (1, DoorState::Closed)];
/// let table = CodeTable::from_static(&DOOR);
///
/// assert_eq!(table.decode(1), Some(DoorState::Closed));
/// assert_eq!(table.decode(9), None);
/// assert_eq!(table.encode(DoorState::Open), Some(0));
///
/// let loaded = CodeTable::bijective(vec![(7, DoorState::Open), (8, DoorState::Closed)]).unwrap();
/// assert_eq!(loaded.decode(8), Some(DoorState::Closed));
/// ```
#[derive(Debug, Clone)]
pub struct CodeTable<T: Clone + 'static> {
    entries: Cow<'static, [(i64, T)]>,
}

impl<T: Copy + PartialEq + 'static> CodeTable<T> {
    /// Wraps a static table without checking it.
    #[must_use]
    pub const fn from_static(entries: &'static [(i64, T)]) -> Self {
        Self {
            entries: Cow::Borrowed(entries),
        }
    }

    /// Wraps a static or owned table, rejecting duplicate raw codes or
    /// values.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DuplicateCode` naming the first duplicated code.
    pub fn bijective(entries: impl Into<Cow<'static, [(i64, T)]>>) -> Result<Self, ValueError> {
        let table = Self {
            entries: entries.into(),
        };
        if let Some(code) = table.first_duplicate() {
            return Err(ValueError::DuplicateCode(code));
        }
        Ok(table)
    }

    /// Looks up the domain value for a raw code.
    #[must_use]
    pub fn decode(&self, raw: i64) -> Option<T> {
        self.entries
            .iter()
            .find(|(code, _)| *code == raw)
            .map(|(_, value)| *value)
    }

    /// Looks up the raw code for a domain value.
    #[must_use]
    pub fn encode(&self, value: T) -> Option<i64> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(code, _)| *code)
    }

    /// Returns the table entries.
    #[must_use]
    pub fn entries(&self) -> &[(i64, T)] {
        &self.entries
    }

    /// Returns `true` if no raw code or value appears twice.
    #[must_use]
    pub fn is_bijective(&self) -> bool {
        self.first_duplicate().is_none()
    }

    fn first_duplicate(&self) -> Option<i64> {
        self.entries.iter().enumerate().find_map(|(i, (code, value))| {
            self.entries[..i]
                .iter()
                .any(|(c, v)| c == code || v == value)
                .then_some(*code)
        })
    }
}

/// Bidirectional table for [`SettingLevel`], indexed by level.
///
/// Every level has exactly one raw code, so encoding is total. Raw codes must
/// be distinct, which makes decoding the exact inverse.
///
/// # Examples
///
/// ```
/// use nimly_lib::codec::LevelTable;
/// use nimly_lib::types::SettingLevel;
///
/// let table = LevelTable::DEFAULT;
/// assert_eq!(table.encode(SettingLevel::Medium), 2);
/// assert_eq!(table.decode(2), Some(SettingLevel::Medium));
///
/// // Out-of-table codes clamp to the nearest level
/// assert_eq!(table.decode_nearest(9), SettingLevel::High);
/// assert_eq!(table.decode_nearest(-1), SettingLevel::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTable([i64; 4]);

impl LevelTable {
    /// `0 off, 1 low, 2 medium, 3 high`.
    pub const DEFAULT: Self = Self([0, 1, 2, 3]);

    /// Creates a table from the raw codes of each level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DuplicateCode` if two levels share a code.
    pub fn new(off: i64, low: i64, medium: i64, high: i64) -> Result<Self, ValueError> {
        let codes = [off, low, medium, high];
        for (i, code) in codes.iter().enumerate() {
            if codes[..i].contains(code) {
                return Err(ValueError::DuplicateCode(*code));
            }
        }
        Ok(Self(codes))
    }

    /// Returns the raw code for a level.
    #[must_use]
    pub const fn encode(&self, level: SettingLevel) -> i64 {
        self.0[level as usize]
    }

    /// Returns the level with exactly this raw code.
    #[must_use]
    pub fn decode(&self, raw: i64) -> Option<SettingLevel> {
        SettingLevel::ALL
            .into_iter()
            .find(|level| self.encode(*level) == raw)
    }

    /// Returns the level whose raw code is closest to `raw`.
    ///
    /// Ties resolve to the lower level.
    #[must_use]
    pub fn decode_nearest(&self, raw: i64) -> SettingLevel {
        if let Some(level) = self.decode(raw) {
            return level;
        }
        SettingLevel::ALL
            .into_iter()
            .min_by_key(|level| self.encode(*level).abs_diff(raw))
            .unwrap_or(SettingLevel::Off)
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
