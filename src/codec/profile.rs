// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw code tables for one lock model.
//!
//! The vendor does not publish the raw encodings of its operator and setting
//! attributes, so they are configuration rather than constants. The default
//! profile matches the Nimly Touch Pro as observed in the field.

use std::borrow::Cow;

use crate::codec::table::{CodeTable, LevelTable};
use crate::error::ValueError;
use crate::types::{DoorState, OperatorType};

static DEFAULT_OPERATOR_CODES: [(i64, OperatorType); 4] = [
    (0, OperatorType::Keypad),
    (1, OperatorType::HomeAssistant),
    (2, OperatorType::Manual),
    (3, OperatorType::Schedule),
];

static DEFAULT_DOOR_STATE_CODES: [(i64, DoorState); 2] =
    [(0, DoorState::Open), (1, DoorState::Closed)];

/// Code tables used to decode and encode a lock's attributes.
///
/// # Examples
///
/// ```
/// use nimly_lib::codec::{LevelTable, LockProfile};
/// use nimly_lib::types::{OperatorType, SettingLevel};
///
/// let profile = LockProfile::default();
/// assert_eq!(profile.operator(2), OperatorType::Manual);
/// assert_eq!(profile.operator(42), OperatorType::Unknown);
///
/// let custom = LockProfile::default()
///     .with_volume_levels(LevelTable::new(0, 10, 50, 100).unwrap());
/// assert_eq!(custom.volume_levels().encode(SettingLevel::Medium), 50);
/// ```
#[derive(Debug, Clone)]
pub struct LockProfile {
    operator_codes: CodeTable<OperatorType>,
    door_state_codes: CodeTable<DoorState>,
    led_levels: LevelTable,
    volume_levels: LevelTable,
}

impl LockProfile {
    /// Profile of the Nimly Touch Pro.
    pub const NIMLY_TOUCH_PRO: Self = Self {
        operator_codes: CodeTable::from_static(&DEFAULT_OPERATOR_CODES),
        door_state_codes: CodeTable::from_static(&DEFAULT_DOOR_STATE_CODES),
        led_levels: LevelTable::DEFAULT,
        volume_levels: LevelTable::DEFAULT,
    };

    /// Replaces the operator source table.
    ///
    /// Accepts a static slice or a table loaded at runtime.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DuplicateCode` if the table is not bijective.
    pub fn with_operator_codes(
        mut self,
        entries: impl Into<Cow<'static, [(i64, OperatorType)]>>,
    ) -> Result<Self, ValueError> {
        self.operator_codes = CodeTable::bijective(entries)?;
        Ok(self)
    }

    /// Replaces the door state table.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DuplicateCode` if the table is not bijective.
    pub fn with_door_state_codes(
        mut self,
        entries: impl Into<Cow<'static, [(i64, DoorState)]>>,
    ) -> Result<Self, ValueError> {
        self.door_state_codes = CodeTable::bijective(entries)?;
        Ok(self)
    }

    /// Replaces the LED level table.
    #[must_use]
    pub fn with_led_levels(mut self, levels: LevelTable) -> Self {
        self.led_levels = levels;
        self
    }

    /// Replaces the sound volume level table.
    #[must_use]
    pub fn with_volume_levels(mut self, levels: LevelTable) -> Self {
        self.volume_levels = levels;
        self
    }

    /// Decodes an operator source code. Codes outside the table are
    /// [`OperatorType::Unknown`].
    #[must_use]
    pub fn operator(&self, raw: i64) -> OperatorType {
        self.operator_codes.decode(raw).unwrap_or_default()
    }

    /// Decodes a door state code. Codes outside the table are
    /// [`DoorState::Unknown`].
    #[must_use]
    pub fn door_state(&self, raw: i64) -> DoorState {
        self.door_state_codes.decode(raw).unwrap_or_default()
    }

    /// Returns the operator source table.
    #[must_use]
    pub const fn operator_codes(&self) -> &CodeTable<OperatorType> {
        &self.operator_codes
    }

    /// Returns the door state table.
    #[must_use]
    pub const fn door_state_codes(&self) -> &CodeTable<DoorState> {
        &self.door_state_codes
    }

    /// Returns the LED level table.
    #[must_use]
    pub const fn led_levels(&self) -> &LevelTable {
        &self.led_levels
    }

    /// Returns the sound volume level table.
    #[must_use]
    pub const fn volume_levels(&self) -> &LevelTable {
        &self.volume_levels
    }
}

impl Default for LockProfile {
    fn default() -> Self {
        Self::NIMLY_TOUCH_PRO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RF_FIRST: [(i64, OperatorType); 2] =
        [(0, OperatorType::HomeAssistant), (1, OperatorType::Keypad)];
    static BROKEN: [(i64, DoorState); 2] = [(0, DoorState::Open), (0, DoorState::Closed)];

    #[test]
    fn default_operator_table() {
        let profile = LockProfile::default();
        assert_eq!(profile.operator(0), OperatorType::Keypad);
        assert_eq!(profile.operator(1), OperatorType::HomeAssistant);
        assert_eq!(profile.operator(2), OperatorType::Manual);
        assert_eq!(profile.operator(3), OperatorType::Schedule);
        assert_eq!(profile.operator(4), OperatorType::Unknown);
        assert_eq!(profile.operator(-1), OperatorType::Unknown);
    }

    #[test]
    fn default_door_table() {
        let profile = LockProfile::default();
        assert_eq!(profile.door_state(0), DoorState::Open);
        assert_eq!(profile.door_state(1), DoorState::Closed);
        assert_eq!(profile.door_state(2), DoorState::Unknown);
    }

    #[test]
    fn custom_operator_table() {
        let profile = LockProfile::default()
            .with_operator_codes(&RF_FIRST[..])
            .unwrap();
        assert_eq!(profile.operator(0), OperatorType::HomeAssistant);
        assert_eq!(profile.operator(2), OperatorType::Unknown);
    }

    #[test]
    fn runtime_loaded_tables() {
        let loaded = vec![(4, DoorState::Open), (5, DoorState::Closed)];
        let profile = LockProfile::default()
            .with_door_state_codes(loaded)
            .unwrap()
            .with_operator_codes(vec![(7, OperatorType::Manual)])
            .unwrap();

        assert_eq!(profile.door_state(5), DoorState::Closed);
        assert_eq!(profile.door_state(0), DoorState::Unknown);
        assert_eq!(profile.operator(7), OperatorType::Manual);
        assert_eq!(profile.operator(0), OperatorType::Unknown);
    }

    #[test]
    fn rejects_non_bijective_table() {
        let result = LockProfile::default().with_door_state_codes(&BROKEN[..]);
        assert!(matches!(result, Err(ValueError::DuplicateCode(0))));
    }

    #[test]
    fn default_tables_are_bijective() {
        let profile = LockProfile::NIMLY_TOUCH_PRO;
        assert!(profile.operator_codes().is_bijective());
        assert!(profile.door_state_codes().is_bijective());
    }
}
