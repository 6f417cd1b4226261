// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration of a managed lock.

use crate::codec::LockProfile;
use crate::entity::EntityKind;
use crate::error::ValueError;
use crate::types::IeeeAddress;

/// Configuration for a managed lock.
///
/// # Examples
///
/// ```
/// use nimly_lib::manager::DeviceConfig;
///
/// let config = DeviceConfig::parse("00:0d:6f:ff:fe:12:34:56")
///     .unwrap()
///     .with_endpoint(1)
///     .with_friendly_name("Front Door");
///
/// assert_eq!(config.endpoint, 1);
/// assert_eq!(config.display_name(), "Front Door");
/// ```
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// The lock's IEEE address.
    pub ieee: IeeeAddress,
    /// Endpoint hosting the door lock cluster.
    pub endpoint: u8,
    /// Optional friendly name for the lock.
    pub friendly_name: Option<String>,
    /// Raw code tables for this lock.
    pub profile: LockProfile,
}

impl DeviceConfig {
    /// Endpoint the Nimly Touch Pro exposes its door lock cluster on.
    pub const DEFAULT_ENDPOINT: u8 = 11;

    /// Creates a configuration with the default endpoint and profile.
    #[must_use]
    pub fn new(ieee: IeeeAddress) -> Self {
        Self {
            ieee,
            endpoint: Self::DEFAULT_ENDPOINT,
            friendly_name: None,
            profile: LockProfile::default(),
        }
    }

    /// Creates a configuration from an IEEE address string.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidIeeeAddress` if the address does not parse.
    pub fn parse(ieee: &str) -> Result<Self, ValueError> {
        Ok(Self::new(ieee.parse()?))
    }

    /// Sets the door lock endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: u8) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets a friendly name for the lock.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Sets the raw code tables.
    #[must_use]
    pub fn with_profile(mut self, profile: LockProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns the friendly name if set, otherwise the IEEE address.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.friendly_name
            .clone()
            .unwrap_or_else(|| self.ieee.to_string())
    }

    /// Returns the unique id of one of this lock's entities.
    #[must_use]
    pub fn unique_id(&self, kind: EntityKind) -> String {
        kind.unique_id(self.ieee, self.endpoint)
    }

    /// Returns the name of one of this lock's entities.
    #[must_use]
    pub fn entity_name(&self, kind: EntityKind) -> String {
        kind.entity_name(&self.display_name())
    }
}
