//! `admin_settings` table access.
//!
//! The table may hold several rows; the oldest one is the current settings.

use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use super::{Direction, Gateway, GatewayError, Table};
use crate::models::{AdminSettings, SettingsPatch};
use crate::types::SettingsId;

#[derive(Debug, Deserialize)]
struct RegistrationFlag {
    registration_enabled: bool,
}

/// Repository for the settings singleton.
pub struct SettingsRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// The current settings row, if the table has been seeded.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<Option<AdminSettings>, GatewayError> {
        Ok(self
            .gateway
            .table(Table::AdminSettings)
            .order("created_at", Direction::Asc)
            .limit(1)
            .select::<AdminSettings>("*")
            .await?
            .into_iter()
            .next())
    }

    /// Whether the RSVP form accepts submissions. An unseeded table counts
    /// as enabled.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn registration_enabled(&self) -> Result<bool, GatewayError> {
        Ok(self
            .gateway
            .table(Table::AdminSettings)
            .order("created_at", Direction::Asc)
            .limit(1)
            .select::<RegistrationFlag>("registration_enabled")
            .await?
            .into_iter()
            .next()
            .is_none_or(|row| row.registration_enabled))
    }

    /// Change the guest cap.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the row no longer exists.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn set_max_guests(
        &self,
        id: &SettingsId,
        max_guests: u32,
    ) -> Result<AdminSettings, GatewayError> {
        self.patch(
            id,
            &SettingsPatch {
                max_guests: Some(max_guests),
                ..SettingsPatch::default()
            },
        )
        .await
    }

    /// Open or pause registrations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the row no longer exists.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn set_registration_enabled(
        &self,
        id: &SettingsId,
        enabled: bool,
    ) -> Result<AdminSettings, GatewayError> {
        self.patch(
            id,
            &SettingsPatch {
                registration_enabled: Some(enabled),
                ..SettingsPatch::default()
            },
        )
        .await
    }

    async fn patch(
        &self,
        id: &SettingsId,
        patch: &SettingsPatch,
    ) -> Result<AdminSettings, GatewayError> {
        let patch = SettingsPatch {
            updated_at: Some(Utc::now()),
            ..patch.clone()
        };
        self.gateway
            .table(Table::AdminSettings)
            .eq("id", id)
            .update::<_, AdminSettings>(&patch)
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound)
    }
}
