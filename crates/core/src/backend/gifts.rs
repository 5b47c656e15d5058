//! `gifts` table access.

use chrono::Utc;
use tracing::instrument;

use super::{Direction, Gateway, GatewayError, Table};
use crate::models::{Gift, GiftPatch, GiftSuggestion, NewGift};
use crate::types::GiftId;

/// Repository for gift rows.
pub struct GiftRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> GiftRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Active gifts for the public page, in display order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn active_suggestions(&self) -> Result<Vec<GiftSuggestion>, GatewayError> {
        self.gateway
            .table(Table::Gifts)
            .eq("is_active", true)
            .order("sort_order", Direction::Asc)
            .select("name,description")
            .await
    }

    /// Every gift, active or not, in display order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Gift>, GatewayError> {
        self.gateway
            .table(Table::Gifts)
            .order("sort_order", Direction::Asc)
            .select("*")
            .await
    }

    /// One gift by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when no row has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &GiftId) -> Result<Gift, GatewayError> {
        self.gateway
            .table(Table::Gifts)
            .eq("id", id)
            .limit(1)
            .select::<Gift>("*")
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound)
    }

    /// Insert a gift and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or returns no row.
    #[instrument(skip(self, gift), fields(name = %gift.name))]
    pub async fn create(&self, gift: &NewGift) -> Result<Gift, GatewayError> {
        self.gateway
            .table(Table::Gifts)
            .insert::<_, Gift>(gift)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("insert returned no row".to_string()))
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when no row has this id.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update(&self, id: &GiftId, patch: &GiftPatch) -> Result<Gift, GatewayError> {
        let patch = GiftPatch {
            updated_at: Some(Utc::now()),
            ..patch.clone()
        };
        self.gateway
            .table(Table::Gifts)
            .eq("id", id)
            .update::<_, Gift>(&patch)
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound)
    }

    /// Delete a gift and return the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when nothing was deleted.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &GiftId) -> Result<Gift, GatewayError> {
        self.gateway
            .table(Table::Gifts)
            .eq("id", id)
            .delete::<Gift>()
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound)
    }
}
