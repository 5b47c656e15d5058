//! `confirmations` table access.

use tracing::{instrument, warn};

use super::{Direction, Gateway, GatewayError, Table};
use crate::models::{Confirmation, NewConfirmation};
use crate::rsvp::Rsvp;
use crate::types::ConfirmationId;

/// Columns added after the first schema revision.
pub const EXTENDED_COLUMNS: [&str; 4] = [
    "number_of_people",
    "additional_names",
    "people_over_6",
    "has_children_over_6",
];

/// Which insert shape the backend accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Every column was stored.
    Full,
    /// Only `name` and `will_attend` were stored.
    Baseline,
}

/// Repository for RSVP rows.
pub struct ConfirmationRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> ConfirmationRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// All confirmations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_recent_first(&self) -> Result<Vec<Confirmation>, GatewayError> {
        self.gateway
            .table(Table::Confirmations)
            .order("created_at", Direction::Desc)
            .select("*")
            .await
    }

    /// One confirmation by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when no row has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &ConfirmationId) -> Result<Confirmation, GatewayError> {
        self.gateway
            .table(Table::Confirmations)
            .eq("id", id)
            .limit(1)
            .select::<Confirmation>("*")
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound)
    }

    /// Store an RSVP.
    ///
    /// The full row is tried first. If the backend rejects it (typically a
    /// table still on the first schema revision) the baseline row is
    /// inserted instead. A response that fails to decode after a successful
    /// write is not retried.
    ///
    /// # Errors
    ///
    /// Returns the error of the baseline attempt when both inserts fail.
    #[instrument(skip(self, rsvp), fields(party_size = %rsvp.party_size))]
    pub async fn insert(&self, rsvp: &Rsvp) -> Result<InsertOutcome, GatewayError> {
        let full = rsvp.to_new_confirmation();
        match self.insert_full(&full).await {
            Ok(()) => Ok(InsertOutcome::Full),
            Err(e @ GatewayError::Decode(_)) => Err(e),
            Err(e) => {
                warn!(error = %e, "full confirmation insert rejected, retrying with baseline columns");
                self.gateway
                    .table(Table::Confirmations)
                    .insert::<_, serde_json::Value>(&rsvp.baseline())
                    .await?;
                Ok(InsertOutcome::Baseline)
            }
        }
    }

    async fn insert_full(&self, row: &NewConfirmation) -> Result<(), GatewayError> {
        self.gateway
            .table(Table::Confirmations)
            .insert::<_, serde_json::Value>(row)
            .await
            .map(drop)
    }

    /// Delete one confirmation and return the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when nothing was deleted.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &ConfirmationId) -> Result<Confirmation, GatewayError> {
        self.gateway
            .table(Table::Confirmations)
            .eq("id", id)
            .delete::<Confirmation>()
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound)
    }

    /// Whether the table carries every column of the current revision.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for failures other than an unknown column.
    #[instrument(skip(self))]
    pub async fn has_extended_columns(&self) -> Result<bool, GatewayError> {
        let columns = std::iter::once("id")
            .chain(EXTENDED_COLUMNS)
            .collect::<Vec<_>>()
            .join(",");
        let probe = self
            .gateway
            .table(Table::Confirmations)
            .limit(0)
            .select::<serde_json::Value>(&columns)
            .await;

        match probe {
            Ok(_) => Ok(true),
            Err(GatewayError::Api { status: 400, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
