//! Registration settings routes.
//!
//! Each mutation updates the singleton `admin_settings` row, stores a flash
//! and redirects back to the dashboard, which refetches everything.

use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::post,
};
use invite_core::DEFAULT_MAX_GUESTS;
use invite_core::backend::GatewayError;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings/max-guests", post(update_max_guests))
        .route("/settings/registration", post(toggle_registration))
}

#[derive(Debug, Deserialize)]
pub struct MaxGuestsForm {
    #[serde(default)]
    pub max_guests: String,
}

/// Parse the guest cap as typed. Anything that is not a positive integer
/// becomes the default cap.
#[must_use]
pub fn parse_max_guests(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_GUESTS)
}

/// Update the guest cap.
///
/// POST /settings/max-guests
#[instrument(skip_all)]
async fn update_max_guests(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MaxGuestsForm>,
) -> impl IntoResponse {
    let max_guests = parse_max_guests(&form.max_guests);
    let settings = state.gateway().settings();

    let result = match settings.current().await {
        Ok(Some(current)) => settings.set_max_guests(&current.id, max_guests).await,
        Ok(None) => Err(GatewayError::NotFound),
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(updated) => {
            tracing::info!(max_guests = updated.max_guests, "Guest cap updated");
            Flash::success(
                "Configurações atualizadas!",
                "As configurações foram salvas com sucesso.",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update guest cap");
            Flash::error("Erro", "Não foi possível atualizar as configurações")
        }
    };
    flash.push(&session).await;

    Redirect::to("/")
}

/// Pause or reopen registrations.
///
/// POST /settings/registration
#[instrument(skip_all)]
async fn toggle_registration(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let settings = state.gateway().settings();

    let result = match settings.current().await {
        Ok(Some(current)) => {
            settings
                .set_registration_enabled(&current.id, !current.registration_enabled)
                .await
        }
        Ok(None) => Err(GatewayError::NotFound),
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(updated) if updated.registration_enabled => {
            tracing::info!("Registrations reopened");
            Flash::success(
                "Inscrições reativadas!",
                "As inscrições foram reativadas com sucesso.",
            )
        }
        Ok(_) => {
            tracing::info!("Registrations paused");
            Flash::success(
                "Inscrições pausadas!",
                "As inscrições foram pausadas com sucesso.",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to toggle registrations");
            Flash::error(
                "Erro",
                "Não foi possível atualizar o status das inscrições",
            )
        }
    };
    flash.push(&session).await;

    Redirect::to("/")
}
