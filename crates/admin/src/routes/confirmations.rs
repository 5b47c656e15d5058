//! Confirmation removal.
//!
//! `GET` renders the blocking "Confirmar Remoção" page; `POST` deletes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use invite_core::ConfirmationId;
use invite_core::backend::GatewayError;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::state::AppState;

/// Build the confirmations router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/confirmations/{id}/delete",
        get(confirm_delete).post(delete_confirmation),
    )
}

/// Delete confirmation dialog.
#[derive(Template, WebTemplate)]
#[template(path = "confirmations/delete.html")]
pub struct ConfirmDeleteTemplate {
    pub id: String,
    pub name: String,
}

fn not_found_flash() -> Flash {
    Flash::error("Erro", "Confirmação não encontrada.")
}

/// Ask before removing a confirmation.
///
/// GET /confirmations/{id}/delete
#[instrument(skip(state, session))]
async fn confirm_delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let id = ConfirmationId::from(id);
    match state.gateway().confirmations().get(&id).await {
        Ok(row) => ConfirmDeleteTemplate {
            id: row.id.to_string(),
            name: row.name,
        }
        .into_response(),
        Err(GatewayError::NotFound) => {
            not_found_flash().push(&session).await;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load confirmation");
            Flash::error("Erro", e.to_string()).push(&session).await;
            Redirect::to("/").into_response()
        }
    }
}

/// Remove a confirmation.
///
/// POST /confirmations/{id}/delete
#[instrument(skip(state, session))]
async fn delete_confirmation(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = ConfirmationId::from(id);
    let flash = match state.gateway().confirmations().delete(&id).await {
        Ok(removed) => {
            tracing::info!(id = %removed.id, "Confirmation removed");
            Flash::success(
                "Confirmação removida!",
                format!("{} foi removido da lista.", removed.name),
            )
        }
        Err(GatewayError::NotFound) => not_found_flash(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to remove confirmation");
            Flash::error("Erro", e.to_string())
        }
    };
    flash.push(&session).await;

    Redirect::to("/")
}
