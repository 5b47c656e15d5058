//! Printable guest list.
//!
//! Returns a self-contained HTML document (inline CSS, no external
//! references) that opens the print dialog after 500 ms, so the admin can
//! save it as PDF.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::header::CONTENT_SECURITY_POLICY,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use invite_core::guest_list::{ExportOrder, GuestList, GuestListRow};
use invite_core::GuestSummary;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::{filters, middleware::RequireAdminAuth, models::Flash, state::AppState};

/// Policy for the printable document: inline style and the print script only.
pub const GUEST_LIST_CSP: &str =
    "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; base-uri 'none'; form-action 'none'";

#[derive(Debug, Default, Deserialize)]
pub struct GuestListQuery {
    #[serde(default)]
    pub order: ExportOrder,
}

/// The printable document.
#[derive(Template)]
#[template(path = "guest_list.html")]
pub struct GuestListTemplate {
    pub honoree: String,
    pub order_label: &'static str,
    pub generated_on: String,
    pub rows: Vec<GuestListRow>,
    pub summary: GuestSummary,
}

impl GuestListTemplate {
    #[must_use]
    pub fn new(honoree: &str, list: GuestList) -> Self {
        Self {
            honoree: honoree.to_string(),
            order_label: list.order.label(),
            generated_on: Utc::now().format("%d/%m/%Y %H:%M").to_string(),
            rows: list.rows,
            summary: list.summary,
        }
    }
}

fn print_failed(description: &str) -> Flash {
    Flash::error("Erro ao gerar PDF", description)
}

/// Generate the guest list.
///
/// GET /guest-list?order=original|alphabetical
#[instrument(skip(state, session))]
pub async fn export(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<GuestListQuery>,
) -> Response {
    let confirmations = match state.gateway().confirmations().list_recent_first().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load confirmations for the guest list");
            print_failed("Não foi possível carregar as confirmações.")
                .push(&session)
                .await;
            return Redirect::to("/").into_response();
        }
    };

    let list = GuestList::build(&confirmations, query.order);
    let template = GuestListTemplate::new(&state.config().event.honoree, list);

    match template.render() {
        Ok(html) => ([(CONTENT_SECURITY_POLICY, GUEST_LIST_CSP)], Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render guest list");
            print_failed("Não foi possível gerar a lista de convidados.")
                .push(&session)
                .await;
            Redirect::to("/").into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use invite_core::Confirmation;
    use serde_json::json;

    fn confirmation(name: &str, people: u32, over_6: u32) -> Confirmation {
        serde_json::from_value(json!({
            "id": name,
            "name": name,
            "will_attend": true,
            "number_of_people": people,
            "additional_names": "Bia",
            "people_over_6": over_6,
            "has_children_over_6": true,
            "created_at": "2025-10-01T12:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_document_is_self_contained() {
        let rows = vec![confirmation("Ana", 2, 1)];
        let list = GuestList::build(&rows, ExportOrder::Original);
        let html = GuestListTemplate::new("Henry", list).render().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("500"));
        assert!(html.contains("Ana"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("src=\"http"));
    }
}
