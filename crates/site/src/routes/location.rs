//! Venue page with map deep links.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use invite_core::Venue;
use tracing::instrument;

use crate::state::AppState;

/// Venue name, address and the two navigation links.
#[derive(Template, WebTemplate)]
#[template(path = "location.html")]
pub struct LocationTemplate {
    pub venue: Venue,
    pub google_maps_url: String,
    pub waze_url: String,
}

/// Display the venue.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> LocationTemplate {
    let venue = state.event().venue.clone();
    LocationTemplate {
        google_maps_url: venue.google_maps_url(),
        waze_url: venue.waze_url(),
        venue,
    }
}
