//! Gift suggestions page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use invite_core::GiftSuggestion;
use invite_core::gifts::fallback_suggestions;
use tracing::instrument;

use crate::state::AppState;

/// Active gift suggestions in display order.
#[derive(Template, WebTemplate)]
#[template(path = "gifts.html")]
pub struct GiftsTemplate {
    pub honoree: String,
    pub gifts: Vec<GiftSuggestion>,
}

/// Display active gifts, or the built-in list when the backend is down.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> GiftsTemplate {
    let gifts = state
        .gateway()
        .gifts()
        .active_suggestions()
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch gifts, showing built-in list");
            fallback_suggestions()
        });

    GiftsTemplate {
        honoree: state.event().honoree.clone(),
        gifts,
    }
}
