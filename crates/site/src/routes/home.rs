//! Landing and invitation pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use invite_core::EventDetails;
use tracing::instrument;

use crate::state::AppState;

/// "Convite Especial" landing page.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct LandingTemplate {
    pub event: EventDetails,
}

/// Invitation page with the RSVP, gifts and location actions.
#[derive(Template, WebTemplate)]
#[template(path = "invitation.html")]
pub struct InvitationTemplate {
    pub event: EventDetails,
}

/// Display the landing page.
#[instrument(skip(state))]
pub async fn landing(State(state): State<AppState>) -> LandingTemplate {
    LandingTemplate {
        event: state.event().clone(),
    }
}

/// Display the invitation.
#[instrument(skip(state))]
pub async fn invitation(State(state): State<AppState>) -> InvitationTemplate {
    InvitationTemplate {
        event: state.event().clone(),
    }
}
