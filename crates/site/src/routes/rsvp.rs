//! RSVP form and submission.
//!
//! The form works without scripts: changing the party size and pressing
//! "Atualizar" re-submits the form with GET, which re-renders it with the
//! right number of companion slots and every typed value kept.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use invite_core::{Attendance, EventDetails, PartySize, RsvpError, RsvpForm};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// One companion row of the form.
#[derive(Debug, Clone)]
pub struct CompanionSlot {
    /// 1-based, matches the `companion_*_<n>` field names.
    pub index: usize,
    pub name: String,
    pub under_six: bool,
}

/// One option of the party size select.
#[derive(Debug, Clone, Copy)]
pub struct SizeOption {
    pub value: u8,
    pub selected: bool,
}

/// Error banner shown above the form.
#[derive(Debug, Clone)]
pub struct FormError {
    pub title: String,
    pub message: String,
}

/// RSVP form page.
#[derive(Template, WebTemplate)]
#[template(path = "rsvp.html")]
pub struct RsvpTemplate {
    pub event: EventDetails,
    pub name: String,
    pub attending: bool,
    pub sizes: Vec<SizeOption>,
    pub slots: Vec<CompanionSlot>,
    pub registration_enabled: bool,
    pub error: Option<FormError>,
}

impl RsvpTemplate {
    fn new(event: &EventDetails, form: &RsvpForm, registration_enabled: bool) -> Self {
        let slots = form
            .companion_slots()
            .into_iter()
            .enumerate()
            .map(|(i, companion)| CompanionSlot {
                index: i + 1,
                name: companion.name,
                under_six: !companion.age_band.is_six_or_over(),
            })
            .collect();

        Self {
            event: event.clone(),
            name: form.name.clone(),
            attending: form.attendance.is_attending(),
            sizes: size_options(form.display_size()),
            slots,
            registration_enabled,
            error: None,
        }
    }

    fn with_error(mut self, title: &str, message: impl Into<String>) -> Self {
        self.error = Some(FormError {
            title: title.to_string(),
            message: message.into(),
        });
        self
    }
}

fn size_options(selected: PartySize) -> Vec<SizeOption> {
    PartySize::all()
        .map(|size| SizeOption {
            value: size.get(),
            selected: size == selected,
        })
        .collect()
}

/// Page shown instead of the form while registrations are paused.
#[derive(Template, WebTemplate)]
#[template(path = "rsvp_paused.html")]
pub struct RsvpPausedTemplate {
    pub event: EventDetails,
}

/// Read the registration flag, treating a failed read as open.
///
/// A transient outage should not hide the form; the submit path checks
/// again before writing.
async fn registration_open(state: &AppState) -> bool {
    state
        .gateway()
        .settings()
        .registration_enabled()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read registration flag, assuming enabled");
            true
        })
}

/// Display the RSVP form.
///
/// Query parameters use the same names as the form fields so the
/// "Atualizar" button can resize the party without losing input.
#[instrument(skip(state, params))]
pub async fn form(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let form = RsvpForm::from_pairs(params);

    if !registration_open(&state).await {
        return paused(&state, StatusCode::OK);
    }

    RsvpTemplate::new(state.event(), &form, true).into_response()
}

/// Handle RSVP submission.
///
/// Stores the confirmation and redirects to WhatsApp with the pre-filled
/// message. Validation failures and backend errors re-render the form with
/// the submitted values.
#[instrument(skip(state, fields))]
pub async fn submit(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = RsvpForm::from_pairs(fields);

    let rsvp = match form.validate() {
        Ok(rsvp) => rsvp,
        Err(RsvpError::MissingName) => {
            let page = RsvpTemplate::new(state.event(), &form, true)
                .with_error("Nome obrigatório", "Por favor, informe seu nome.");
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    if !registration_open(&state).await {
        return Ok(paused(&state, StatusCode::FORBIDDEN));
    }

    match state.gateway().confirmations().insert(&rsvp).await {
        Ok(outcome) => {
            tracing::info!(
                ?outcome,
                attending = matches!(rsvp.attendance, Attendance::Attending),
                party_size = %rsvp.party_size,
                "RSVP stored"
            );
            let event = state.event();
            let link = event.whatsapp_link(&event.rsvp_message(&rsvp));
            Ok(Redirect::to(&link).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store RSVP");
            let page = RsvpTemplate::new(state.event(), &form, true)
                .with_error("Erro ao enviar confirmação", format!("Erro: {e}"));
            Ok((StatusCode::BAD_GATEWAY, page).into_response())
        }
    }
}

fn paused(state: &AppState, status: StatusCode) -> Response {
    (
        status,
        RsvpPausedTemplate {
            event: state.event().clone(),
        },
    )
        .into_response()
}
