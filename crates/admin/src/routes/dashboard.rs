//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use invite_core::{AdminSettings, Confirmation, DEFAULT_MAX_GUESTS, Gift, GuestSummary};
use tower_sessions::Session;
use tracing::instrument;

use crate::{filters, middleware::RequireAdminAuth, models::Flash, state::AppState};

/// One confirmation row on the dashboard.
#[derive(Debug, Clone)]
pub struct ConfirmationView {
    pub id: String,
    pub name: String,
    pub will_attend: bool,
    pub number_of_people: u32,
    pub additional_names: Option<String>,
    pub people_6_plus: u32,
    pub under_6: u32,
    /// `dd/mm/yyyy`
    pub created_on: String,
}

impl From<&Confirmation> for ConfirmationView {
    fn from(row: &Confirmation) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name.clone(),
            will_attend: row.will_attend,
            number_of_people: row.number_of_people,
            additional_names: row
                .additional_names
                .clone()
                .filter(|names| !names.trim().is_empty()),
            people_6_plus: row.people_six_plus(),
            under_6: row.people_under_six(),
            created_on: row.created_at.format("%d/%m/%Y").to_string(),
        }
    }
}

/// One gift row on the dashboard.
#[derive(Debug, Clone)]
pub struct GiftView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<&Gift> for GiftView {
    fn from(gift: &Gift) -> Self {
        Self {
            id: gift.id.to_string(),
            name: gift.name.clone(),
            description: gift.description.clone(),
            is_active: gift.is_active,
            sort_order: gift.sort_order,
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub honoree: String,
    pub flashes: Vec<Flash>,
    pub summary: GuestSummary,
    pub max_guests: u32,
    pub remaining: u32,
    pub registration_enabled: bool,
    pub confirmations: Vec<ConfirmationView>,
    pub gifts: Vec<GiftView>,
}

/// Confirmations and settings as loaded together for the dashboard.
///
/// Either read failing empties both, so aggregates are never computed over
/// a partial view.
pub(crate) async fn load_guests(
    state: &AppState,
) -> Result<(Vec<Confirmation>, Option<AdminSettings>), invite_core::backend::GatewayError> {
    let gateway = state.gateway();
    let confirmations = gateway.confirmations();
    let settings = gateway.settings();
    let (rows, current) = tokio::join!(confirmations.list_recent_first(), settings.current());
    Ok((rows?, current?))
}

/// Dashboard page.
///
/// GET /
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> DashboardTemplate {
    let mut flashes: Vec<Flash> = Flash::take(&session).await.into_iter().collect();

    let (confirmations, settings) = load_guests(&state).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load confirmations and settings");
        flashes.push(Flash::error("Erro", "Não foi possível carregar os dados"));
        (Vec::new(), None)
    });

    let gifts = state.gateway().gifts().list_all().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load gifts");
        flashes.push(Flash::error("Erro", "Não foi possível carregar os presentes"));
        Vec::new()
    });

    let summary = GuestSummary::from_confirmations(&confirmations);
    let max_guests = settings
        .as_ref()
        .map_or(DEFAULT_MAX_GUESTS, |s| s.max_guests);
    let registration_enabled = settings.as_ref().is_some_and(|s| s.registration_enabled);

    DashboardTemplate {
        honoree: state.config().event.honoree.clone(),
        flashes,
        summary,
        max_guests,
        remaining: summary.remaining(max_guests),
        registration_enabled,
        confirmations: confirmations.iter().map(ConfirmationView::from).collect(),
        gifts: gifts.iter().map(GiftView::from).collect(),
    }
}
