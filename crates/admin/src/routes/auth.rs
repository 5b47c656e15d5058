//! Authentication route handlers for admin.
//!
//! Provides the password login page, login submission and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{clear_current_admin, login_rate_limiter, set_current_admin};
use crate::models::{CurrentAdmin, Flash, session_keys};
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page))
        .route("/auth/login", post(login).route_layer(login_rate_limiter()))
        .route("/auth/logout", post(logout))
}

/// Render the login page, or go to the dashboard when already logged in.
///
/// GET /auth/login
async fn login_page(session: Session) -> Response {
    let logged_in = session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .is_some();

    if logged_in {
        Redirect::to("/").into_response()
    } else {
        LoginPageTemplate::default().into_response()
    }
}

/// Check the password and open a session.
///
/// POST /auth/login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let service = AdminAuthService::new(&state.config().password_hash);

    match service.login(&form.password) {
        Ok(admin) => {
            set_current_admin(&session, &admin).await?;
            Flash::success("Login realizado!", "Bem-vindo ao painel administrativo.")
                .push(&session)
                .await;
            tracing::info!("Admin logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AdminAuthError::InvalidPassword) => {
            tracing::warn!("Admin login with wrong password");
            let page = LoginPageTemplate {
                error: Some("Senha incorreta. Tente novamente.".to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }

    Redirect::to("/auth/login")
}
