//! Gift CRUD for the suggestions page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use invite_core::backend::GatewayError;
use invite_core::gifts::{next_sort_order, normalize_description};
use invite_core::{GiftId, GiftPatch, NewGift};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::state::AppState;

/// Build the gifts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gifts", post(create_gift))
        .route("/gifts/{id}", post(update_gift))
        .route("/gifts/{id}/edit", get(edit_gift))
        .route("/gifts/{id}/toggle", post(toggle_gift))
        .route("/gifts/{id}/delete", post(delete_gift))
}

/// Name and description as posted by the add and edit forms.
#[derive(Debug, Deserialize)]
pub struct GiftForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Gift edit page.
#[derive(Template, WebTemplate)]
#[template(path = "gifts/edit.html")]
pub struct EditGiftTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
}

fn missing_name() -> Flash {
    Flash::error("Erro", "Informe o nome do presente.")
}

fn failure(action: &str, e: &GatewayError) -> Flash {
    tracing::error!(error = %e, action, "Gift mutation failed");
    match e {
        GatewayError::NotFound => Flash::error("Erro", "Presente não encontrado."),
        _ => Flash::error("Erro", format!("Não foi possível {action} o presente")),
    }
}

/// Add a gift at the end of the list.
///
/// POST /gifts
#[instrument(skip_all)]
async fn create_gift(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GiftForm>,
) -> impl IntoResponse {
    let name = form.name.trim();
    if name.is_empty() {
        missing_name().push(&session).await;
        return Redirect::to("/");
    }

    let gifts = state.gateway().gifts();
    let result = match gifts.list_all().await {
        Ok(existing) => {
            gifts
                .create(&NewGift {
                    name: name.to_string(),
                    description: normalize_description(&form.description),
                    is_active: true,
                    sort_order: next_sort_order(&existing),
                })
                .await
        }
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(gift) => Flash::success("Presente adicionado!", format!("{} está na lista.", gift.name)),
        Err(e) => failure("adicionar", &e),
    };
    flash.push(&session).await;

    Redirect::to("/")
}

/// Show or hide a gift on the public page.
///
/// POST /gifts/{id}/toggle
#[instrument(skip(state, session))]
async fn toggle_gift(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = GiftId::from(id);
    let gifts = state.gateway().gifts();

    let result = match gifts.get(&id).await {
        Ok(gift) => {
            gifts
                .update(
                    &id,
                    &GiftPatch {
                        is_active: Some(!gift.is_active),
                        ..GiftPatch::default()
                    },
                )
                .await
        }
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(gift) if gift.is_active => {
            Flash::success("Presente ativado!", format!("{} aparece nas sugestões.", gift.name))
        }
        Ok(gift) => Flash::success(
            "Presente desativado!",
            format!("{} não aparece mais nas sugestões.", gift.name),
        ),
        Err(e) => failure("atualizar", &e),
    };
    flash.push(&session).await;

    Redirect::to("/")
}

/// Gift edit form.
///
/// GET /gifts/{id}/edit
#[instrument(skip(state, session))]
async fn edit_gift(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    match state.gateway().gifts().get(&GiftId::from(id)).await {
        Ok(gift) => EditGiftTemplate {
            id: gift.id.to_string(),
            name: gift.name,
            description: gift.description.unwrap_or_default(),
        }
        .into_response(),
        Err(e) => {
            failure("carregar", &e).push(&session).await;
            Redirect::to("/").into_response()
        }
    }
}

/// Save a gift's name and description.
///
/// POST /gifts/{id}
#[instrument(skip(state, session, form))]
async fn update_gift(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<GiftForm>,
) -> impl IntoResponse {
    let name = form.name.trim();
    if name.is_empty() {
        missing_name().push(&session).await;
        return Redirect::to("/");
    }

    let patch = GiftPatch {
        name: Some(name.to_string()),
        description: Some(normalize_description(&form.description)),
        ..GiftPatch::default()
    };

    let flash = match state.gateway().gifts().update(&GiftId::from(id), &patch).await {
        Ok(gift) => Flash::success("Presente atualizado!", format!("{} foi salvo.", gift.name)),
        Err(e) => failure("atualizar", &e),
    };
    flash.push(&session).await;

    Redirect::to("/")
}

/// Remove a gift.
///
/// POST /gifts/{id}/delete
#[instrument(skip(state, session))]
async fn delete_gift(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let flash = match state.gateway().gifts().delete(&GiftId::from(id)).await {
        Ok(gift) => Flash::success(
            "Presente removido!",
            format!("{} foi removido da lista.", gift.name),
        ),
        Err(e) => failure("remover", &e),
    };
    flash.push(&session).await;

    Redirect::to("/")
}
