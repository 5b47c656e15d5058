//! Integration tests for the admin dashboard.
//!
//! Each test starts its own mock backend and admin server and logs in with
//! a cookie-keeping client.

use invite_integration_tests::{MockBackend, admin_client, client, spawn_admin};
use reqwest::{Client, StatusCode, header::LOCATION};
use serde_json::json;

async fn setup() -> (MockBackend, String, Client) {
    let backend = MockBackend::start().await;
    let admin = spawn_admin(&backend).await;
    let client = admin_client(&admin).await;
    (backend, admin, client)
}

async fn dashboard(client: &Client, admin: &str) -> String {
    let response = client.get(format!("{admin}/")).send().await.expect("dashboard");
    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.expect("dashboard body")
}

async fn post(client: &Client, url: String, form: &[(&str, &str)]) -> reqwest::Response {
    client.post(url).form(form).send().await.expect("post")
}

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_dashboard_requires_login() {
    let backend = MockBackend::start().await;
    let admin = spawn_admin(&backend).await;

    let response = client().get(format!("{admin}/")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");

    let response = post(&client(), format!("{admin}/gifts"), &[("name", "X")]).await;
    assert_eq!(location(&response), "/auth/login");
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let backend = MockBackend::start().await;
    let admin = spawn_admin(&backend).await;

    let response = post(&client(), format!("{admin}/auth/login"), &[("password", "errada")]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response
            .text()
            .await
            .expect("body")
            .contains("Senha incorreta. Tente novamente.")
    );
}

#[tokio::test]
async fn test_login_flash_then_logout() {
    let (_backend, admin, client) = setup().await;

    let body = dashboard(&client, &admin).await;
    assert!(body.contains("Login realizado!"));

    // Flashes are shown once.
    let body = dashboard(&client, &admin).await;
    assert!(!body.contains("Login realizado!"));

    let response = post(&client, format!("{admin}/auth/logout"), &[]).await;
    assert_eq!(location(&response), "/auth/login");

    let response = client.get(format!("{admin}/")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_admin_pages_are_not_cached() {
    let (_backend, admin, client) = setup().await;
    let response = client.get(format!("{admin}/")).send().await.expect("request");
    let cache = response
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cache.contains("no-store"));
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_aggregates() {
    let (backend, admin, client) = setup().await;
    backend.seed_settings(10, true);
    backend.seed_confirmation(json!({
        "name": "Ana",
        "will_attend": true,
        "number_of_people": 3,
        "additional_names": "Bruno, Caio",
        "people_over_6": 2,
        "has_children_over_6": true,
    }));
    backend.seed_confirmation(json!({ "name": "Legado", "will_attend": true }));
    backend.seed_confirmation(json!({
        "name": "Duda",
        "will_attend": false,
        "number_of_people": 1,
        "people_over_6": 1,
    }));

    let body = dashboard(&client, &admin).await;

    assert!(body.contains("<p class=\"value\">3</p>"), "people 6+");
    assert!(body.contains("<p class=\"value\">1</p>"), "under 6");
    assert!(body.contains("famílias (4 pessoas)"));
    assert!(body.contains("1 não vão"));
    assert!(body.contains("Confirmações (3)"));
    assert!(body.contains("value=\"10\""));
    assert!(body.contains("Ativo"));

    // Newest first.
    let duda = body.find("Duda").expect("Duda listed");
    let ana = body.find("<h3>Ana</h3>").expect("Ana listed");
    assert!(duda < ana);
}

#[tokio::test]
async fn test_dashboard_survives_backend_outage() {
    let (backend, admin, client) = setup().await;
    backend.fail_table("confirmations");

    let body = dashboard(&client, &admin).await;
    assert!(body.contains("Não foi possível carregar os dados"));
    assert!(body.contains("Nenhuma confirmação ainda"));
    assert!(body.contains("value=\"100\""));
    assert!(body.contains("Pausado"));
}

#[tokio::test]
async fn test_dashboard_settings_unreadable() {
    let (backend, admin, client) = setup().await;
    backend.seed_confirmation(json!({"name": "Ana", "will_attend": true}));
    backend.fail_table("admin_settings");

    let body = dashboard(&client, &admin).await;
    assert!(body.contains("Não foi possível carregar os dados"));
    assert!(body.contains("Pausado"));
    assert!(body.contains("value=\"100\""));
    assert!(body.contains("Nenhuma confirmação ainda"));
    assert!(!body.contains("<h3>Ana</h3>"));
}

#[tokio::test]
async fn test_guest_list_links_open_new_tab() {
    let (_backend, admin, client) = setup().await;

    let body = dashboard(&client, &admin).await;
    for order in ["original", "alphabetical"] {
        let link = format!(
            "href=\"/guest-list?order={order}\" target=\"_blank\" rel=\"noopener\""
        );
        assert!(body.contains(&link), "{order} link");
    }
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_update_max_guests() {
    let (backend, admin, client) = setup().await;
    backend.seed_settings(100, true);

    let response = post(&client, format!("{admin}/settings/max-guests"), &[("max_guests", "150")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(backend.rows("admin_settings")[0]["max_guests"], json!(150));
    assert!(dashboard(&client, &admin).await.contains("Configurações atualizadas!"));

    post(&client, format!("{admin}/settings/max-guests"), &[("max_guests", "abc")]).await;
    assert_eq!(backend.rows("admin_settings")[0]["max_guests"], json!(100));
}

#[tokio::test]
async fn test_toggle_registration() {
    let (backend, admin, client) = setup().await;
    backend.seed_settings(100, true);

    post(&client, format!("{admin}/settings/registration"), &[]).await;
    assert_eq!(
        backend.rows("admin_settings")[0]["registration_enabled"],
        json!(false)
    );
    assert!(dashboard(&client, &admin).await.contains("Inscrições pausadas!"));

    post(&client, format!("{admin}/settings/registration"), &[]).await;
    assert_eq!(
        backend.rows("admin_settings")[0]["registration_enabled"],
        json!(true)
    );
}

#[tokio::test]
async fn test_settings_without_row_flashes_error() {
    let (backend, admin, client) = setup().await;

    post(&client, format!("{admin}/settings/registration"), &[]).await;
    assert!(
        dashboard(&client, &admin)
            .await
            .contains("Não foi possível atualizar o status das inscrições")
    );
    assert!(backend.writes().is_empty());
}

// ============================================================================
// Confirmations
// ============================================================================

#[tokio::test]
async fn test_delete_confirmation() {
    let (backend, admin, client) = setup().await;
    let id = backend.seed_confirmation(json!({ "name": "Ana", "will_attend": true }));

    let dialog = client
        .get(format!("{admin}/confirmations/{id}/delete"))
        .send()
        .await
        .expect("dialog");
    assert_eq!(dialog.status(), StatusCode::OK);
    assert!(dialog.text().await.expect("body").contains("Ana"));

    let response = post(&client, format!("{admin}/confirmations/{id}/delete"), &[]).await;
    assert_eq!(location(&response), "/");
    assert!(backend.rows("confirmations").is_empty());

    let body = dashboard(&client, &admin).await;
    assert!(body.contains("Confirmação removida!"));
    assert!(body.contains("Ana foi removido da lista."));
}

#[tokio::test]
async fn test_delete_missing_confirmation() {
    let (_backend, admin, client) = setup().await;

    post(&client, format!("{admin}/confirmations/999/delete"), &[]).await;
    assert!(dashboard(&client, &admin).await.contains("Confirmação não encontrada."));
}

// ============================================================================
// Gifts
// ============================================================================

#[tokio::test]
async fn test_gift_lifecycle() {
    let (backend, admin, client) = setup().await;
    backend.seed_gift("Livros", true, 4);

    let response = post(
        &client,
        format!("{admin}/gifts"),
        &[("name", " Blocos "), ("description", "  ")],
    )
    .await;
    assert_eq!(location(&response), "/");

    let gifts = backend.rows("gifts");
    assert_eq!(gifts.len(), 2);
    let created = &gifts[1];
    assert_eq!(created["name"], json!("Blocos"));
    assert_eq!(created["description"], json!(null));
    assert_eq!(created["sort_order"], json!(5));
    assert_eq!(created["is_active"], json!(true));
    let id = created["id"].as_str().expect("gift id").to_string();

    let edit = client
        .get(format!("{admin}/gifts/{id}/edit"))
        .send()
        .await
        .expect("edit form");
    assert_eq!(edit.status(), StatusCode::OK);
    assert!(edit.text().await.expect("body").contains("Blocos"));

    post(
        &client,
        format!("{admin}/gifts/{id}"),
        &[("name", "Blocos grandes"), ("description", "de montar")],
    )
    .await;
    let updated = backend.rows("gifts")[1].clone();
    assert_eq!(updated["name"], json!("Blocos grandes"));
    assert_eq!(updated["description"], json!("de montar"));

    post(&client, format!("{admin}/gifts/{id}/toggle"), &[]).await;
    assert_eq!(backend.rows("gifts")[1]["is_active"], json!(false));

    post(&client, format!("{admin}/gifts/{id}/delete"), &[]).await;
    assert_eq!(backend.rows("gifts").len(), 1);
}

#[tokio::test]
async fn test_gift_requires_name() {
    let (backend, admin, client) = setup().await;

    post(&client, format!("{admin}/gifts"), &[("name", "  "), ("description", "")]).await;
    assert!(backend.writes().is_empty());
    assert!(dashboard(&client, &admin).await.contains("Informe o nome do presente."));
}

// ============================================================================
// Guest list
// ============================================================================

#[tokio::test]
async fn test_guest_list_alphabetical() {
    let (backend, admin, client) = setup().await;
    backend.seed_confirmation(json!({ "name": "bruno", "will_attend": true }));
    backend.seed_confirmation(json!({ "name": "Álvaro", "will_attend": true }));
    backend.seed_confirmation(json!({ "name": "Não Vem", "will_attend": false }));
    backend.seed_confirmation(json!({ "name": "Carla", "will_attend": true }));

    let response = client
        .get(format!("{admin}/guest-list?order=alphabetical"))
        .send()
        .await
        .expect("guest list");
    assert_eq!(response.status(), StatusCode::OK);
    let csp = response
        .headers()
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(csp.contains("'unsafe-inline'"));

    let body = response.text().await.expect("body");
    assert!(body.contains("Ordem alfabética"));
    assert!(!body.contains("Não Vem"));
    let alvaro = body.find("Álvaro").expect("Álvaro listed");
    let bruno = body.find("bruno").expect("bruno listed");
    let carla = body.find("Carla").expect("Carla listed");
    assert!(alvaro < bruno && bruno < carla);
}

#[tokio::test]
async fn test_guest_list_original_order_is_newest_first() {
    let (backend, admin, client) = setup().await;
    backend.seed_confirmation(json!({ "name": "Primeiro", "will_attend": true }));
    backend.seed_confirmation(json!({ "name": "Segundo", "will_attend": true }));

    let body = client
        .get(format!("{admin}/guest-list"))
        .send()
        .await
        .expect("guest list")
        .text()
        .await
        .expect("body");

    assert!(body.contains("Ordem de confirmação"));
    assert!(body.find("Segundo") < body.find("Primeiro"));
}

#[tokio::test]
async fn test_guest_list_failure_returns_to_dashboard() {
    let (backend, admin, client) = setup().await;
    backend.fail_table("confirmations");

    let response = client
        .get(format!("{admin}/guest-list"))
        .send()
        .await
        .expect("guest list");
    assert_eq!(location(&response), "/");
    assert!(dashboard(&client, &admin).await.contains("Erro ao gerar PDF"));
}
