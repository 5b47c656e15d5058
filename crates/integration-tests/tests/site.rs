//! Integration tests for the public site.
//!
//! Each test starts its own mock backend and site server.

use invite_integration_tests::{MockBackend, client, spawn_site};
use reqwest::{StatusCode, header::LOCATION};
use serde_json::json;

const CLIENT_IP: &str = "203.0.113.10";

async fn setup() -> (MockBackend, String) {
    let backend = MockBackend::start().await;
    let site = spawn_site(&backend).await;
    (backend, site)
}

async fn post_rsvp(site: &str, form: &[(&str, &str)]) -> reqwest::Response {
    client()
        .post(format!("{site}/rsvp"))
        .header("x-forwarded-for", CLIENT_IP)
        .form(form)
        .send()
        .await
        .expect("post rsvp")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_landing_and_invitation() {
    let (_backend, site) = setup().await;
    let client = client();

    let landing = client.get(format!("{site}/")).send().await.expect("landing");
    assert_eq!(landing.status(), StatusCode::OK);
    assert!(
        landing
            .headers()
            .get("content-security-policy")
            .is_some()
    );
    let body = landing.text().await.expect("landing body");
    assert!(body.contains("Convite"));
    assert!(body.contains("/invitation"));

    let invitation = client
        .get(format!("{site}/invitation"))
        .send()
        .await
        .expect("invitation");
    assert_eq!(invitation.status(), StatusCode::OK);
    let body = invitation.text().await.expect("invitation body");
    assert!(body.contains("Henry"));
    for link in ["/rsvp", "/gifts", "/location"] {
        assert!(body.contains(link), "invitation should link to {link}");
    }
}

#[tokio::test]
async fn test_location_links() {
    let (_backend, site) = setup().await;

    let body = client()
        .get(format!("{site}/location"))
        .send()
        .await
        .expect("location")
        .text()
        .await
        .expect("location body");

    assert!(body.contains("https://www.google.com/maps/search/?api=1&#38;query="));
    assert!(body.contains("https://waze.com/ul?q="));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (_backend, site) = setup().await;
    let response = client()
        .get(format!("{site}/nao-existe"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Gifts
// ============================================================================

#[tokio::test]
async fn test_gifts_lists_active_in_order() {
    let (backend, site) = setup().await;
    backend.seed_gift("Livros", true, 2);
    backend.seed_gift("Escondido", false, 1);
    backend.seed_gift("Blocos", true, 1);

    let body = client()
        .get(format!("{site}/gifts"))
        .send()
        .await
        .expect("gifts")
        .text()
        .await
        .expect("gifts body");

    let blocos = body.find("Blocos").expect("Blocos listed");
    let livros = body.find("Livros").expect("Livros listed");
    assert!(blocos < livros);
    assert!(!body.contains("Escondido"));
}

#[tokio::test]
async fn test_gifts_fall_back_when_backend_fails() {
    let (backend, site) = setup().await;
    backend.fail_table("gifts");

    let response = client()
        .get(format!("{site}/gifts"))
        .send()
        .await
        .expect("gifts");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("gifts body");
    for name in invite_core::gifts::FALLBACK_GIFTS {
        assert!(body.contains(name), "fallback gift {name} missing");
    }
}

// ============================================================================
// RSVP
// ============================================================================

#[tokio::test]
async fn test_rsvp_form_resizes_from_query() {
    let (_backend, site) = setup().await;

    let body = client()
        .get(format!("{site}/rsvp?name=Ana&will_attend=true&number_of_people=3"))
        .send()
        .await
        .expect("rsvp form")
        .text()
        .await
        .expect("rsvp body");

    assert!(body.contains("value=\"Ana\""));
    assert!(body.contains("companion_name_1"));
    assert!(body.contains("companion_name_2"));
    assert!(!body.contains("companion_name_3"));
}

#[tokio::test]
async fn test_rsvp_attending_party_redirects_to_whatsapp() {
    let (backend, site) = setup().await;

    let response = post_rsvp(
        &site,
        &[
            ("name", "  Ana  "),
            ("will_attend", "true"),
            ("number_of_people", "3"),
            ("companion_name_1", "Bruno"),
            ("companion_name_2", "Caio"),
            ("companion_under_six_2", "on"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("https://wa.me/351931926460?text="));
    assert!(target.contains("Ana"));

    let rows = backend.rows("confirmations");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["name"], json!("Ana"));
    assert_eq!(row["will_attend"], json!(true));
    assert_eq!(row["number_of_people"], json!(3));
    assert_eq!(row["additional_names"], json!("Bruno, Caio"));
    assert_eq!(row["people_over_6"], json!(2));
    assert_eq!(row["has_children_over_6"], json!(true));
}

#[tokio::test]
async fn test_rsvp_declined_is_party_of_one() {
    let (backend, site) = setup().await;

    let response = post_rsvp(
        &site,
        &[
            ("name", "Duda"),
            ("will_attend", "false"),
            ("number_of_people", "4"),
            ("companion_name_1", "Ignorado"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("infelizmente"));

    let rows = backend.rows("confirmations");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["will_attend"], json!(false));
    assert_eq!(rows[0]["number_of_people"], json!(1));
    assert_eq!(rows[0]["additional_names"], json!(""));
}

#[tokio::test]
async fn test_rsvp_blank_name_writes_nothing() {
    let (backend, site) = setup().await;

    let response = post_rsvp(
        &site,
        &[("name", "   "), ("will_attend", "true"), ("number_of_people", "1")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await.expect("body");
    assert!(body.contains("Nome obrigatório"));
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn test_rsvp_invalid_size_is_rejected() {
    let (backend, site) = setup().await;

    for size in ["0", "11", "muitos"] {
        let response = post_rsvp(
            &site,
            &[("name", "Ana"), ("will_attend", "true"), ("number_of_people", size)],
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "size {size}");
    }
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn test_rsvp_paused_blocks_form_and_submit() {
    let (backend, site) = setup().await;
    backend.seed_settings(100, false);

    let form = client()
        .get(format!("{site}/rsvp"))
        .send()
        .await
        .expect("rsvp form");
    assert_eq!(form.status(), StatusCode::OK);
    assert!(form.text().await.expect("body").contains("Inscrições Pausadas"));

    let response = post_rsvp(
        &site,
        &[("name", "Ana"), ("will_attend", "true"), ("number_of_people", "1")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(backend.rows("confirmations").is_empty());
}

#[tokio::test]
async fn test_rsvp_open_when_settings_unreadable() {
    let (backend, site) = setup().await;
    backend.fail_table("admin_settings");

    let response = post_rsvp(
        &site,
        &[("name", "Ana"), ("will_attend", "true"), ("number_of_people", "1")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(backend.rows("confirmations").len(), 1);
}

#[tokio::test]
async fn test_rsvp_falls_back_to_baseline_columns() {
    let (backend, site) = setup().await;
    backend.drop_extended_columns();

    let response = post_rsvp(
        &site,
        &[
            ("name", "Ana"),
            ("will_attend", "true"),
            ("number_of_people", "2"),
            ("companion_name_1", "Bia"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let inserts: Vec<_> = backend
        .writes()
        .into_iter()
        .filter(|r| r.table == "confirmations")
        .collect();
    assert_eq!(inserts.len(), 2);
    assert_eq!(
        inserts[1].body,
        Some(json!({ "name": "Ana", "will_attend": true }))
    );
    assert_eq!(backend.rows("confirmations").len(), 1);
}

#[tokio::test]
async fn test_rsvp_backend_outage_shows_error() {
    let (backend, site) = setup().await;
    backend.fail_table("confirmations");

    let response = post_rsvp(
        &site,
        &[("name", "Ana"), ("will_attend", "true"), ("number_of_people", "1")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.text().await.expect("body");
    assert!(body.contains("Erro ao enviar confirmação"));
    assert!(body.contains("value=\"Ana\""));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_readiness_follows_backend() {
    let (backend, site) = setup().await;
    let client = client();

    let ready = client
        .get(format!("{site}/health/ready"))
        .send()
        .await
        .expect("ready");
    assert_eq!(ready.status(), StatusCode::OK);

    backend.fail_table("admin_settings");
    let down = client
        .get(format!("{site}/health/ready"))
        .send()
        .await
        .expect("ready");
    assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
}
