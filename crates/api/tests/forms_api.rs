//! HTTP-level integration tests for the `/forms` API endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! built with the preset form registry.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, post_raw};
use serde_json::json;

fn valid_contact() -> serde_json::Value {
    json!({
        "name": "  Maria Silva ",
        "email": "Maria@Example.com",
        "phone": "31995352139",
        "message": "Gostaria de agendar uma limpeza do split."
    })
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/forms lists the presets with their fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_forms() {
    let response = get(build_test_app(), "/api/v1/forms").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data should be an array");
    let names: Vec<_> = data.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["contact", "blog_post", "quote_request", "newsletter"]);

    let contact_fields = data[0]["fields"].as_array().unwrap();
    assert_eq!(contact_fields.len(), 4);
    assert_eq!(contact_fields[1]["name"], "email");
    assert_eq!(contact_fields[1]["required"], true);
    assert_eq!(contact_fields[1]["type"], "email");
    assert_eq!(contact_fields[2]["name"], "phone");
    assert_eq!(contact_fields[2]["required"], false);
    assert!(contact_fields[0].get("type").is_none());
}

// ---------------------------------------------------------------------------
// Test: POST /validate with a valid payload returns the sanitized record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_valid_contact() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/contact/validate",
        valid_contact(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["is_valid"], true);
    assert_eq!(data["errors"], json!({}));
    assert_eq!(data["sanitized"]["name"], "Maria Silva");
    assert_eq!(data["sanitized"]["email"], "maria@example.com");
    assert_eq!(data["sanitized"]["phone"], "(31) 99535-2139");
}

// ---------------------------------------------------------------------------
// Test: POST /validate with an invalid payload is still a 200 dry run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_invalid_contact_is_dry_run() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/contact/validate",
        json!({"email": "not-an-email"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["is_valid"], false);
    assert_eq!(data["errors"]["email"], "E-mail inválido");
    assert_eq!(data["errors"]["name"], "Este campo é obrigatório");
    assert_eq!(data["errors"]["message"], "Este campo é obrigatório");
    // Optional and absent: passed through, never an error.
    assert_eq!(data["sanitized"]["phone"], serde_json::Value::Null);
    assert!(data["errors"].get("phone").is_none());
}

// ---------------------------------------------------------------------------
// Test: ?locale=en switches engine messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_with_english_locale() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/newsletter/validate?locale=en",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["errors"]["email"], "This field is required");
}

#[tokio::test]
async fn test_unsupported_locale_is_bad_request() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/newsletter/validate?locale=fr",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: unknown form returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_form_returns_404() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/careers/validate",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: body must be a JSON object
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/contact/validate",
        json!(["name", "email"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Request body must be a JSON object");
}

#[tokio::test]
async fn test_malformed_json_is_rejected_with_json_error() {
    let response = post_raw(
        build_test_app(),
        "/api/v1/forms/contact/validate",
        "{\"name\": ",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let huge = json!({ "message": "a".repeat(16 * 1024) });
    let response = post_json(build_test_app(), "/api/v1/forms/contact/validate", huge).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json = body_json(response).await;
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
}

// ---------------------------------------------------------------------------
// Test: POST /submit accepts valid payloads with 202
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_valid_contact() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/contact/submit",
        valid_contact(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["form"], "contact");
    assert_eq!(json["data"]["sanitized"]["phone"], "(31) 99535-2139");
}

// ---------------------------------------------------------------------------
// Test: POST /submit rejects invalid payloads with 422 and per-field errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_invalid_quote_request() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/quote_request/submit",
        json!({
            "name": "Carlos",
            "email": "carlos@example.com",
            "phone": "(31) 3535-2139",
            "service": "painting",
            "units": "muitos"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["service"], "Campo inválido");
    assert_eq!(json["fields"]["units"], "Deve ser um número");
    assert!(json["fields"].get("name").is_none());
}

// ---------------------------------------------------------------------------
// Test: blog post slugs are normalized on submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_blog_post_normalizes_slug_and_strips_scripts() {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/blog_post/submit",
        json!({
            "title": "Olá Mundo",
            "slug": "Olá Mundo!",
            "content": "<script>alert(1)</script>Manutenção preventiva reduz o consumo de energia do seu ar-condicionado.",
            "excerpt": "  Dicas rápidas  "
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    let sanitized = &json["data"]["sanitized"];
    assert_eq!(sanitized["slug"], "ola-mundo");
    assert_eq!(sanitized["excerpt"], "Dicas rápidas");
    assert!(!sanitized["content"].as_str().unwrap().contains("<script>"));
}
