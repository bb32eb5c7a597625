use axum::http::{StatusCode, header};
use uuid::Uuid;

use pantry_auth_types::cookie::PANTRY_TOKEN;
use pantry_testing::auth::MockAuth;

use crate::helpers::{assert_error, empty_request, json_request, send};

// ── Ambient ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_check() {
    let response = send(empty_request("GET", "/healthz", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_not_be_ready_without_database() {
    let response = send(empty_request("GET", "/readyz", None)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id() {
    let response = send(empty_request("GET", "/healthz", None)).await;
    let id = response.headers().get("x-request-id").unwrap();
    assert!(id.to_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn should_return_404_for_unknown_route() {
    let response = send(empty_request("GET", "/api/nowhere", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_token_for_me() {
    let response = send(empty_request("GET", "/api/users/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_invalid_token_even_on_public_routes() {
    let response = send(empty_request(
        "GET",
        "/api/recipes",
        Some("Token not-a-jwt"),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_token_for_mutations() {
    let response = send(json_request("POST", "/api/recipes", None, "{}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(empty_request("GET", "/api/recipes/download_shopping_cart", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_accept_token_from_cookie() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let request = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/users/{}/subscribe", auth.user_id))
        .header(header::COOKIE, format!("{PANTRY_TOKEN}={}", auth.token()))
        .body(axum::body::Body::empty())
        .unwrap();
    assert_error(send(request).await, StatusCode::BAD_REQUEST, "SELF_FOLLOW").await;
}

#[tokio::test]
async fn should_clear_cookie_on_logout() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let response = send(empty_request(
        "POST",
        "/api/auth/token/logout",
        Some(&auth.authorization()),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with(&format!("{PANTRY_TOKEN}=")));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn should_leave_bearer_token_usable_after_logout() {
    // Tokens are stateless: logout drops the cookie, not the token.
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let response = send(empty_request(
        "POST",
        "/api/auth/token/logout",
        Some(&auth.authorization()),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let uri = format!("/api/users/{}/subscribe", auth.user_id);
    let response = send(empty_request("POST", &uri, Some(&auth.authorization()))).await;
    assert_error(response, StatusCode::BAD_REQUEST, "SELF_FOLLOW").await;
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_self_follow_on_both_prefixes() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    for prefix in ["users", "chefs"] {
        for action in ["subscribe", "follow"] {
            let uri = format!("/api/{prefix}/{}/{action}", auth.user_id);
            let response = send(empty_request("POST", &uri, Some(&auth.authorization()))).await;
            assert_error(response, StatusCode::BAD_REQUEST, "SELF_FOLLOW").await;
        }
    }
}

#[tokio::test]
async fn should_reject_recipe_without_ingredients() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let body = r#"{
        "ingredients": [],
        "tags": [1],
        "image": "data:image/png;base64,AAAA",
        "name": "Toast",
        "text": "Toast it.",
        "cooking_time": 5
    }"#;
    let response = send(json_request(
        "POST",
        "/api/recipes",
        Some(&auth.authorization()),
        body,
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "EMPTY_INGREDIENTS").await;
}

#[tokio::test]
async fn should_reject_duplicate_products_on_dish_alias() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let body = r#"{
        "products": [{"id": 1, "quantity": 2}, {"id": 1, "quantity": 3}],
        "categories": [1],
        "image": "data:image/png;base64,AAAA",
        "title": "Toast",
        "description": "Toast it.",
        "prep_time": 5
    }"#;
    let response = send(json_request(
        "POST",
        "/api/dishes",
        Some(&auth.authorization()),
        body,
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "DUPLICATE_INGREDIENTS").await;
}

#[tokio::test]
async fn should_reject_empty_patches() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);

    let response = send(json_request(
        "PATCH",
        "/api/users/me",
        Some(&auth.authorization()),
        "{}",
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "MISSING_DATA").await;

    let response = send(json_request(
        "PATCH",
        "/api/recipes/1",
        Some(&auth.authorization()),
        "{}",
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "MISSING_DATA").await;
}

#[tokio::test]
async fn should_forbid_catalog_writes_for_non_admins() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);

    let response = send(json_request(
        "POST",
        "/api/categories",
        Some(&auth.authorization()),
        r##"{"name": "Breakfast", "color": "#E26C2D", "slug": "breakfast"}"##,
    ))
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let response = send(json_request(
        "POST",
        "/api/products",
        Some(&auth.authorization()),
        r#"{"name": "flour", "unit": "g"}"#,
    ))
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn should_validate_tag_color_for_admins() {
    let auth = MockAuth::admin(Uuid::now_v7());
    let response = send(json_request(
        "POST",
        "/api/tags",
        Some(&auth.authorization()),
        r#"{"name": "Breakfast", "color": "orange", "slug": "breakfast"}"#,
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_COLOR").await;
}

#[tokio::test]
async fn should_reject_mismatched_password_confirmation() {
    let body = r#"{
        "email": "cook@example.com",
        "username": "cook",
        "first_name": "Ann",
        "last_name": "Cook",
        "password": "long-password",
        "password_confirm": "other-password"
    }"#;
    let response = send(json_request("POST", "/api/users", None, body)).await;
    assert_error(response, StatusCode::BAD_REQUEST, "PASSWORD_MISMATCH").await;
}

// ── Malformed input ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_treat_missing_ingredients_key_as_empty() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let body = r#"{
        "tags": [1],
        "image": "data:image/png;base64,AAAA",
        "name": "Toast",
        "text": "Toast it.",
        "cooking_time": 5
    }"#;
    let response = send(json_request(
        "POST",
        "/api/recipes",
        Some(&auth.authorization()),
        body,
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "EMPTY_INGREDIENTS").await;
}

#[tokio::test]
async fn should_reject_non_json_body_with_error_body() {
    let auth = MockAuth::new(Uuid::now_v7(), 0);
    let response = send(json_request(
        "POST",
        "/api/recipes",
        Some(&auth.authorization()),
        "name=Toast",
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_BODY").await;
}

#[tokio::test]
async fn should_reject_incomplete_registration_with_error_body() {
    let response = send(json_request(
        "POST",
        "/api/users",
        None,
        r#"{"email":"a@b.c"}"#,
    ))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["kind"], "INVALID_BODY");
    assert!(json["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn should_reject_body_without_json_content_type() {
    let response = send(
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/auth/token/login")
            .body(axum::body::Body::from(r#"{"email":"a@b.c","password":"x"}"#))
            .unwrap(),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_BODY").await;
}

#[tokio::test]
async fn should_reject_malformed_query_with_error_body() {
    let response = send(empty_request("GET", "/api/recipes?page=first", None)).await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_QUERY").await;
}
