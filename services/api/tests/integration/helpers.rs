use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use pantry_api::infra::media::FsImageStore;
use pantry_api::router::build_router;
use pantry_api::state::AppState;
use pantry_auth_types::identity::JwtSecret;
use pantry_testing::auth::TEST_JWT_SECRET;

/// Router over a disconnected database. Only requests rejected before any
/// query can succeed against it.
pub fn test_router() -> Router {
    let state = AppState {
        db: DatabaseConnection::default(),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        media: FsImageStore::new(std::env::temp_dir().join("pantry-test-media"), "/media/"),
        cookie_domain: None,
        token_ttl: 3600,
    };
    build_router(state)
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(request: Request<Body>) -> Response<Body> {
    test_router().oneshot(request).await.unwrap()
}

/// Assert the `{kind, message}` error body and status.
pub async fn assert_error(response: Response<Body>, status: StatusCode, kind: &str) {
    assert_eq!(response.status(), status);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["kind"], kind);
}
