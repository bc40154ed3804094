use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use once_cell::sync::Lazy;
use serde_json::Value;
use tower::ServiceExt;

use api::auth::generate_jwt;
use api::routes::routes;
use db::models::user::{Model as UserModel, Role};
use db::test_utils::{setup_test_db, setup_test_stats_db};
use util::config::AppConfig;
use util::state::AppState;

/// Pins the signing secret and token lifetime once per test binary, before
/// the first token is minted or verified.
static TEST_CONFIG: Lazy<()> = Lazy::new(|| {
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_jwt_duration_minutes(60u64);
});

/// Builds the full router over fresh in-memory stores with all migrations
/// applied, mounted under `/api` exactly as in production. The state is
/// returned alongside so tests can seed data directly.
pub async fn make_test_app() -> (Router, AppState) {
    Lazy::force(&TEST_CONFIG);

    let db = setup_test_db().await;
    let stats_db = setup_test_stats_db().await;
    let state = AppState::new(db, stats_db);

    let app = Router::new()
        .nest("/api", routes(state.clone()))
        .fallback(api::routes::not_found);
    (app, state)
}

/// Creates a user with the password `password123` and returns it with a
/// freshly minted token.
pub async fn seed_user(
    state: &AppState,
    name: &str,
    email: &str,
    role: Role,
) -> (UserModel, String) {
    let user = UserModel::create(state.db(), name, email, "password123", role)
        .await
        .expect("Failed to create user");
    let (token, _) = generate_jwt(user.id, user.role);
    (user, token)
}

/// Sends one request through the router and decodes the JSON body. `token`
/// becomes a bearer header when present; an empty body stays empty.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request did not complete");
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body was not valid JSON")
    };

    (status, json)
}
