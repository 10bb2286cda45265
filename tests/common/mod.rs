use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use jaarplan::router::init_router;
use jaarplan::state::AppState;
use jaarplan_auth::{PERMISSION_IMPORT, create_access_token};
use jaarplan_config::{CalendarConfig, CorsConfig, JwtConfig};
use jaarplan_db::DocumentStore;
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

/// App over a fresh in-memory store for academic year 2025/2026.
pub fn setup_test_app() -> (Router, AppState) {
    let state = AppState::new(
        DocumentStore::in_memory(),
        test_jwt_config(),
        CorsConfig::from_origins("*"),
        CalendarConfig::default(),
    );
    (init_router(state.clone()), state)
}

pub fn import_token() -> String {
    create_access_token(
        "planner@school.nl",
        vec![PERMISSION_IMPORT.to_string()],
        &test_jwt_config(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn read_only_token() -> String {
    create_access_token(
        "viewer@school.nl",
        vec!["calendar:read".to_string()],
        &test_jwt_config(),
    )
    .unwrap()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

pub fn sample_weeks() -> Value {
    json!({
        "weeks": [
            { "label": "Week", "start_date": "Datum" },
            { "label": "Semester 1", "start_date": "" },
            { "label": "1.1 Start", "start_date": "1-sep" },
            { "label": "1.2", "start_date": "8-sep" },
            { "label": "Herfstvakantie", "start_date": "15-sep" },
            { "label": "1.3", "start_date": "22-sep" },
            { "label": "Semester 2", "start_date": "" },
            { "label": "2.1", "start_date": "2-feb" },
            { "label": "2.2", "start_date": "9-feb" }
        ]
    })
}

#[allow(dead_code)]
fn activity(title: &str, start: &str, end: &str, role: &str) -> Value {
    json!({
        "title": title,
        "start_date": start,
        "end_date": end,
        "start_time": null,
        "end_time": null,
        "role": role,
        "deadline": null
    })
}

#[allow(dead_code)]
pub fn sample_activities() -> Value {
    let mut kickoff = activity("Kick-off", "1-sep", "1-sep", "Docent; CC");
    kickoff["processes"] = json!({ "onderwijs": true });

    let mut project = activity("Projectweek", "3-sep", "9-sep", "Studenten");
    project["subjects"] = json!({ "bvp": true });
    project["phases"] = json!({ "p": true });

    let mut portfolio = activity("Portfolio inleveren", "5-feb-2026", "5-feb-2026", "Studenten");
    portfolio["subjects"] = json!({ "pzw": true });
    portfolio["deadline"] = json!("v");
    portfolio["end_time"] = json!("17:00");

    json!({
        "activities": [
            kickoff,
            project,
            portfolio,
            activity("Introductie", "20-aug", "22-aug", "Studenten"),
            activity("Teamdag", "16-sep", "17-sep", "Docent"),
            activity("Kapot", "31-sep", "1-okt", "Docent"),
        ]
    })
}

/// Imports [`sample_weeks`] and [`sample_activities`].
#[allow(dead_code)]
pub async fn seed_sample(app: &Router) {
    let token = import_token();
    let (status, _) = send(app, "PUT", "/api/weeks", Some(&token), Some(sample_weeks())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        app,
        "PUT",
        "/api/activities",
        Some(&token),
        Some(sample_activities()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
