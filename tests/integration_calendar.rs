mod common;

use axum::http::StatusCode;
use common::{get, seed_sample, setup_test_app};
use jaarplan_db::ACTIVITIES;
use serde_json::{Value, json};

fn titles(instances: &Value) -> Vec<String> {
    instances
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_empty_store_serves_empty_calendar() {
    let (app, _) = setup_test_app();

    let (status, body) = get(&app, "/api/calendar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert!(body["instances"].as_array().unwrap().is_empty());
    assert!(body["warnings"]["orphans"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_calendar_lists_instances_with_warnings() {
    let (app, state) = setup_test_app();
    seed_sample(&app).await;

    let (status, body) = get(&app, "/api/calendar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(
        titles(&body["instances"]),
        vec!["Kick-off", "Projectweek", "Projectweek", "Portfolio inleveren"]
    );
    assert_eq!(body["instances"][2]["week_code"], "1.2");
    assert_eq!(body["instances"][3]["semester"], 2);
    assert_eq!(body["instances"][3]["week_start"], "2026-02-02");
    assert_eq!(body["warnings"]["orphans"].as_array().unwrap().len(), 2);
    assert_eq!(body["warnings"]["dropped_activities"].as_array().unwrap().len(), 1);
    assert!(body["warnings"]["dropped_weeks"].as_array().unwrap().is_empty());
    assert_eq!(body["revision"], state.store.revision());
}

#[tokio::test]
async fn test_student_branch_filters_on_subject() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (_, body) = get(&app, "/api/calendar?role=studenten&subject=pzw").await;
    assert_eq!(titles(&body["instances"]), vec!["Portfolio inleveren"]);
}

#[tokio::test]
async fn test_staff_role_only_matches_staff_activities() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (_, body) = get(&app, "/api/calendar?role=Docent").await;
    assert_eq!(titles(&body["instances"]), vec!["Kick-off"]);
    assert_eq!(body["applied_filters"]["role"][0], "docent");
}

#[tokio::test]
async fn test_mixed_roles_union_branches() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (_, body) = get(&app, "/api/calendar?role=studenten,docent&subject=pzw").await;
    assert_eq!(
        titles(&body["instances"]),
        vec!["Kick-off", "Portfolio inleveren"]
    );
}

#[tokio::test]
async fn test_semester_and_phase_filters() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (_, body) = get(&app, "/api/calendar?semester=2").await;
    assert_eq!(titles(&body["instances"]), vec!["Portfolio inleveren"]);

    let (_, body) = get(&app, "/api/calendar?phase=p").await;
    assert_eq!(titles(&body["instances"]), vec!["Projectweek", "Projectweek"]);

    let (_, body) = get(&app, "/api/calendar?phase=algemeen&semester=1").await;
    assert_eq!(titles(&body["instances"]), vec!["Kick-off"]);
}

#[tokio::test]
async fn test_unknown_options_are_ignored() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (status, body) = get(&app, "/api/calendar?role=conci%C3%ABrge&semester=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert!(body["applied_filters"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_weeks_grouping_keeps_every_week() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (status, body) = get(&app, "/api/calendar/weeks?role=studenten").await;
    assert_eq!(status, StatusCode::OK);
    let weeks = body["weeks"].as_array().unwrap();
    let codes: Vec<&str> = weeks
        .iter()
        .map(|w| w["week"]["week_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["1.1", "1.2", "Herfstvakantie", "1.3", "2.1", "2.2"]);

    assert_eq!(titles(&weeks[0]["instances"]), vec!["Projectweek"]);
    assert_eq!(weeks[2]["week"]["is_vacation"], true);
    assert!(weeks[2]["instances"].as_array().unwrap().is_empty());
    assert!(weeks[3]["instances"].as_array().unwrap().is_empty());
    assert_eq!(titles(&weeks[4]["instances"]), vec!["Portfolio inleveren"]);
}

#[tokio::test]
async fn test_options_report_counts_and_availability() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (status, body) = get(&app, "/api/calendar/options?role=docent").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matching"], 1);

    let dimension = |key: &str| -> Vec<Value> {
        body["dimensions"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["dimension"] == key)
            .unwrap()["options"]
            .as_array()
            .unwrap()
            .clone()
    };

    let roles = dimension("role");
    let labels: Vec<&str> = roles.iter().map(|o| o["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Docent", "CC", "Studenten"]);
    assert_eq!(roles[0]["selected"], true);
    assert_eq!(roles[0]["count"], 1);
    assert_eq!(roles[2]["selected"], false);
    assert_eq!(roles[2]["count"], 4);

    let phases = dimension("phase");
    let h1 = phases.iter().find(|o| o["value"] == "h1").unwrap();
    assert_eq!(h1["available"], false);
    assert_eq!(h1["count"], 0);

    let processes = dimension("process");
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0]["value"], "onderwijs");
    assert_eq!(processes[0]["available"], true);
}

#[tokio::test]
async fn test_orphans_endpoint() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (status, body) = get(&app, "/api/calendar/orphans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body["orphans"]), vec!["Introductie", "Teamdag"]);
    assert_eq!(titles(&body["dropped_activities"]), vec!["Kapot"]);
    assert!(
        body["dropped_activities"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("start date")
    );
}

#[tokio::test]
async fn test_undecodable_document_does_not_blank_calendar() {
    let (app, state) = setup_test_app();
    seed_sample(&app).await;
    state
        .store
        .append(
            ACTIVITIES,
            &[json!({ "id": "row-17", "title": "Handmatig", "start_date": "2-sep", "end_date": "2-sep" })],
        )
        .await
        .unwrap();
    state.projection.refresh().await.unwrap();

    let (status, body) = get(&app, "/api/calendar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    let skipped = body["warnings"]["undecodable_documents"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["collection"], "activities");
    assert_eq!(skipped[0]["id"], "row-17");

    let (_, body) = get(&app, "/api/calendar/orphans").await;
    assert_eq!(body["undecodable_documents"][0]["id"], "row-17");
}

#[tokio::test]
async fn test_current_week_lookup() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (_, body) = get(&app, "/api/calendar/current-week?date=2025-09-10").await;
    assert_eq!(body["date"], "2025-09-10");
    assert_eq!(body["week"]["week_code"], "1.2");

    let (_, body) = get(&app, "/api/calendar/current-week?date=2025-09-17").await;
    assert_eq!(body["week"]["week_label"], "Herfstvakantie");

    let (_, body) = get(&app, "/api/calendar/current-week?date=2025-12-01").await;
    assert!(body["week"].is_null());

    let (status, body) = get(&app, "/api/calendar/current-week?date=10-sep").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_current_week_defaults_to_today() {
    let (app, _) = setup_test_app();

    let (status, body) = get(&app, "/api/calendar/current-week").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["date"].is_string());
    assert!(body["week"].is_null());
}

#[tokio::test]
async fn test_deadlines_from_date() {
    let (app, _) = setup_test_app();
    seed_sample(&app).await;

    let (status, body) = get(&app, "/api/calendar/deadlines?from=2025-09-01").await;
    assert_eq!(status, StatusCode::OK);
    let deadlines = body["deadlines"].as_array().unwrap();
    assert_eq!(deadlines.len(), 1);
    assert_eq!(deadlines[0]["title"], "Portfolio inleveren");
    assert_eq!(deadlines[0]["due_on"], "2026-02-05");
    assert_eq!(deadlines[0]["end_time"], "17:00");
    assert_eq!(deadlines[0]["week_code"], "2.1");

    let (_, body) = get(&app, "/api/calendar/deadlines?from=2026-02-06").await;
    assert!(body["deadlines"].as_array().unwrap().is_empty());

    let (status, _) = get(&app, "/api/calendar/deadlines?from=2026-13-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = setup_test_app();

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/calendar/options"].is_object());
}
