mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::{app, send};

async fn create_team_sync(app: &axum::Router) -> serde_json::Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/events",
        Some(json!({
            "title": "Team Sync",
            "memo": "Quarterly planning",
            "candidates": ["Mon 10am", "Tue 2pm"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_create_and_fetch_event() {
    let app = app();
    let created = create_team_sync(&app).await;
    let id = created["event"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["event"]["candidates"][0]["label"], "Mon 10am");
    assert_eq!(
        created["links"]["respond"],
        format!("https://poll.example/#/event/{}/respond", id)
    );

    let (status, body) = send(&app, Method::GET, &format!("/api/events/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Team Sync");
    assert_eq!(body["tally"]["best"], json!([]));
    assert_eq!(body["tally"]["slots"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_event_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/events/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);

    let (status, _) = send(&app, Method::GET, "/api/events/does-not-exist/cached", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/status/last-error", None).await;
    assert_eq!(body["last_error"], json!(null));
}

#[tokio::test]
async fn test_validation_errors_are_400() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({"title": "", "candidates": ["Mon"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("title"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({"title": "Lunch", "candidates": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_response_lifecycle() {
    let app = app();
    let created = create_team_sync(&app).await;
    let id = created["event"]["id"].as_str().unwrap().to_string();
    let a = created["event"]["candidates"][0]["id"].as_str().unwrap().to_string();
    let b = created["event"]["candidates"][1]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/events/{}/responses", id),
        Some(json!({
            "name": "Ana",
            "comment": "either works",
            "availability": {a.as_str(): "available", b.as_str(): null}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tally"]["best"], json!([a.clone()]));
    assert_eq!(body["event"]["participants"][0]["availability"], json!({a.as_str(): "available"}));
    let response_id = body["event"]["participants"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/events/{}/responses/{}", id, response_id),
        Some(json!({"name": "Ana", "availability": {b.as_str(): "maybe"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tally"]["best"], json!([b.clone()]));

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/events/{}/cached", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["participants"][0]["availability"], json!({b.as_str(): "maybe"}));

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/events/{}/responses/{}", id, response_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["participants"], json!([]));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/events/{}/responses/{}", id, response_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_participant_name_is_400() {
    let app = app();
    let created = create_team_sync(&app).await;
    let id = created["event"]["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/events/{}/responses", id),
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_share_and_snapshot_links() {
    let app = app();
    let created = create_team_sync(&app).await;
    let id = created["event"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/events/{}/share?respond=true&shorten=true", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], format!("https://poll.example/#/event/{}/respond", id));
    assert_eq!(body["shortened"], false);

    let (status, body) = send(&app, Method::GET, &format!("/api/events/{}/snapshot", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("https://poll.example/#/s/"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/snapshots/decode",
        Some(json!({"snapshot": url})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["id"], id.as_str());
    assert_eq!(body["event"]["title"], "Team Sync");

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/snapshots/decode",
        Some(json!({"snapshot": "%%%"})),
    )
    .await;
    assert_eq!(body["event"], json!(null));
}

#[tokio::test]
async fn test_view_route() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/view?fragment=%23%2Fevent%2Fabc%2Frespond", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], json!({"view": "responding", "event_id": "abc"}));
    assert_eq!(body["fragment"], "#/event/abc/respond");

    let (_, body) = send(&app, Method::GET, "/api/view?fragment=%23%2Fwhatever", None).await;
    assert_eq!(body["state"], json!({"view": "home"}));
    assert_eq!(body["fragment"], "#/");

    let (_, body) = send(&app, Method::GET, "/api/view", None).await;
    assert_eq!(body["state"]["view"], "home");
}
