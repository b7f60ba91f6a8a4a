use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use gather_server::config::Config;
use gather_server::routes::create_routes;
use gather_server::state::AppState;
use gather_server::store::MemoryStore;

const HIKING_FORM: &str = "name=Hiking&description=A+long+walk+through+the+hills\
&start=15.08.2024+18%3A00&end=15.08.2024+21%3A00&type_id=2";

fn test_app() -> Router {
    let config = Config::from_lookup(|_| None).expect("config");
    create_routes(AppState::new(Arc::new(MemoryStore::new())), &config)
}

fn request(method: &str, uri: &str, user: Option<(Uuid, &str)>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, name)) = user {
        builder = builder
            .header("x-user-id", id.to_string())
            .header("x-user-name", name);
    }
    match form {
        Some(form) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[header::LOCATION]
        .to_str()
        .expect("location")
}

#[tokio::test]
async fn health_reports_store_backend() {
    let response = test_app()
        .oneshot(request("GET", "/health", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let json = json_body(response).await;
    assert_eq!(json["data"]["store"], "memory");
}

#[tokio::test]
async fn hiking_scenario_over_http() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");
    let bob = (Uuid::new_v4(), "bob");

    let response = app
        .clone()
        .oneshot(request("POST", "/event/add", Some(alice), Some(HIKING_FORM)))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/event/all");

    let all = json_body(
        app.clone()
            .oneshot(request("GET", "/event/all", None, None))
            .await
            .expect("all"),
    )
    .await;
    assert_eq!(all["data"][0]["name"], "Hiking");
    assert_eq!(all["data"][0]["type"], "Fun");
    assert_eq!(all["data"][0]["organiser"], "alice");
    assert_eq!(all["data"][0]["start"], "15.08.2024 18:00");
    let id = all["data"][0]["id"].as_i64().expect("id");

    let response = app
        .clone()
        .oneshot(request("POST", &format!("/event/join?id={id}"), Some(bob), None))
        .await
        .expect("join");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/event/joined");

    let joined = json_body(
        app.clone()
            .oneshot(request("GET", "/event/joined", Some(bob), None))
            .await
            .expect("joined"),
    )
    .await;
    assert_eq!(joined["data"][0]["name"], "Hiking");

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/event/leave?id={id}"), Some(bob), None))
        .await
        .expect("leave");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/event/all");

    let joined = json_body(
        app.clone()
            .oneshot(request("GET", "/event/joined", Some(bob), None))
            .await
            .expect("joined"),
    )
    .await;
    assert_eq!(joined["data"].as_array().map(Vec::len), Some(0));

    let response = app
        .oneshot(request("POST", &format!("/event/leave?id={id}"), Some(bob), None))
        .await
        .expect("leave again");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_twice_is_rejected() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");
    app.clone()
        .oneshot(request("POST", "/event/add", Some(alice), Some(HIKING_FORM)))
        .await
        .expect("add");

    let first = app
        .clone()
        .oneshot(request("POST", "/event/create?id=1", Some(alice), None))
        .await
        .expect("create");
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = app
        .oneshot(request("POST", "/event/create?id=1", Some(alice), None))
        .await
        .expect("create again");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn anonymous_requests_are_rejected_where_identity_is_needed() {
    let app = test_app();

    for (method, uri) in [
        ("POST", "/event/join?id=1"),
        ("GET", "/event/joined"),
        ("GET", "/event/add"),
        ("GET", "/event/edit?id=1"),
    ] {
        let response = app
            .clone()
            .oneshot(request(method, uri, None, None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn missing_event_is_bad_request() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");

    let response = app
        .clone()
        .oneshot(request("GET", "/event/details?id=404", None, None))
        .await
        .expect("details");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");

    let response = app
        .oneshot(request("POST", "/event/join?id=404", Some(alice), None))
        .await
        .expect("join");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_add_returns_form_with_types() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");
    let form = HIKING_FORM.replace("start=15.08.2024+18%3A00", "start=31%2F02%2F2099");

    let response = app
        .clone()
        .oneshot(request("POST", "/event/add", Some(alice), Some(&form)))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["details"]["start"], "31/02/2099");
    assert_eq!(json["error"]["details"]["types"].as_array().map(Vec::len), Some(4));
    assert!(json["error"]["details"]["errors"]["start"].is_array());

    let all = json_body(
        app.oneshot(request("GET", "/event/all", None, None))
            .await
            .expect("all"),
    )
    .await;
    assert_eq!(all["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn edit_checks_organiser() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");
    let bob = (Uuid::new_v4(), "bob");
    app.clone()
        .oneshot(request("POST", "/event/add", Some(alice), Some(HIKING_FORM)))
        .await
        .expect("add");

    let response = app
        .clone()
        .oneshot(request("GET", "/event/edit?id=1", Some(bob), None))
        .await
        .expect("edit form");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(request("POST", "/event/edit?id=1", Some(bob), Some(HIKING_FORM)))
        .await
        .expect("edit");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request("GET", "/event/edit?id=1", Some(alice), None))
        .await
        .expect("edit form");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["name"], "Hiking");
    assert_eq!(json["data"]["end"], "15.08.2024 21:00");

    let renamed = HIKING_FORM.replace("name=Hiking", "name=Sunset+hike");
    let response = app
        .clone()
        .oneshot(request("POST", "/event/edit?id=1", Some(alice), Some(&renamed)))
        .await
        .expect("edit");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let details = json_body(
        app.oneshot(request("GET", "/event/details?id=1", None, None))
            .await
            .expect("details"),
    )
    .await;
    assert_eq!(details["data"]["name"], "Sunset hike");
    assert_eq!(details["data"]["organiser"], "alice");
}

#[tokio::test]
async fn non_numeric_type_returns_form_with_field_errors() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");
    let form = HIKING_FORM
        .replace("type_id=2", "type_id=abc")
        .replace("end=15.08.2024+21%3A00", "end=nope");

    let response = app
        .oneshot(request("POST", "/event/add", Some(alice), Some(&form)))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    let details = &json["error"]["details"];
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(details["type_id"], "abc");
    assert_eq!(details["name"], "Hiking");
    assert_eq!(details["types"].as_array().map(Vec::len), Some(4));
    assert!(details["errors"]["type_id"].is_array());
    assert!(details["errors"]["end"].is_array());
}

#[tokio::test]
async fn malformed_event_id_uses_error_envelope() {
    let app = test_app();
    let alice = (Uuid::new_v4(), "alice");

    for (method, uri, user) in [
        ("GET", "/event/details", None),
        ("GET", "/event/details?id=abc", None),
        ("POST", "/event/join?id=", Some(alice)),
        ("GET", "/event/edit?id=1.5", Some(alice)),
    ] {
        let response = app
            .clone()
            .oneshot(request(method, uri, user, None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");

        let json = json_body(response).await;
        assert_eq!(json["success"], false, "{method} {uri}");
        assert_eq!(json["error"]["code"], "BAD_REQUEST", "{method} {uri}");
    }
}

#[tokio::test]
async fn long_user_name_is_stored_cut_to_fit() {
    let app = test_app();
    let long = "a".repeat(300);
    let alice = (Uuid::new_v4(), long.as_str());

    let response = app
        .clone()
        .oneshot(request("POST", "/event/add", Some(alice), Some(HIKING_FORM)))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let details = json_body(
        app.oneshot(request("GET", "/event/details?id=1", None, None))
            .await
            .expect("details"),
    )
    .await;
    assert_eq!(details["data"]["organiser"], "a".repeat(256));
}
