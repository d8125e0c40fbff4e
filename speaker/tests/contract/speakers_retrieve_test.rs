//! Contract Test: GET /retrieve/:id

use crate::support::{add_speaker, build_app, build_state, send, BASE_URL};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn retrieve_existing_speaker() {
    let state = build_state().await;
    let app = build_app(&state);

    let created = add_speaker(
        &app,
        json!({
            "name": "Grace Hopper",
            "organization": "US Navy",
            "biography": "COBOL",
            "picture": "http://img.example/grace.png",
            "twitterHandle": "@grace"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, &format!("/retrieve/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "Grace Hopper");
    assert_eq!(body["organization"], "US Navy");
    assert_eq!(body["biography"], "COBOL");
    assert_eq!(body["picture"], "http://img.example/grace.png");
    assert_eq!(body["twitterHandle"], "@grace");
    assert_eq!(body["links"]["self"], format!("{BASE_URL}/retrieve/{id}"));
}

#[tokio::test]
async fn retrieve_unknown_id_returns_empty_speaker() {
    let state = build_state().await;
    let app = build_app(&state);

    let (status, body) = send(&app, Method::GET, "/retrieve/does-not-exist", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["name"], Value::Null);

    let links = body["links"].as_object().unwrap();
    assert!(!links.contains_key("self"));
    assert!(!links.contains_key("remove"));
    assert_eq!(links["add"], format!("{BASE_URL}/add"));
    assert_eq!(links["search"], format!("{BASE_URL}/search"));
}
