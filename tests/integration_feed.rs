mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_empty_feed() {
    let (app, _state) = setup_test_app();

    let res = send(&app, request(Method::GET, "/feed", None, None)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_feed_is_public_and_newest_first() {
    let (app, state) = setup_test_app();
    let alice = create_test_user(&state, "alice", "user").await;

    for title in ["first", "second", "third"] {
        let res = send(
            &app,
            request(
                Method::POST,
                "/posts",
                Some(&alice.token),
                Some(json!({ "title": title, "text": "body", "tags": ["t"] })),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = send(&app, request(Method::GET, "/feed", None, None)).await;

    assert_eq!(res.status, StatusCode::OK);
    let titles: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn test_feed_post_comments_newest_first() {
    let (app, state) = setup_test_app();
    let alice = create_test_user(&state, "alice", "user").await;

    send(
        &app,
        request(
            Method::POST,
            "/posts",
            Some(&alice.token),
            Some(json!({ "title": "Hello", "text": "body", "tags": ["t"] })),
        ),
    )
    .await;

    for content in ["one", "two"] {
        send(
            &app,
            request(
                Method::POST,
                "/posts/comments/1",
                Some(&alice.token),
                Some(json!({ "content": content })),
            ),
        )
        .await;
    }

    let res = send(&app, request(Method::GET, "/feed/1", None, None)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["title"], "Hello");
    let comments = res.body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "two");
    assert_eq!(comments[1]["content"], "one");
    assert_eq!(comments[0]["user"]["username"], "alice");
}

#[tokio::test]
async fn test_feed_post_not_found_and_bad_id() {
    let (app, _state) = setup_test_app();

    let res = send(&app, request(Method::GET, "/feed/7", None, None)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({ "error": "not found" }));

    let res = send(&app, request(Method::GET, "/feed/seven", None, None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
