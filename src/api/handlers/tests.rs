//! Router-level tests for the auth and todo flows.
//!
//! 実 DB は使わず、in-memory repo と MemoryStore session で router 全体を
//! oneshot で叩く。cookie はレスポンスの Set-Cookie をそのまま持ち回す。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    app,
    repos::memory::{MemoryTodoRepo, MemoryUserRepo},
    state::AppState,
};

fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryUserRepo::new()),
        Arc::new(MemoryTodoRepo::new()),
    );

    app::build_router(state)
        .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri(uri);
    let builder = match cookie {
        Some(c) => builder.header(COOKIE, c),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

fn credentials_form(uri: &str, email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "email={}&password={}",
            email.replace('@', "%40"),
            password
        )))
        .unwrap()
}

fn api_request(method: &str, uri: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookie);

    match body {
        Some(v) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn session_cookie(res: &Response) -> String {
    res.headers()
        .get(SET_COOKIE)
        .expect("response sets a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_string(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login(app: &Router, email: &str, password: &str) -> String {
    let res = send(app, credentials_form("/register", email, password)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/login");

    let res = send(app, credentials_form("/login", email, password)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/");

    session_cookie(&res)
}

async fn create_todo(app: &Router, cookie: &str, name: &str) -> i64 {
    let res = send(
        app,
        api_request("POST", "/api/todos", cookie, Some(json!({ "name": name }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    body_json(res).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn register_then_login_establishes_a_session() {
    let app = test_app();
    let cookie = register_and_login(&app, "alice@example.com", "correct horse").await;

    let res = send(&app, get_request("/", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("alice@example.com"));
}

#[tokio::test]
async fn home_redirects_anonymous_to_login() {
    let app = test_app();

    let res = send(&app, get_request("/", None)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/login");
}

#[tokio::test]
async fn wrong_password_never_yields_a_session() {
    let app = test_app();
    let res = send(&app, credentials_form("/register", "bob@example.com", "right")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = send(&app, credentials_form("/login", "bob@example.com", "wrong")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(SET_COOKIE).is_none());
    assert!(body_string(res).await.contains("Incorrect password"));
}

#[tokio::test]
async fn login_with_unknown_email_renders_error() {
    let app = test_app();

    let res = send(&app, credentials_form("/login", "ghost@example.com", "pw")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(SET_COOKIE).is_none());
    assert!(body_string(res).await.contains("No user with that email"));
}

#[tokio::test]
async fn missing_fields_rerender_with_message() {
    let app = test_app();

    for uri in ["/register", "/login"] {
        let res = send(&app, credentials_form(uri, "", "")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(
            body_string(res)
                .await
                .contains("Please submit all required fields")
        );
    }
}

#[tokio::test]
async fn duplicate_email_rerenders_register() {
    let app = test_app();
    let res = send(&app, credentials_form("/register", "dup@example.com", "pw")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = send(&app, credentials_form("/register", "dup@example.com", "pw")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("already registered"));
}

#[tokio::test]
async fn api_rejects_anonymous_with_401() {
    let app = test_app();

    let res = send(&app, get_request("/api/todos", None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let v = body_json(res).await;
    assert_eq!(v["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn list_is_ordered_by_ascending_id() {
    let app = test_app();
    let cookie = register_and_login(&app, "order@example.com", "pw").await;

    let first = create_todo(&app, &cookie, "first").await;
    let second = create_todo(&app, &cookie, "second").await;
    let third = create_todo(&app, &cookie, "third").await;

    // 後から真ん中をいじっても順序は id のまま
    let res = send(
        &app,
        api_request(
            "PUT",
            &format!("/api/todos/{second}"),
            &cookie,
            Some(json!({ "name": "second (renamed)" })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&app, api_request("GET", "/api/todos", &cookie, None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let v = body_json(res).await;
    let ids: Vec<i64> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[tokio::test]
async fn create_returns_todo_with_complete_false() {
    let app = test_app();
    let cookie = register_and_login(&app, "create@example.com", "pw").await;

    let res = send(
        &app,
        api_request("POST", "/api/todos", &cookie, Some(json!({ "name": "buy milk" }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let v = body_json(res).await;
    assert_eq!(v["name"], "buy milk");
    assert_eq!(v["complete"], false);
    assert!(v["id"].as_i64().is_some());
}

#[tokio::test]
async fn create_with_empty_name_is_400_and_not_persisted() {
    let app = test_app();
    let cookie = register_and_login(&app, "empty@example.com", "pw").await;

    let res = send(
        &app,
        api_request("POST", "/api/todos", &cookie, Some(json!({ "name": "   " }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // name 欠落も 400 (422 にしない)
    let res = send(&app, api_request("POST", "/api/todos", &cookie, Some(json!({})))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, api_request("GET", "/api/todos", &cookie, None)).await;
    let v = body_json(res).await;
    assert!(v.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn foreign_todos_are_invisible_across_all_operations() {
    let app = test_app();
    let cookie_a = register_and_login(&app, "a@example.com", "pw-a").await;
    let cookie_b = register_and_login(&app, "b@example.com", "pw-b").await;

    let id = create_todo(&app, &cookie_a, "private").await;
    let uri = format!("/api/todos/{id}");

    let res = send(&app, api_request("GET", &uri, &cookie_b, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(
        &app,
        api_request("PUT", &uri, &cookie_b, Some(json!({ "name": "stolen" }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(
        &app,
        api_request("PUT", &format!("/api/todos/mark/{id}"), &cookie_b, None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, api_request("DELETE", &uri, &cookie_b, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, api_request("GET", "/api/todos", &cookie_b, None)).await;
    assert!(body_json(res).await.as_array().unwrap().is_empty());

    // owner からは何も変わらず見える
    let res = send(&app, api_request("GET", &uri, &cookie_a, None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let v = body_json(res).await;
    assert_eq!(v["name"], "private");
    assert_eq!(v["complete"], false);
}

#[tokio::test]
async fn toggling_twice_roundtrips_completion() {
    let app = test_app();
    let cookie = register_and_login(&app, "toggle@example.com", "pw").await;

    let id = create_todo(&app, &cookie, "flip me").await;
    let uri = format!("/api/todos/mark/{id}");

    let res = send(&app, api_request("PUT", &uri, &cookie, None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["complete"], true);

    let res = send(&app, api_request("PUT", &uri, &cookie, None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["complete"], false);
}

#[tokio::test]
async fn rename_validates_and_resolves() {
    let app = test_app();
    let cookie = register_and_login(&app, "rename@example.com", "pw").await;

    let id = create_todo(&app, &cookie, "old name").await;
    let uri = format!("/api/todos/{id}");

    let res = send(
        &app,
        api_request("PUT", &uri, &cookie, Some(json!({ "name": "new name" }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["name"], "new name");

    let res = send(
        &app,
        api_request("PUT", &uri, &cookie, Some(json!({ "name": "" }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        api_request("PUT", "/api/todos/9999", &cookie, Some(json!({ "name": "x" }))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_204_then_404() {
    let app = test_app();
    let cookie = register_and_login(&app, "delete@example.com", "pw").await;

    let id = create_todo(&app, &cookie, "doomed").await;
    let uri = format!("/api/todos/{id}");

    let res = send(&app, api_request("DELETE", &uri, &cookie, None)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, api_request("DELETE", &uri, &cookie, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, api_request("GET", &uri, &cookie, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_clears_the_session_and_is_idempotent() {
    let app = test_app();
    let cookie = register_and_login(&app, "bye@example.com", "pw").await;

    let res = send(&app, get_request("/logout", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/login");

    // 以後、この cookie では home に入れない
    let res = send(&app, get_request("/", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/login");

    // session を持たないまま logout しても成功する
    let res = send(&app, get_request("/logout", None)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/login");
}
