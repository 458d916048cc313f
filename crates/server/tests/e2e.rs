use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::startup::build_app;
use server::state::AppState;
use service::users::repo::InMemoryUserRepository;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, body: Value) -> reqwest::Response {
        self.client.post(self.url("/users")).json(&body).send().await.unwrap()
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let state = AppState::new(Arc::new(InMemoryUserRepository::new()));
    let app: Router = build_app(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, client: reqwest::Client::new() })
}

fn leanne() -> Value {
    json!({
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org"
    })
}

#[tokio::test]
async fn health_ok() {
    let app = start_server().await.unwrap();
    let res = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn user_lifecycle() {
    let app = start_server().await.unwrap();

    let res = app.create(leanne()).await;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "User created successfully");
    let id = body["data"]["id"].as_i64().unwrap();
    assert!(body.get("errors").is_none());

    let res = app.client.get(app.url(&format!("/users/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["username"], "Bret");

    let res = app
        .client
        .put(app.url(&format!("/users/{id}")))
        .json(&json!({ "phone": "555-0100" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["phone"], "555-0100");
    assert_eq!(body["data"]["email"], "Sincere@april.biz");

    let res = app.client.delete(app.url(&format!("/users/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 204);
    assert_eq!(body["message"], "User deleted successfully");

    let res = app.client.get(app.url(&format!("/users/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], format!("User not found with id: {id}"));
}

#[tokio::test]
async fn duplicate_email_in_other_case_conflicts() {
    let app = start_server().await.unwrap();
    assert_eq!(app.create(leanne()).await.status(), HttpStatusCode::CREATED);

    let mut dup = leanne();
    dup["email"] = json!("SINCERE@APRIL.BIZ");
    let res = app.create(dup).await;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Email already exists: SINCERE@APRIL.BIZ");
}

#[tokio::test]
async fn update_to_email_owned_by_someone_else_conflicts() {
    let app = start_server().await.unwrap();
    app.create(leanne()).await;
    let res = app
        .create(json!({ "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv" }))
        .await;
    let ervin: Value = res.json().await.unwrap();
    let id = ervin["data"]["id"].as_i64().unwrap();

    let res = app
        .client
        .put(app.url(&format!("/users/{id}")))
        .json(&json!({ "email": "sincere@april.biz" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // Re-submitting one's own email in another case is not a conflict.
    let res = app
        .client
        .put(app.url(&format!("/users/{id}")))
        .json(&json!({ "email": "SHANNA@melissa.tv" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
}

#[tokio::test]
async fn invalid_payload_lists_field_errors() {
    let app = start_server().await.unwrap();
    let res = app.create(json!({ "name": "", "email": "nope" })).await;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Validation failure");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "name", "username"]);
    assert_eq!(body["errors"][0]["rejectedValue"], "nope");
}

#[tokio::test]
async fn listing_pages_and_rejects_bad_params() {
    let app = start_server().await.unwrap();
    for i in 0..3 {
        let res = app
            .create(json!({ "name": format!("User {i}"), "username": format!("u{i}"), "email": format!("u{i}@example.com") }))
            .await;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let body: Value = app.client.get(app.url("/users?page=1&size=2")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["totalElements"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrevious"], true);

    let body: Value = app.client.get(app.url("/users")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["pagination"]["size"], 10);
    assert_eq!(body["pagination"]["page"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let res = app.client.get(app.url("/users?page=-1")).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = app.client.get(app.url("/users?size=0")).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_user_mutations_are_not_found() {
    let app = start_server().await.unwrap();
    let res = app.client.put(app.url("/users/999")).json(&json!({ "name": "x" })).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = app.client.delete(app.url("/users/999")).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = app.client.get(app.url("/users/abc")).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = start_server().await.unwrap();
    let res = app.client.get(app.url("/api-docs/openapi.json")).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body["paths"]["/users/{id}"].is_object());
}
