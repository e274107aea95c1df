//! Shared harness: the full router over an in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use moviehub::api::{create_app, AppState};
use moviehub::config::Config;
use moviehub::domain::{UserInput, UserRole};
use moviehub::infra::Database;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub state: AppState,
}

/// A signed-in account
pub struct Account {
    pub id: i32,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let database = Database::connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        let config = Config::new("sqlite::memory:", TEST_SECRET).expect("test config");

        Self {
            state: AppState::from_config(Arc::new(database), config),
        }
    }

    /// Create an account directly through the services and log it in.
    pub async fn account(&self, username: &str, role: UserRole) -> Account {
        let user = self
            .state
            .services
            .users()
            .create_user(UserInput {
                username: username.to_string(),
                role,
                password: Some(TEST_PASSWORD.to_string()),
                email: None,
                first_name: None,
                last_name: None,
            })
            .await
            .expect("create account");

        let token = self
            .state
            .services
            .auth()
            .login(username.to_string(), TEST_PASSWORD.to_string())
            .await
            .expect("login");

        Account {
            id: user.id,
            token: token.access_token,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        create_app(self.state.clone())
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Send a JSON request and decode the JSON reply (`Null` when empty).
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn genre(&self, token: &str, name: &str) -> i32 {
        let (status, body) = self.post("/genres/", token, json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().expect("genre id") as i32
    }

    pub async fn movie(&self, token: &str, title: &str, release_date: &str, genres: &[i32]) -> i32 {
        let (status, body) = self
            .post(
                "/movies/",
                token,
                json!({
                    "title": title,
                    "description": format!("{} description", title),
                    "release_date": release_date,
                    "genres": genres,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().expect("movie id") as i32
    }

    pub async fn favorite(&self, token: &str, movie: i32) -> i32 {
        let (status, body) = self.post("/favorites/", token, json!({ "movie": movie })).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().expect("favorite id") as i32
    }

    pub async fn rate(&self, token: &str, movie: i32, score: i16) -> i32 {
        let (status, body) = self
            .post("/ratings/", token, json!({ "movie": movie, "score": score }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().expect("rating id") as i32
    }
}

/// Ids of the `results` array of a page, or of a bare array.
pub fn ids(body: &Value) -> Vec<i64> {
    let items = body.get("results").unwrap_or(body);
    items
        .as_array()
        .expect("array of results")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect()
}
