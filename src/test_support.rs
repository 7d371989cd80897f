//! Drives the full router in-process, carrying the session cookie between
//! requests the way a browser would.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{app::build_app, state::AppState};

pub struct TestResponse {
    pub status: StatusCode,
    /// `Value::Null` for an empty body.
    pub body: Value,
}

pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(state: AppState) -> Self {
        Self {
            app: build_app(state),
            cookie: None,
        }
    }

    /// The `name=value` pair sent on the next request.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn set_cookie(&mut self, pair: &str) {
        self.cookie = Some(pair.to_string());
    }

    pub fn clear_cookie(&mut self) {
        self.cookie = None;
    }

    /// A client holding a live session whose user id matches no stored user.
    pub async fn with_orphan_session(state: AppState) -> Self {
        let token = state
            .sessions
            .create(Uuid::new_v4(), state.session_ttl())
            .await
            .unwrap();
        let pair = format!("{}={token}", state.config.session.cookie_name);
        let mut client = Self::new(state);
        client.set_cookie(&pair);
        client
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn request(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            req = req.header(header::COOKIE, cookie);
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let res = self.app.clone().oneshot(req).await.unwrap();

        if let Some(set) = res.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().trim();
            let (_, value) = pair.split_once('=').unwrap();
            self.cookie = if value.is_empty() {
                None
            } else {
                Some(pair.to_string())
            };
        }

        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse { status, body }
    }
}
