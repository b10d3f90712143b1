//! Shared helpers: a fresh testing-mode app per test and a oneshot request driver.

#![allow(dead_code)]

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Method, Request, StatusCode,
};
use axum::Router;
use item_service::{app_routes, create_state, AppConfig, AppState, ItemService, NewItem};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false)
    }
}

pub async fn app() -> TestApp {
    app_with(AppConfig::testing()).await
}

pub async fn app_with(config: AppConfig) -> TestApp {
    let state = create_state(config).await.expect("state");
    TestApp {
        router: app_routes(state.clone()),
        state,
    }
}

/// App with two seeded rows: (1, John, bla) and (2, Jane, bla2).
pub async fn seeded_app() -> TestApp {
    let app = app().await;
    for (name, description) in [("John", "bla"), ("Jane", "bla2")] {
        let item = NewItem {
            name: name.into(),
            description: description.into(),
        };
        ItemService::create(&app.state.pool, &item).await.expect("seed");
    }
    app
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.expect("infallible");
        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, String::new())).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri, None, String::new())).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(request(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            form.to_string(),
        ))
        .await
    }

    /// Form post with no `Content-Length`, so size is only known while the body is read.
    pub async fn post_form_streamed(&self, uri: &str, form: &str) -> TestResponse {
        let mut req = request(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            form.to_string(),
        );
        req.headers_mut().remove(CONTENT_LENGTH);
        self.send(req).await
    }

    pub async fn patch_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request(
            Method::PATCH,
            uri,
            Some("application/json"),
            body.to_string(),
        ))
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request(
            Method::POST,
            uri,
            Some("application/json"),
            body.to_string(),
        ))
        .await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request(
            Method::PUT,
            uri,
            Some("application/json"),
            body.to_string(),
        ))
        .await
    }

    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send(request(
            Method::POST,
            uri,
            Some(content_type),
            body.to_string(),
        ))
        .await
    }

    pub async fn put_raw(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send(request(
            Method::PUT,
            uri,
            Some(content_type),
            body.to_string(),
        ))
        .await
    }
}

fn request(method: Method, uri: &str, content_type: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_LENGTH, body.len());
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }
    builder.body(Body::from(body)).expect("request")
}
