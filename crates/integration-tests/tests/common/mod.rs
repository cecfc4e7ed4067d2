//! Shared harness for router-level tests.

#![allow(dead_code)]

use api_adapters::{create_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use domains::ports::DocumentStore;
use services::ServiceOptions;
use std::sync::Arc;
use storage_adapters::MemoryStore;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn DocumentStore>,
}

impl TestApp {
    pub fn new(cascade_comments: bool) -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), ServiceOptions { cascade_comments });
        Self {
            router: create_router(state),
            store,
        }
    }

    /// Posts a valid submission and returns its detail path.
    pub async fn submit(&self, title: &str, community: &str) -> String {
        let body = format!(
            "submission%5Btitle%5D={}&submission%5Burl%5D=https%3A%2F%2Fexample.com&submission%5Bcommunity%5D={}",
            title.replace(' ', "+"),
            community
        );
        let response = post_form(&self.router, "/submissions", &body).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        location(&response)
    }
}

pub async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(router: &Router, uri: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> String {
    response.headers()[header::LOCATION].to_str().unwrap().to_owned()
}
