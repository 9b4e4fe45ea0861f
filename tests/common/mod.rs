use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use warehouse_inventory_api::{app, store::InMemoryStore, AppState};

/// Router wired to a fresh in-memory store.
pub struct TestApp {
    router: Router,
}

/// Status plus decoded JSON body (Null when the body is empty or not JSON)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    #[allow(dead_code)]
    pub request_id: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            router: app(AppState::new(Arc::new(InMemoryStore::new()))),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router is infallible");

        TestResponse::from_response(response).await
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    #[allow(dead_code)]
    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    #[allow(dead_code)]
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body bytes");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Self {
            status,
            body,
            request_id,
        }
    }
}

/// Ids from a JSON array of objects, sorted for order-independent asserts
#[allow(dead_code)]
pub fn sorted_ids(body: &Value) -> Vec<String> {
    let mut ids: Vec<String> = body
        .as_array()
        .expect("json array")
        .iter()
        .map(|item| item["id"].as_str().expect("string id").to_string())
        .collect();
    ids.sort();
    ids
}
