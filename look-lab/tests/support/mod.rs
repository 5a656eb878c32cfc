#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, Request};

use look_lab::types::image::ImagePayload;
use look_lab::Client;

pub const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

pub fn build_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

/// POST 到默认模型、且携带测试 API Key 的请求。
pub fn generate_content_mock() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
}

pub fn image(media_type: &str, data: &str) -> ImagePayload {
    ImagePayload::from_parts(media_type, data)
}

pub fn image_response(parts: Value) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": parts},
            "finishReason": "STOP",
            "index": 0
        }],
        "modelVersion": "gemini-2.5-flash-image-preview"
    })
}

pub async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

pub fn request_parts(request: &Request) -> Vec<Value> {
    let body: Value = request.body_json().unwrap();
    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["role"], "user");
    contents[0]["parts"].as_array().unwrap().clone()
}
