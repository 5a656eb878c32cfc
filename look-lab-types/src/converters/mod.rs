//! Converter module.

use serde_json::Value;

use crate::models::GenerateContentRequest;
use crate::response::GenerateContentResponse;

/// `GenerateContent` 请求转换（Gemini API）。
///
/// # Errors
/// 当序列化失败时返回错误。
pub fn generate_content_request_to_mldev(
    request: &GenerateContentRequest,
) -> Result<Value, serde_json::Error> {
    serde_json::to_value(request)
}

/// `GenerateContent` 响应转换（Gemini API）。
///
/// 设置 `LOOK_LAB_DEBUG_RESPONSE` 后，解析失败时会把原始响应打印到 stderr。
///
/// # Errors
/// 当反序列化失败时返回错误。
pub fn generate_content_response_from_mldev(
    value: Value,
) -> Result<GenerateContentResponse, serde_json::Error> {
    let raw = std::env::var("LOOK_LAB_DEBUG_RESPONSE")
        .is_ok()
        .then(|| value.clone());
    serde_json::from_value(value).inspect_err(|err| {
        if let Some(raw) = raw {
            eprintln!("GenerateContentResponse parse failed: {err}");
            eprintln!("Raw response: {raw}");
        }
    })
}
