//! 自描述的图像载荷（`data:<mime>;base64,<data>`）。

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{Blob, Part};

/// 数据 URI 解析错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("missing media type descriptor (expected `data:<mime>;base64,<data>`)")]
    MissingMediaType,
    #[error("missing `,` separator before the encoded payload")]
    MissingPayload,
    #[error("payload is not valid base64: {message}")]
    InvalidBase64 { message: String },
}

/// 图像载荷：媒体类型与编码数据存放在同一个字符串中。
///
/// 上传状态只保存原始字符串，不做任何校验；只有在组装请求时才拆分。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// 包装一个已编码的数据 URI。
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    /// 由媒体类型与 base64 数据重新组装。
    #[must_use]
    pub fn from_parts(media_type: &str, raw_data: &str) -> Self {
        Self(format!("data:{media_type};base64,{raw_data}"))
    }

    /// 由原始字节编码。
    #[must_use]
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self::from_parts(media_type, &STANDARD.encode(bytes))
    }

    /// 由内联数据块编码。
    #[must_use]
    pub fn from_blob(blob: &Blob) -> Self {
        Self::from_bytes(&blob.mime_type, &blob.data)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// 拆分为 `(media_type, raw_data)`。
    ///
    /// 媒体类型取第一个 `:` 与第一个 `;` 之间的内容，数据取第一个 `,` 之后的内容。
    ///
    /// # Errors
    /// 缺少描述前缀或分隔符时返回错误。
    pub fn split(&self) -> Result<(&str, &str), DataUriError> {
        let value = self.0.as_str();
        let start = value.find(':').ok_or(DataUriError::MissingMediaType)? + 1;
        let end = value.find(';').ok_or(DataUriError::MissingMediaType)?;
        if end < start {
            return Err(DataUriError::MissingMediaType);
        }
        let comma = value.find(',').ok_or(DataUriError::MissingPayload)?;
        Ok((&value[start..end], &value[comma + 1..]))
    }

    /// 媒体类型（例如 `image/png`）。
    ///
    /// # Errors
    /// 同 [`ImagePayload::split`]。
    pub fn media_type(&self) -> Result<&str, DataUriError> {
        self.split().map(|(media_type, _)| media_type)
    }

    /// 解码出原始字节。
    ///
    /// # Errors
    /// 结构无效或 base64 数据损坏时返回错误。
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        let (_, raw_data) = self.split()?;
        STANDARD
            .decode(raw_data.as_bytes())
            .map_err(|err| DataUriError::InvalidBase64 {
                message: err.to_string(),
            })
    }

    /// 转换为请求中的内联数据 Part。
    ///
    /// # Errors
    /// 同 [`ImagePayload::decode`]。
    pub fn to_part(&self) -> Result<Part, DataUriError> {
        let media_type = self.media_type()?;
        Ok(Part::inline_data(self.decode()?, media_type))
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.split() {
            Ok((media_type, raw_data)) => f
                .debug_struct("ImagePayload")
                .field("media_type", &media_type)
                .field("encoded_len", &raw_data.len())
                .finish(),
            Err(_) => f
                .debug_struct("ImagePayload")
                .field("len", &self.0.len())
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ImagePayload {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ImagePayload {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
