use crate::base64_serde;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 对话内容。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// 角色：user/model。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 消息内容片段。
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// 创建用户文本消息。
    pub fn user(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(text)], Role::User)
    }

    /// 从 parts 构建内容。
    #[must_use]
    pub const fn from_parts(parts: Vec<Part>, role: Role) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    /// 提取第一段文本。
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(Part::text_value)
    }

    /// 按顺序找到第一个内联二进制数据。
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.parts.iter().find_map(Part::inline_data_ref)
    }
}

/// 内容角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// 内容部分。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// 具体内容变体。
    #[serde(flatten)]
    pub kind: PartKind,
    /// 是否为思考内容。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// 思考签名（base64 编码）。
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_serde::option"
    )]
    pub thought_signature: Option<Vec<u8>>,
}

impl Part {
    /// 创建文本 Part。
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Text { text: text.into() },
            thought: None,
            thought_signature: None,
        }
    }

    /// 创建内联二进制数据 Part。
    pub fn inline_data(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            kind: PartKind::InlineData {
                inline_data: Blob {
                    mime_type: mime_type.into(),
                    data,
                    display_name: None,
                },
            },
            thought: None,
            thought_signature: None,
        }
    }

    /// 获取文本内容（仅当为 Text Part）。
    #[must_use]
    pub const fn text_value(&self) -> Option<&str> {
        match &self.kind {
            PartKind::Text { text } => Some(text.as_str()),
            PartKind::InlineData { .. } | PartKind::Other(_) => None,
        }
    }

    /// 获取内联数据引用（仅当为 `InlineData` Part）。
    #[must_use]
    pub const fn inline_data_ref(&self) -> Option<&Blob> {
        match &self.kind {
            PartKind::InlineData { inline_data } => Some(inline_data),
            PartKind::Text { .. } | PartKind::Other(_) => None,
        }
    }
}

/// 内容部分的具体变体。
///
/// 反序列化按键分派：带 `text` 或 `inlineData` 的 part 必须能完整解析，否则报错；
/// 两者都没有时才落到 [`PartKind::Other`]。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum PartKind {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// 未建模的 part（函数调用、文件引用等），原样保留。
    Other(Map<String, Value>),
}

impl<'de> Deserialize<'de> for PartKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        if let Some(text) = fields.remove("text") {
            let text = String::deserialize(text).map_err(de::Error::custom)?;
            return Ok(Self::Text { text });
        }
        if let Some(inline_data) = fields.remove("inlineData") {
            let inline_data = Blob::deserialize(inline_data)
                .map_err(|err| de::Error::custom(format!("invalid inlineData part: {err}")))?;
            return Ok(Self::InlineData { inline_data });
        }
        Ok(Self::Other(fields))
    }
}

/// 二进制数据。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    #[serde(with = "base64_serde")]
    pub data: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
