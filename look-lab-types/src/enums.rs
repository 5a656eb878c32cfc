use serde::{Deserialize, Serialize};

/// Response modalities for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    ModalityUnspecified,
    Text,
    Image,
    Audio,
}

/// Server content modalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaModality {
    Text,
    Image,
    Video,
    Audio,
    Document,
    #[serde(other)]
    ModalityUnspecified,
}

/// Blocked reason for a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockedReason {
    Safety,
    Other,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    #[serde(other)]
    BlockedReasonUnspecified,
}

/// The reason why generation stopped.
///
/// 图像模型会返回 `IMAGE_SAFETY`/`NO_IMAGE` 等值，未知值统一落到 `FinishReasonUnspecified`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Language,
    Other,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    ImageProhibitedContent,
    ImageOther,
    NoImage,
    #[serde(other)]
    FinishReasonUnspecified,
}
