//! 试穿请求：组装多 part 请求、调用模型、提取第一张图像。

use look_lab_types::config::{GenerationConfig, ImageConfig};
use look_lab_types::content::{Content, Part, Role};
use look_lab_types::enums::FinishReason;
use look_lab_types::image::ImagePayload;
use look_lab_types::models::GenerateContentConfig;
use look_lab_types::outfit::OutfitItem;
use look_lab_types::response::GenerateContentResponse;

use crate::client::Client;
use crate::error::Result;
use crate::models::Models;

/// 默认使用的图像模型。
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// 附在所有图像之后的固定指令。
pub const TRY_ON_INSTRUCTION: &str = "\
You are an expert virtual stylist. Dress the person from the first image in the clothing shown in the remaining images.
The first image is the reference model. Every following image is a single clothing item, usually photographed on a plain background.
1. Identify the person in the first image.
2. Remove the background from each clothing item image.
3. Put the items on the person in the order given, replacing whatever they currently wear in the same area. When two items cover the same area, the later one goes on top.
4. Match fit, drape, lighting and shadows to the person's pose and body shape.
5. Keep the original background of the person's photo so the newly dressed person stays in their original environment.
6. Return only the final image. Do not return any text.";

/// 一次成功的试穿结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnResult {
    /// 生成的图像（数据 URI）。
    pub image: ImagePayload,
    /// 模型附带的说明文字（如有）。
    pub text: Option<String>,
}

/// 试穿调用的结果；网络/服务错误走 `Err`，不在这里。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryOnOutcome {
    Image(TryOnResult),
    /// 调用成功但没有任何图像 part。
    NoImage {
        text: Option<String>,
        finish_reason: Option<FinishReason>,
    },
}

impl TryOnOutcome {
    #[must_use]
    pub const fn image(&self) -> Option<&ImagePayload> {
        match self {
            Self::Image(result) => Some(&result.image),
            Self::NoImage { .. } => None,
        }
    }
}

/// 试穿服务。
///
/// 持有显式构造的 [`Client`]；每次 [`TryOn::generate`] 恰好发出一个请求，不缓存、不重试。
#[derive(Clone)]
pub struct TryOn {
    models: Models,
    model: String,
    image_config: Option<ImageConfig>,
}

impl TryOn {
    #[must_use]
    pub fn new(client: &Client) -> Self {
        Self {
            models: client.models(),
            model: DEFAULT_MODEL.to_string(),
            image_config: None,
        }
    }

    /// 指定模型名称。
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 指定输出图像配置（宽高比等）。
    #[must_use]
    pub fn with_image_config(mut self, image_config: ImageConfig) -> Self {
        self.image_config = Some(image_config);
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 生成试穿图像。
    ///
    /// 调用方需保证参考照片存在且服装非空，这里不做检查。
    ///
    /// # Errors
    /// 图像载荷无法拆分/解码，或请求失败时返回错误。
    pub async fn generate(
        &self,
        reference: &ImagePayload,
        outfit: &[OutfitItem],
    ) -> Result<TryOnOutcome> {
        let parts = build_try_on_parts(reference, outfit)?;
        tracing::debug!(
            model = %self.model,
            parts = parts.len(),
            outfit = outfit.len(),
            "submitting try-on request"
        );

        let config = GenerateContentConfig {
            generation_config: Some(GenerationConfig {
                image_config: self.image_config.clone(),
                ..GenerationConfig::image_and_text()
            }),
            ..Default::default()
        };
        let response = self
            .models
            .generate_content_with_config(
                &self.model,
                vec![Content::from_parts(parts, Role::User)],
                config,
            )
            .await
            .inspect_err(|err| tracing::error!(error = %err, "try-on request failed"))?;

        let outcome = extract_outcome(&response);
        if let TryOnOutcome::NoImage {
            text,
            finish_reason,
        } = &outcome
        {
            tracing::warn!(?finish_reason, text = ?text, "model returned no image");
        }
        Ok(outcome)
    }
}

/// 组装请求 parts：`[参考照片, 服装 1..N, 指令]`。
///
/// # Errors
/// 任一载荷不是合法的数据 URI 时返回错误。
pub fn build_try_on_parts(reference: &ImagePayload, outfit: &[OutfitItem]) -> Result<Vec<Part>> {
    let mut parts = Vec::with_capacity(outfit.len() + 2);
    parts.push(reference.to_part()?);
    for item in outfit {
        parts.push(item.data.to_part()?);
    }
    parts.push(Part::text(TRY_ON_INSTRUCTION));
    Ok(parts)
}

/// 从响应中取第一张非空图像；没有图像时带回模型的文字说明。
#[must_use]
pub fn extract_outcome(response: &GenerateContentResponse) -> TryOnOutcome {
    let text = response.joined_text();
    match response.inline_data().find(|blob| !blob.data.is_empty()) {
        Some(blob) => TryOnOutcome::Image(TryOnResult {
            image: ImagePayload::from_blob(blob),
            text,
        }),
        None => TryOnOutcome::NoImage {
            text,
            finish_reason: response.finish_reason(),
        },
    }
}
