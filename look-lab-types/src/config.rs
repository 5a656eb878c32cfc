use serde::{Deserialize, Serialize};

use crate::enums::Modality;

/// 生成配置。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
}

impl GenerationConfig {
    /// 同时请求图像与文本输出。
    #[must_use]
    pub fn image_and_text() -> Self {
        Self {
            response_modalities: Some(vec![Modality::Image, Modality::Text]),
            ..Default::default()
        }
    }
}

/// 图像输出配置。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// 例如 `"1:1"`、`"3:4"`。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_config_serializes_camel_case() {
        let config = GenerationConfig {
            seed: Some(7),
            image_config: Some(ImageConfig {
                aspect_ratio: Some("3:4".into()),
                image_size: None,
            }),
            ..GenerationConfig::image_and_text()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["responseModalities"][0], "IMAGE");
        assert_eq!(value["responseModalities"][1], "TEXT");
        assert_eq!(value["imageConfig"]["aspectRatio"], "3:4");
        assert_eq!(value["seed"], 7);
        assert!(value.get("temperature").is_none());
    }
}
