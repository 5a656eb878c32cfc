//! 本地文件与图像载荷之间的转换。

use std::path::Path;

use look_lab_types::image::ImagePayload;

use crate::error::{Error, Result};

/// 接受上传的图像类型。
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// 导出结果时的默认文件名。
pub const DEFAULT_RESULT_FILE_NAME: &str = "looklab-ai-result.png";

/// 读取本地图像并编码为数据 URI。
///
/// # Errors
/// 路径不是文件、扩展名对应的类型不在 [`ACCEPTED_MIME_TYPES`] 中，或读取失败时返回错误。
pub async fn load_image(path: impl AsRef<Path>) -> Result<ImagePayload> {
    let path = path.as_ref();
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(Error::InvalidInput {
            message: format!("{} is not a valid file path", path.display()),
        });
    }

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(Error::InvalidInput {
            message: format!(
                "{} has unsupported type {mime_type} (expected PNG, JPEG or WEBP)",
                path.display()
            ),
        });
    }

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), %mime_type, size = bytes.len(), "image loaded");
    Ok(ImagePayload::from_bytes(&mime_type, &bytes))
}

/// 解码数据 URI 并写入文件。
///
/// # Errors
/// 载荷无法解码或写入失败时返回错误。
pub async fn save_image(image: &ImagePayload, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = image.decode()?;
    tokio::fs::write(path, &bytes).await?;
    tracing::info!(path = %path.display(), size = bytes.len(), "image saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_image_encodes_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shirt.webp");
        tokio::fs::write(&path, [1u8, 2, 3]).await.unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.as_str(), "data:image/webp;base64,AQID");
    }

    #[tokio::test]
    async fn load_image_rejects_unsupported_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let err = load_image(&path).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn load_image_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn save_image_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_RESULT_FILE_NAME);
        let image = ImagePayload::new("data:image/png;base64,AQID");

        save_image(&image, &path).await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn save_image_rejects_malformed_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let err = save_image(&ImagePayload::new("garbage"), &path)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Payload { .. }));
        assert!(!path.exists());
    }
}
