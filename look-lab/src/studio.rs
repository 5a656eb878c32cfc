//! 试穿会话：上传状态、单次在途请求与结果/错误展示。

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use look_lab_types::enums::FinishReason;
use look_lab_types::image::ImagePayload;
use look_lab_types::outfit::UploadTarget;
use thiserror::Error;

use crate::error::Error;
use crate::try_on::{TryOn, TryOnOutcome, TryOnResult};
use crate::upload;
use crate::wardrobe::Wardrobe;

/// 会话层错误；`Display` 即面向用户的提示语。
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Please upload your photo and at least one clothing item.")]
    MissingInputs,

    #[error("A try-on is already in progress.")]
    Busy,

    #[error(
        "The AI could not generate an image. Please try a different set of images.{}",
        model_note(.text)
    )]
    NoResult {
        text: Option<String>,
        finish_reason: Option<FinishReason>,
    },

    #[error("An error occurred while generating the image. Please try again.")]
    Failed {
        #[from]
        source: Error,
    },

    #[error("There is no generated image to export yet.")]
    NothingToExport,

    #[error("Could not save the generated image: {source}")]
    Export { source: Error },
}

fn model_note(text: &Option<String>) -> String {
    text.as_deref()
        .map(|text| format!(" (model said: {text})"))
        .unwrap_or_default()
}

#[derive(Debug, Default)]
struct SessionState {
    wardrobe: Wardrobe,
    result: Option<TryOnResult>,
    error: Option<String>,
}

/// 一个试穿会话。
///
/// 可在多个任务间共享（`Arc<Studio>`）；同一时刻最多只有一个生成请求在途。
pub struct Studio {
    service: TryOn,
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Studio {
    #[must_use]
    pub fn new(service: TryOn) -> Self {
        Self {
            service,
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 记录一次上传（不做校验）。
    pub fn upload(&self, target: impl Into<UploadTarget>, payload: ImagePayload) {
        self.state().wardrobe.upload(target, payload);
    }

    /// 当前上传状态的快照。
    #[must_use]
    pub fn wardrobe(&self) -> Wardrobe {
        self.state().wardrobe.clone()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// 是否可以发起生成（对应界面上生成按钮的可用状态）。
    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.is_busy() && self.state().wardrobe.is_ready()
    }

    /// 最近一次成功生成的图像。
    #[must_use]
    pub fn result(&self) -> Option<TryOnResult> {
        self.state().result.clone()
    }

    /// 最近一次展示给用户的错误提示。
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// 用当前上传发起一次试穿。
    ///
    /// 缺少参考照片或服装时不发出任何请求。
    ///
    /// # Errors
    /// 输入不完整、已有请求在途、模型未返回图像或请求失败时返回错误。
    pub async fn generate(&self) -> Result<TryOnResult, StudioError> {
        let inputs = {
            let mut state = self.state();
            let reference = state.wardrobe.reference_photo().cloned();
            let items = state.wardrobe.outfit().to_items();
            match reference {
                Some(reference) if !items.is_empty() => Some((reference, items)),
                _ => {
                    if !self.is_busy() {
                        state.error = Some(StudioError::MissingInputs.to_string());
                    }
                    None
                }
            }
        };
        let Some((reference, items)) = inputs else {
            return Err(StudioError::MissingInputs);
        };

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            return Err(StudioError::Busy);
        };
        {
            let mut state = self.state();
            state.error = None;
            state.result = None;
        }

        let outcome = match self.service.generate(&reference, &items).await {
            Ok(TryOnOutcome::Image(result)) => Ok(result),
            Ok(TryOnOutcome::NoImage {
                text,
                finish_reason,
            }) => Err(StudioError::NoResult {
                text,
                finish_reason,
            }),
            Err(source) => {
                tracing::error!(error = %source, "try-on generation failed");
                Err(StudioError::Failed { source })
            }
        };

        let mut state = self.state();
        match &outcome {
            Ok(result) => state.result = Some(result.clone()),
            Err(err) => state.error = Some(err.to_string()),
        }
        outcome
    }

    /// 将最近的结果写入文件。
    ///
    /// # Errors
    /// 尚无结果或写入失败时返回错误。
    pub async fn export(&self, path: impl AsRef<Path>) -> Result<(), StudioError> {
        let Some(result) = self.result() else {
            return Err(StudioError::NothingToExport);
        };
        upload::save_image(&result.image, path)
            .await
            .map_err(|source| StudioError::Export { source })
    }
}
