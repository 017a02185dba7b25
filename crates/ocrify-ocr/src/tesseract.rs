use std::process::Stdio;

use async_trait::async_trait;
use ocrify_config::ocr::OcrConfig;
use ocrify_types::OcrError;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::engine::OcrEngine;
use crate::handle::ImageHandle;

/// Tesseract invoked as a subprocess, fed PNG bytes on stdin and read back
/// on stdout (`tesseract stdin stdout -l <lang>`).
pub struct TesseractEngine {
    command: String,
    language: String,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
        }
    }

    /// Availability check, run once before accepting work. Returns the
    /// engine's version banner.
    pub async fn probe(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .map_err(|e| spawn_error(&self.command, e))?;

        if !output.status.success() {
            return Err(OcrError::EngineUnavailable(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        // Older tesseract builds print the banner to stderr
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        Ok(banner.lines().next().unwrap_or_default().to_string())
    }
}

fn spawn_error(command: &str, e: std::io::Error) -> OcrError {
    if e.kind() == std::io::ErrorKind::NotFound {
        OcrError::EngineUnavailable(format!("{command} not found in PATH"))
    } else {
        OcrError::EngineUnavailable(format!("failed to invoke {command}: {e}"))
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn extract(
        &self,
        image: &ImageHandle,
        cancel: &CancellationToken,
    ) -> Result<String, OcrError> {
        let png = image.to_png_bytes()?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            bytes = png.len(),
            "starting OCR"
        );

        let mut child = Command::new(&self.command)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&self.command, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A write failure means the child died early; the exit status
            // below carries the real error.
            if let Err(e) = stdin.write_all(&png).await {
                tracing::debug!("writing image to engine stdin failed: {e}");
            }
        }

        // Dropping the in-flight future on cancellation kills the child
        // (kill_on_drop); the worker discards the request after this.
        let output = tokio::select! {
            output = child.wait_with_output() => output
                .map_err(|e| OcrError::RecognitionFailed(format!("engine wait failed: {e}")))?,
            _ = cancel.cancelled() => {
                return Err(OcrError::RecognitionFailed("extraction cancelled".to_string()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(OcrError::RecognitionFailed(format!(
                "engine exited with {}: {stderr}",
                output.status
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| OcrError::RecognitionFailed(format!("engine produced invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn missing_engine() -> TesseractEngine {
        let config = OcrConfig {
            command: "ocrify-no-such-engine".to_string(),
            ..OcrConfig::default()
        };
        TesseractEngine::new(&config)
    }

    #[tokio::test]
    async fn probe_reports_engine_unavailable() {
        let err = missing_engine().probe().await.unwrap_err();
        assert!(matches!(err, OcrError::EngineUnavailable(_)));
    }

    #[tokio::test]
    async fn extract_reports_engine_unavailable() {
        let handle = ImageHandle::new(DynamicImage::new_rgb8(4, 4));
        let cancel = CancellationToken::new();
        let err = missing_engine().extract(&handle, &cancel).await.unwrap_err();
        assert!(matches!(err, OcrError::EngineUnavailable(_)));
    }
}
