use async_trait::async_trait;
use ocrify_types::OcrError;
use tokio_util::sync::CancellationToken;

use crate::handle::ImageHandle;

/// Text recognition backend. The pipeline treats it as a black box: one
/// image in, UTF-8 text or an [`OcrError`] out. Implementations never retry
/// internally and must honor the cancellation token.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn extract(
        &self,
        image: &ImageHandle,
        cancel: &CancellationToken,
    ) -> Result<String, OcrError>;
}
