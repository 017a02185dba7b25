use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use ocrify_core::TextAnalytics;
use ocrify_dictionary::DefinitionResolver;
use ocrify_ocr::{ImageHandle, OcrEngine};
use ocrify_types::{AnalyticsResult, OcrError, PipelineEvent, PipelineStage};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Rejection of a submission while another request is in flight. This is
/// the rejected request's terminal outcome, delivered synchronously; the
/// in-flight request is unaffected.
#[derive(Debug, thiserror::Error)]
#[error("a request is already in flight")]
pub struct Busy;

/// Handle to an admitted request. Dropping it does not cancel the request.
pub struct RequestHandle {
    pub id: Uuid,
    cancel: CancellationToken,
}

impl RequestHandle {
    /// Cooperative cancellation: honored before each stage transition, and
    /// the OCR call itself is aborted. The request terminates with
    /// `Cancelled` and no partial result.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

struct Request {
    id: Uuid,
    image: ImageHandle,
    cancel: CancellationToken,
}

/// Runs extraction requests on a single dedicated worker task and reports
/// back through one event channel: advisory `Progress` events plus exactly
/// one terminal event per admitted request.
pub struct Pipeline {
    request_tx: AsyncSender<Request>,
    busy: Arc<AtomicBool>,
}

impl Pipeline {
    /// Spawn the worker and return the pipeline together with the consumer
    /// end of the event channel.
    pub fn spawn(
        engine: Arc<dyn OcrEngine>,
        resolver: Arc<dyn DefinitionResolver>,
        ocr_timeout: Duration,
    ) -> (Self, AsyncReceiver<PipelineEvent>) {
        let (event_tx, event_rx) = kanal::bounded_async(256);
        let (request_tx, request_rx) = kanal::bounded_async(1);
        let busy = Arc::new(AtomicBool::new(false));

        tokio::spawn(worker(
            request_rx,
            event_tx,
            engine,
            resolver,
            ocr_timeout,
            busy.clone(),
        ));

        (Self { request_tx, busy }, event_rx)
    }

    /// Admit one extraction request, or reject immediately with [`Busy`]
    /// while the worker is occupied. Never blocks.
    pub fn submit(&self, image: ImageHandle) -> Result<RequestHandle, Busy> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Busy);
        }

        let cancel = CancellationToken::new();
        let request = Request {
            id: Uuid::new_v4(),
            image,
            cancel: cancel.clone(),
        };
        let id = request.id;

        // Capacity 1 and the busy guard make this send non-blocking; a full
        // or closed channel here means the worker is gone.
        match self.request_tx.try_send(request) {
            Ok(true) => Ok(RequestHandle { id, cancel }),
            Ok(false) | Err(_) => {
                self.busy.store(false, Ordering::Release);
                Err(Busy)
            }
        }
    }
}

async fn worker(
    request_rx: AsyncReceiver<Request>,
    event_tx: AsyncSender<PipelineEvent>,
    engine: Arc<dyn OcrEngine>,
    resolver: Arc<dyn DefinitionResolver>,
    ocr_timeout: Duration,
    busy: Arc<AtomicBool>,
) {
    while let Ok(request) = request_rx.recv().await {
        if let Err(e) = run_request(&request, &*engine, &*resolver, ocr_timeout, &event_tx).await {
            tracing::error!(request_id = %request.id, "event delivery failed: {e}");
        }
        busy.store(false, Ordering::Release);
    }
}

/// One pass through the state machine:
/// Extracting -> Analyzing -> ResolvingDefinition -> terminal event.
async fn run_request(
    request: &Request,
    engine: &dyn OcrEngine,
    resolver: &dyn DefinitionResolver,
    ocr_timeout: Duration,
    event_tx: &AsyncSender<PipelineEvent>,
) -> anyhow::Result<()> {
    let Request { id, image, cancel } = request;

    if cancel.is_cancelled() {
        event_tx.send(PipelineEvent::Cancelled).await?;
        return Ok(());
    }

    tracing::info!(request_id = %id, "extraction started");
    event_tx
        .send(PipelineEvent::Progress(PipelineStage::Extracting))
        .await?;

    let extraction = tokio::select! {
        result = tokio::time::timeout(ocr_timeout, engine.extract(image, cancel)) => {
            result.unwrap_or_else(|_| {
                Err(OcrError::RecognitionFailed(format!(
                    "extraction exceeded {}s ceiling",
                    ocr_timeout.as_secs()
                )))
            })
        }
        _ = cancel.cancelled() => {
            tracing::info!(request_id = %id, "cancelled during extraction");
            event_tx.send(PipelineEvent::Cancelled).await?;
            return Ok(());
        }
    };

    // Result of a cancelled request is discarded even if the engine ran to
    // completion
    if cancel.is_cancelled() {
        event_tx.send(PipelineEvent::Cancelled).await?;
        return Ok(());
    }

    let raw_text = match extraction {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(request_id = %id, "extraction failed: {error}");
            event_tx
                .send(PipelineEvent::Failed(AnalyticsResult::from_extraction_error(error)))
                .await?;
            return Ok(());
        }
    };

    event_tx
        .send(PipelineEvent::Progress(PipelineStage::Analyzing))
        .await?;
    let normalized = ocrify_core::normalize(&raw_text);
    let tokens = ocrify_core::tokenize(&normalized);
    let analytics = ocrify_core::analyze(&tokens);
    tracing::debug!(request_id = %id, words = analytics.word_count, "analysis done");

    if cancel.is_cancelled() {
        event_tx.send(PipelineEvent::Cancelled).await?;
        return Ok(());
    }

    event_tx
        .send(PipelineEvent::Progress(PipelineStage::ResolvingDefinition))
        .await?;
    let definition = resolver.resolve(analytics.rarest_word.as_deref()).await;

    if cancel.is_cancelled() {
        event_tx.send(PipelineEvent::Cancelled).await?;
        return Ok(());
    }

    let result = build_result(raw_text, analytics, definition);
    tracing::info!(request_id = %id, words = result.word_count, "extraction completed");
    event_tx.send(PipelineEvent::Completed(result)).await?;
    Ok(())
}

fn build_result(
    raw_text: String,
    analytics: TextAnalytics,
    definition: Option<String>,
) -> AnalyticsResult {
    AnalyticsResult {
        char_count: raw_text.chars().count(),
        line_count: raw_text.lines().count(),
        raw_text,
        word_count: analytics.word_count,
        top_words: analytics.top_words,
        rarest_word: analytics.rarest_word,
        definition,
        extraction_error: None,
    }
}
