use serde::{Deserialize, Serialize};

/// OCR adapter failures. Fatal for the request they belong to; carried
/// inside the degraded [`AnalyticsResult`] rather than thrown across the
/// pipeline boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("text recognition failed: {0}")]
    RecognitionFailed(String),
}

/// One entry of the top-10 frequency view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub count: usize,
}

/// Immutable per-request output aggregate. Built once by the pipeline
/// worker and handed to the consumer with the terminal event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    /// Engine output verbatim, no trimming beyond the engine's own.
    pub raw_text: String,
    /// Total token count, not distinct token count.
    pub word_count: usize,
    pub char_count: usize,
    pub line_count: usize,
    /// Sorted by count descending, ties by first occurrence, at most 10.
    pub top_words: Vec<RankedWord>,
    /// First token with exactly one occurrence, if any.
    pub rarest_word: Option<String>,
    /// Dictionary definition of the rarest word, best effort.
    pub definition: Option<String>,
    pub extraction_error: Option<OcrError>,
}

impl AnalyticsResult {
    /// Degraded result for a failed extraction: analytics fields at their
    /// empty defaults, the error carried along.
    pub fn from_extraction_error(error: OcrError) -> Self {
        Self {
            raw_text: String::new(),
            word_count: 0,
            char_count: 0,
            line_count: 0,
            top_words: Vec::new(),
            rarest_word: None,
            definition: None,
            extraction_error: Some(error),
        }
    }
}

/// Pipeline stages reported through advisory progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Extracting,
    Analyzing,
    ResolvingDefinition,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Extracting => write!(f, "extracting text"),
            PipelineStage::Analyzing => write!(f, "analyzing text"),
            PipelineStage::ResolvingDefinition => write!(f, "resolving definition"),
        }
    }
}

/// Events delivered to the consumer for an admitted request: any number of
/// advisory `Progress` events followed by exactly one terminal event.
/// Rejected submissions never reach the worker and report `Busy`
/// synchronously at the submission site instead.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Progress(PipelineStage),
    Completed(AnalyticsResult),
    /// Extraction failed; the result carries `extraction_error` and empty
    /// analytics.
    Failed(AnalyticsResult),
    Cancelled,
}
