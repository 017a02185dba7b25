use std::env;

use serde::{Deserialize, Serialize};

fn default_command() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable name or path.
    #[serde(default = "default_command")]
    pub command: String,
    /// Language model passed to the engine (`-l`).
    #[serde(default = "default_language")]
    pub language: String,
    /// Wall-clock ceiling for one extraction, enforced by the pipeline.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl OcrConfig {
    pub fn new() -> Self {
        let command = env::var("OCRIFY_TESSERACT_CMD").unwrap_or_else(|_| default_command());

        let language = env::var("OCRIFY_OCR_LANG").unwrap_or_else(|_| default_language());

        let timeout_secs = env::var("OCRIFY_OCR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Self {
            command,
            language,
            timeout_secs,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
