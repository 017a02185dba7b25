use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base URL of the dictionary service; the word is appended as a path
    /// segment.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-lookup timeout. Exceeding it degrades to an absent definition.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let enabled = env::var("OCRIFY_DICT_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_enabled);

        let api_url = env::var("OCRIFY_DICT_URL").unwrap_or_else(|_| default_api_url());

        let timeout_secs = env::var("OCRIFY_DICT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Self {
            enabled,
            api_url,
            timeout_secs,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
