use std::time::Duration;

use async_trait::async_trait;
use ocrify_config::dictionary::DictionaryConfig;

use crate::DefinitionResolver;

/// Client for the Free Dictionary API
/// (`https://api.dictionaryapi.dev/api/v2/entries/en/<word>`).
pub struct DictionaryApiResolver {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryApiResolver {
    pub fn new(config: &DictionaryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("failed to build HTTP client with timeout: {e}");
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn lookup(&self, word: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, word);
        let response = self.client.get(&url).send().await?;

        // The service answers 404 for unknown words; any non-success status
        // is treated the same as not-found
        if !response.status().is_success() {
            tracing::debug!("dictionary returned {} for {word:?}", response.status());
            return Ok(None);
        }

        let body: serde_json::Value = response.json().await?;
        Ok(parse_definition(&body))
    }
}

#[async_trait]
impl DefinitionResolver for DictionaryApiResolver {
    async fn resolve(&self, word: Option<&str>) -> Option<String> {
        let word = word?;
        match self.lookup(word).await {
            Ok(definition) => definition,
            Err(e) => {
                tracing::warn!("dictionary lookup for {word:?} failed: {e}");
                None
            }
        }
    }
}

/// Pull a short definition out of a dictionaryapi.dev response: up to two
/// meanings, up to two definitions each, rendered as
/// `part_of_speech: definition` segments.
fn parse_definition(body: &serde_json::Value) -> Option<String> {
    let entry = body.get(0)?;
    let meanings = entry.get("meanings")?.as_array()?;

    let mut segments = Vec::new();
    for meaning in meanings.iter().take(2) {
        let part_of_speech = meaning
            .get("partOfSpeech")
            .and_then(|p| p.as_str())
            .unwrap_or("unknown");

        let definitions = meaning
            .get("definitions")
            .and_then(|d| d.as_array())
            .map(|d| d.as_slice())
            .unwrap_or_default();

        for definition in definitions.iter().take(2) {
            if let Some(text) = definition.get("definition").and_then(|d| d.as_str()) {
                segments.push(format!("{part_of_speech}: {text}"));
            }
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_meanings_and_definitions() {
        let body = json!([{
            "word": "cat",
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        { "definition": "A small domesticated feline." },
                        { "definition": "A spiteful woman." },
                        { "definition": "A third definition that is skipped." }
                    ]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        { "definition": "To vomit." }
                    ]
                }
            ]
        }]);

        let definition = parse_definition(&body).unwrap();
        assert_eq!(
            definition,
            "noun: A small domesticated feline.; noun: A spiteful woman.; verb: To vomit."
        );
    }

    #[test]
    fn not_found_body_yields_none() {
        let body = json!({
            "title": "No Definitions Found",
            "message": "Sorry pal, we couldn't find definitions for the word you were looking for."
        });
        assert_eq!(parse_definition(&body), None);
    }

    #[test]
    fn empty_meanings_yield_none() {
        let body = json!([{ "word": "xylophone", "meanings": [] }]);
        assert_eq!(parse_definition(&body), None);
    }

    #[tokio::test]
    async fn absent_word_short_circuits() {
        // Unroutable base URL: resolve(None) must return without any call
        let config = DictionaryConfig {
            api_url: "http://192.0.2.1/entries".to_string(),
            timeout_secs: 1,
            ..DictionaryConfig::default()
        };
        let resolver = DictionaryApiResolver::new(&config);
        assert_eq!(resolver.resolve(None).await, None);
    }

    #[tokio::test]
    async fn network_failure_degrades_to_none() {
        let config = DictionaryConfig {
            // RFC 5737 TEST-NET, guaranteed unreachable
            api_url: "http://192.0.2.1/entries".to_string(),
            timeout_secs: 1,
            ..DictionaryConfig::default()
        };
        let resolver = DictionaryApiResolver::new(&config);
        assert_eq!(resolver.resolve(Some("xylophone")).await, None);
    }
}
