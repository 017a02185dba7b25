mod api;

pub use api::DictionaryApiResolver;

use async_trait::async_trait;

/// Best-effort definition lookup for one word. Failure of any kind degrades
/// to `None`; nothing propagates past this boundary.
#[async_trait]
pub trait DefinitionResolver: Send + Sync {
    /// `None` input short-circuits to `None` without a network call.
    async fn resolve(&self, word: Option<&str>) -> Option<String>;
}

/// Resolver used when dictionary lookups are disabled.
pub struct DisabledResolver;

#[async_trait]
impl DefinitionResolver for DisabledResolver {
    async fn resolve(&self, _word: Option<&str>) -> Option<String> {
        None
    }
}
