// Modular translation architecture
//
// The pipeline consumes translation through the `Translator` trait so tests
// can inject a stub (the real gateway draws random salts and talks to a
// stateful remote service). The production implementation signs each
// request for the Baidu translate endpoint.

pub mod baidu;
pub mod credentials;

use async_trait::async_trait;

pub use credentials::Credentials;

use crate::config::TranslateConfig;
use crate::error::Result;

/// Sentinel recorded in place of a translation once the gateway has been
/// switched off for the rest of the run.
pub const NO_TRANSLATION: &str = "无翻译";

/// Main trait for translation operations
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one cue text into the configured target language.
    async fn translate(&mut self, text: &str) -> Result<String>;

    /// Stop translating: this and every later call yields the sentinel.
    /// Sticky for the remainder of the run.
    fn disable(&mut self);

    fn is_disabled(&self) -> bool;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create the translator for one pipeline run, resolving credentials
    /// from the config or the user-home cache.
    pub fn create_translator(config: TranslateConfig) -> Result<Box<dyn Translator>> {
        let credentials = Credentials::resolve(&config)?;
        Ok(Box::new(baidu::BaiduTranslator::new(config, credentials)))
    }
}
