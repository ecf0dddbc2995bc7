use crate::{
    error::Result,
    models::{ReferenceImage, SourceBackend},
};
use async_trait::async_trait;

/// A remote image-generation provider. Each adapter issues a single
/// request with no internal retry; retries happen only by advancing the
/// fallback chain to the next backend.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn source(&self) -> SourceBackend;

    /// Attempt one generation. Returns base64 encoded image bytes on
    /// success. Any error advances the chain; a missing API key counts
    /// as an immediate failure.
    async fn try_generate(
        &self,
        prompt: &str,
        images: &[ReferenceImage],
        width: u32,
        height: u32,
    ) -> Result<String>;
}

/// Optional multimodal enrichment step run before the generation
/// attempts when reference images are present. Failure is non-fatal.
#[async_trait]
pub trait PromptAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the enriched prompt to use for the generation attempts
    async fn analyze(&self, prompt: &str, images: &[ReferenceImage]) -> Result<String>;
}
