pub mod gemini;
pub mod huggingface;
pub mod openrouter;
pub mod replicate;
pub mod traits;

use crate::{
    config::Config,
    error::Result,
    models::{GenerationRequest, GenerationResult, SourceBackend},
    prompt, render,
};
use base64::Engine as _;
use uuid::Uuid;

pub use gemini::GeminiAnalyzer;
pub use huggingface::HuggingFaceBackend;
pub use openrouter::OpenRouterBackend;
pub use replicate::ReplicateBackend;
pub use traits::{ImageBackend, PromptAnalyzer};

/// Walks the ordered fallback chain: optional prompt analysis, then each
/// remote backend in turn, terminating in the local placeholder renderer.
/// Backend failures are absorbed; the only error the caller can see is a
/// pre-flight validation error.
pub struct Orchestrator {
    analyzer: Option<Box<dyn PromptAnalyzer>>,
    backends: Vec<Box<dyn ImageBackend>>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            analyzer: None,
            backends: Vec::new(),
        }
    }

    /// Standard chain: OpenRouter, then Hugging Face, then Replicate,
    /// with Gemini as the analysis step. Backends without configuration
    /// are simply left out of the chain.
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();
        let mut orchestrator = Self::new();

        if let Some(gemini) = &config.gemini {
            orchestrator.analyzer = Some(Box::new(GeminiAnalyzer::new(
                client.clone(),
                gemini.clone(),
            )));
        }
        if let Some(openrouter) = &config.openrouter {
            orchestrator
                .backends
                .push(Box::new(OpenRouterBackend::new(
                    client.clone(),
                    openrouter.clone(),
                )));
        }
        if let Some(huggingface) = &config.huggingface {
            orchestrator
                .backends
                .push(Box::new(HuggingFaceBackend::new(
                    client.clone(),
                    huggingface.clone(),
                )));
        }
        if let Some(replicate) = &config.replicate {
            orchestrator.backends.push(Box::new(ReplicateBackend::new(
                client.clone(),
                replicate.clone(),
            )));
        }

        orchestrator
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn PromptAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Adding or removing a backend is a list edit, not a new code path
    pub fn with_backend(mut self, backend: Box<dyn ImageBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Run the chain for one request. Exactly one successful result is
    /// produced; every remote attempt is a single request and a failure
    /// only advances the chain.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;

        let run_id = Uuid::new_v4().to_string();
        let run_id = &run_id[..8];
        let (width, height) = request.dimensions();
        let mut composed = prompt::compose(request);

        log::debug!("🧩 [{}] Composed prompt: {}", run_id, composed);

        if !request.reference_images.is_empty() {
            if let Some(analyzer) = &self.analyzer {
                match analyzer.analyze(&composed, &request.reference_images).await {
                    Ok(enriched) => {
                        log::info!("🔍 [{}] Prompt enriched by {} analysis", run_id, analyzer.name());
                        composed = enriched;
                    }
                    Err(e) => {
                        log::warn!(
                            "🔍 [{}] {} analysis failed, continuing with original prompt: {}",
                            run_id,
                            analyzer.name(),
                            e
                        );
                    }
                }
            }
        }

        for backend in &self.backends {
            log::info!("🎨 [{}] Trying backend: {}", run_id, backend.name());
            match backend
                .try_generate(&composed, &request.reference_images, width, height)
                .await
            {
                Ok(image_data) => {
                    log::info!("✅ [{}] Backend {} succeeded", run_id, backend.name());
                    return Ok(GenerationResult {
                        image_data,
                        source_backend: backend.source(),
                        composed_prompt: composed,
                    });
                }
                Err(e) => {
                    log::warn!("⚠️  [{}] Backend {} failed: {}", run_id, backend.name(), e);
                }
            }
        }

        log::info!(
            "🖼️  [{}] All remote backends exhausted, rendering local placeholder",
            run_id
        );
        let bytes = render::render_placeholder(&composed, width, height)?;
        Ok(GenerationResult {
            image_data: base64::engine::general_purpose::STANDARD.encode(bytes),
            source_backend: SourceBackend::LocalFallback,
            composed_prompt: composed,
        })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
