use async_trait::async_trait;
use base64::Engine as _;
use imagestudio::{
    AppMode, AspectRatio, EditFunction, GenerationRequest, ImageBackend, MemoryHistoryStore,
    Orchestrator, PromptAnalyzer, ReferenceImage, Result, SourceBackend, StudioClient,
    StudioError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct FailingBackend {
    calls: Arc<AtomicUsize>,
}

impl FailingBackend {
    fn new() -> (Box<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Self {
                calls: calls.clone(),
            }),
            calls,
        )
    }
}

#[async_trait]
impl ImageBackend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn source(&self) -> SourceBackend {
        SourceBackend::OpenRouter
    }

    async fn try_generate(
        &self,
        _prompt: &str,
        _images: &[ReferenceImage],
        _width: u32,
        _height: u32,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StudioError::RequestError("backend is down".into()))
    }
}

struct SucceedingBackend {
    seen_prompt: Arc<Mutex<Option<String>>>,
}

impl SucceedingBackend {
    fn new() -> (Box<Self>, Arc<Mutex<Option<String>>>) {
        let seen = Arc::new(Mutex::new(None));
        (
            Box::new(Self {
                seen_prompt: seen.clone(),
            }),
            seen,
        )
    }
}

#[async_trait]
impl ImageBackend for SucceedingBackend {
    fn name(&self) -> &'static str {
        "succeeding"
    }

    fn source(&self) -> SourceBackend {
        SourceBackend::HuggingFace
    }

    async fn try_generate(
        &self,
        prompt: &str,
        _images: &[ReferenceImage],
        _width: u32,
        _height: u32,
    ) -> Result<String> {
        *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(base64::engine::general_purpose::STANDARD.encode(b"fake image bytes"))
    }
}

struct EnrichingAnalyzer;

#[async_trait]
impl PromptAnalyzer for EnrichingAnalyzer {
    fn name(&self) -> &'static str {
        "enriching"
    }

    async fn analyze(&self, prompt: &str, _images: &[ReferenceImage]) -> Result<String> {
        Ok(format!("{} Based on the analysis: two cats.", prompt))
    }
}

struct FailingAnalyzer {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PromptAnalyzer for FailingAnalyzer {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn analyze(&self, _prompt: &str, _images: &[ReferenceImage]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StudioError::RequestError("analysis is down".into()))
    }
}

fn reference_image() -> ReferenceImage {
    ReferenceImage::new(vec![1, 2, 3, 4], "image/png")
}

#[tokio::test]
async fn chain_with_all_remotes_failing_ends_in_local_fallback() {
    let (b1, _) = FailingBackend::new();
    let (b2, _) = FailingBackend::new();
    let (b3, _) = FailingBackend::new();
    let orchestrator = Orchestrator::new()
        .with_backend(b1)
        .with_backend(b2)
        .with_backend(b3);

    let request =
        GenerationRequest::new("a red dog in the sun").with_aspect_ratio(AspectRatio::Wide);
    let result = orchestrator.generate(&request).await.unwrap();

    assert_eq!(result.source_backend, SourceBackend::LocalFallback);

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&result.image_data)
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.width(), 1920);
    assert_eq!(decoded.height(), 1080);
}

#[tokio::test]
async fn successful_backend_short_circuits_the_chain() {
    let (good, _) = SucceedingBackend::new();
    let (bad, bad_calls) = FailingBackend::new();
    let orchestrator = Orchestrator::new().with_backend(good).with_backend(bad);

    let result = orchestrator
        .generate(&GenerationRequest::new("a boat"))
        .await
        .unwrap();

    assert_eq!(result.source_backend, SourceBackend::HuggingFace);
    assert_eq!(bad_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn validation_error_precedes_any_network_call() {
    let (backend, calls) = FailingBackend::new();
    let orchestrator = Orchestrator::new().with_backend(backend);

    // Compose needs two images, only one attached
    let request = GenerationRequest::new("blend these")
        .with_edit_function(EditFunction::Compose)
        .with_reference_image(reference_image());

    let err = orchestrator.generate(&request).await.unwrap_err();
    assert!(matches!(err, StudioError::ValidationError(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyzer_failure_does_not_abort_the_chain() {
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = Orchestrator::new().with_analyzer(Box::new(FailingAnalyzer {
        calls: calls.clone(),
    }));

    let request = GenerationRequest::new("a cat on a sofa")
        .with_edit_function(EditFunction::AddRemove)
        .with_reference_image(reference_image());

    let result = orchestrator.generate(&request).await.unwrap();
    assert_eq!(result.source_backend, SourceBackend::LocalFallback);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn analyzer_runs_only_when_images_are_attached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = Orchestrator::new().with_analyzer(Box::new(FailingAnalyzer {
        calls: calls.clone(),
    }));

    let request = GenerationRequest::new("a cat on a sofa").with_mode(AppMode::Create);
    orchestrator.generate(&request).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyzer_enriches_the_prompt_seen_by_backends() {
    let (backend, seen) = SucceedingBackend::new();
    let orchestrator = Orchestrator::new()
        .with_analyzer(Box::new(EnrichingAnalyzer))
        .with_backend(backend);

    let request = GenerationRequest::new("remove the fence")
        .with_edit_function(EditFunction::AddRemove)
        .with_reference_image(reference_image());
    orchestrator.generate(&request).await.unwrap();

    let prompt = seen.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Based on the analysis: two cats."));
}

#[tokio::test]
async fn variation_reuses_the_stored_request_and_prepends_to_history() {
    let (backend, seen) = SucceedingBackend::new();
    let orchestrator = Orchestrator::new().with_backend(backend);
    let mut client = StudioClient::from_parts(orchestrator, Some(Box::new(MemoryHistoryStore::new())))
        .await
        .unwrap();

    let request =
        GenerationRequest::new("a lighthouse").with_aspect_ratio(AspectRatio::UltraWide);
    client.generate(request).await.unwrap();
    let first_prompt = seen.lock().unwrap().clone().unwrap();

    let variation = client.generate_variation().await.unwrap();
    let second_prompt = seen.lock().unwrap().clone().unwrap();

    // Same composed prompt both times
    assert_eq!(first_prompt, second_prompt);
    assert_eq!(client.history().len(), 2);
    // The variation sits ahead of the original
    assert_eq!(client.history().entries()[0], variation.to_data_url());
}

#[tokio::test]
async fn variation_without_a_previous_generation_fails_validation() {
    let mut client = StudioClient::from_parts(Orchestrator::new(), None)
        .await
        .unwrap();

    let err = client.generate_variation().await.unwrap_err();
    assert!(matches!(err, StudioError::ValidationError(_)));
}

#[tokio::test]
async fn history_survives_a_client_restart() {
    let store = Arc::new(MemoryHistoryStore::new());

    struct SharedStore(Arc<MemoryHistoryStore>);

    #[async_trait]
    impl imagestudio::HistoryStore for SharedStore {
        async fn load(&self) -> Result<Vec<String>> {
            self.0.load().await
        }
        async fn save(&self, entries: &[String]) -> Result<()> {
            self.0.save(entries).await
        }
        async fn clear(&self) -> Result<()> {
            self.0.clear().await
        }
    }

    {
        let (backend, _) = SucceedingBackend::new();
        let orchestrator = Orchestrator::new().with_backend(backend);
        let mut client =
            StudioClient::from_parts(orchestrator, Some(Box::new(SharedStore(store.clone()))))
                .await
                .unwrap();
        client
            .generate(GenerationRequest::new("a lighthouse"))
            .await
            .unwrap();
    }

    let client = StudioClient::from_parts(Orchestrator::new(), Some(Box::new(SharedStore(store))))
        .await
        .unwrap();
    assert_eq!(client.history().len(), 1);
}
