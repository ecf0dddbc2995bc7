use crate::{
    backends::Orchestrator,
    config::Config,
    error::{Result, StudioError},
    logger,
    models::{GenerationRequest, GenerationResult},
    storage::{FileHistoryStore, HistoryList, HistoryStore},
};

/// Top-level client tying the composer, the fallback chain and the
/// history together. UI state lives with the caller; the client only
/// sees explicit, immutable [`GenerationRequest`] values.
pub struct StudioClient {
    orchestrator: Orchestrator,
    store: Option<Box<dyn HistoryStore>>,
    history: HistoryList,
    last_request: Option<GenerationRequest>,
}

impl StudioClient {
    pub async fn new(config: Config) -> Result<Self> {
        let store: Option<Box<dyn HistoryStore>> = config
            .history_path
            .as_ref()
            .map(|path| Box::new(FileHistoryStore::new(path)) as Box<dyn HistoryStore>);

        Self::from_parts(Orchestrator::from_config(&config), store).await
    }

    /// Assemble a client from an explicit chain and store, used by tests
    /// and by embedders with their own backend list
    pub async fn from_parts(
        orchestrator: Orchestrator,
        store: Option<Box<dyn HistoryStore>>,
    ) -> Result<Self> {
        let history = match &store {
            Some(store) => HistoryList::from_entries(store.load().await?),
            None => HistoryList::new(),
        };

        Ok(Self {
            orchestrator,
            store,
            history,
            last_request: None,
        })
    }

    /// Run one generation. On success the result lands at the head of
    /// the history and the request is remembered for the variation
    /// feature. The only error path is pre-flight validation.
    pub async fn generate(&mut self, request: GenerationRequest) -> Result<GenerationResult> {
        let _timer = logger::timer("generate");
        let result = self.orchestrator.generate(&request).await?;

        self.record(&result).await;
        self.last_request = Some(request);
        Ok(result)
    }

    /// Re-run the last successful request unchanged. The composer is
    /// deterministic, so the backend sees the same prompt again; the new
    /// result is inserted ahead of the original in the history.
    pub async fn generate_variation(&mut self) -> Result<GenerationResult> {
        let request = self.last_request.clone().ok_or_else(|| {
            StudioError::ValidationError("Generate an image first to create variations".into())
        })?;

        let _timer = logger::timer("generate_variation");
        let result = self.orchestrator.generate(&request).await?;
        self.record(&result).await;
        Ok(result)
    }

    async fn record(&mut self, result: &GenerationResult) {
        self.history.push(result.to_data_url());
        if let Some(store) = &self.store {
            // History persistence must never fail a successful generation
            if let Err(e) = store.save(self.history.entries()).await {
                log::error!("❌ Failed to persist history: {}", e);
            }
        }
    }

    pub fn history(&self) -> &HistoryList {
        &self.history
    }

    pub fn last_request(&self) -> Option<&GenerationRequest> {
        self.last_request.as_ref()
    }

    /// Explicit user action; the only way history shrinks besides the cap
    pub async fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        if let Some(store) = &self.store {
            store.clear().await?;
        }
        Ok(())
    }
}
