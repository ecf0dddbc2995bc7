use std::env;

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub referer: Option<String>,
    pub app_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_token: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    pub api_token: Option<String>,
    pub model_version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter: Option<OpenRouterConfig>,
    pub huggingface: Option<HuggingFaceConfig>,
    pub replicate: Option<ReplicateConfig>,
    pub gemini: Option<GeminiConfig>,
    pub history_path: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        OpenRouterConfig {
            api_key: None,
            model: None,
            referer: None,
            app_title: None,
        }
    }
}

impl OpenRouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("OPENROUTER_API_KEY").ok();
        let model = env::var("OPENROUTER_MODEL").ok();
        let referer = env::var("OPENROUTER_REFERER").ok();
        let app_title = env::var("OPENROUTER_APP_TITLE").ok();

        OpenRouterConfig {
            api_key,
            model,
            referer,
            app_title,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_app_info(
        mut self,
        referer: impl Into<String>,
        app_title: impl Into<String>,
    ) -> Self {
        self.referer = Some(referer.into());
        self.app_title = Some(app_title.into());
        self
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        HuggingFaceConfig {
            api_token: None,
            model: None,
        }
    }
}

impl HuggingFaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_token = env::var("HUGGINGFACE_API_TOKEN").ok();
        let model = env::var("HUGGINGFACE_MODEL").ok();

        HuggingFaceConfig { api_token, model }
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        ReplicateConfig {
            api_token: None,
            model_version: None,
        }
    }
}

impl ReplicateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_token = env::var("REPLICATE_API_TOKEN").ok();
        let model_version = env::var("REPLICATE_MODEL_VERSION").ok();

        ReplicateConfig {
            api_token,
            model_version,
        }
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_model_version(mut self, model_version: impl Into<String>) -> Self {
        self.model_version = Some(model_version.into());
        self
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        let model = env::var("GEMINI_MODEL").ok();

        GeminiConfig { api_key, model }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openrouter: None,
            huggingface: None,
            replicate: None,
            gemini: None,
            history_path: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let history_path = env::var("IMAGESTUDIO_HISTORY_PATH").ok();

        Config {
            openrouter: Some(OpenRouterConfig::from_env()),
            huggingface: Some(HuggingFaceConfig::from_env()),
            replicate: Some(ReplicateConfig::from_env()),
            gemini: Some(GeminiConfig::from_env()),
            history_path,
        }
    }

    pub fn with_openrouter(mut self, config: OpenRouterConfig) -> Self {
        self.openrouter = Some(config);
        self
    }

    pub fn with_huggingface(mut self, config: HuggingFaceConfig) -> Self {
        self.huggingface = Some(config);
        self
    }

    pub fn with_replicate(mut self, config: ReplicateConfig) -> Self {
        self.replicate = Some(config);
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_history_path(mut self, path: impl Into<String>) -> Self {
        self.history_path = Some(path.into());
        self
    }
}
