//! ImageStudio: prompt-driven image generation with a guaranteed result.
//!
//! A [`GenerationRequest`] is composed into a final prompt, handed to an
//! ordered chain of remote backends (OpenRouter, Hugging Face,
//! Replicate) with optional Gemini image analysis, and falls back to a
//! deterministic local placeholder renderer when every remote attempt
//! fails. Successful results are kept in a bounded most-recent-first
//! history.

pub mod backends;
pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod render;
pub mod storage;
pub mod studio;

pub use backends::{ImageBackend, Orchestrator, PromptAnalyzer};
pub use config::{Config, GeminiConfig, HuggingFaceConfig, OpenRouterConfig, ReplicateConfig};
pub use error::{Result, StudioError};
pub use export::export_image;
pub use models::{
    AppMode, AspectRatio, CreateFunction, CreateStyle, EditFunction, GenerationRequest,
    GenerationResult, ImageFormat, ReferenceImage, RetouchStyle, SourceBackend,
    StyleFunctionStyle,
};
pub use storage::{FileHistoryStore, HistoryList, HistoryStore, MemoryHistoryStore, HISTORY_CAP};
pub use studio::StudioClient;
