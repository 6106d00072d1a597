mod app_config;

pub use app_config::{
    AppConfig, EmbeddingConfig, KnowledgeConfig, LlmConfig, LogFormat, LoggingConfig,
    MetricsConfig, ServerConfig, SessionsConfig, WebSearchConfig,
};
