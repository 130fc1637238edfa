//! Outbound ポート: アプリが外界（環境変数・LLM・ログ）を使うための trait

pub mod env_resolver;
pub mod llm_provider;
pub mod log;

pub use env_resolver::EnvResolver;
pub use llm_provider::{LlmProvider, Message};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
