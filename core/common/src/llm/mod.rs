//! LLMプロバイダの実装
//!
//! OpenAI 互換 API とオフライン用 Echo を同じトレイトで扱う。

pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;

pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::{LlmProvider, Message};
