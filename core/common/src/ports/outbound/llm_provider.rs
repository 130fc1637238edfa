//! LLM プロバイダ Outbound ポート（re-export）
//!
//! トレイト定義は llm/provider にあり、adapter からはポート経由で参照する。

pub use crate::llm::provider::{LlmProvider, Message};
