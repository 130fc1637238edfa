//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::{ApiKey, ModelName, ProviderName};
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::{LlmProvider, Message};
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAi,
    /// Echo（API を呼ばず user メッセージを返すだけ）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" | "openai_compat" => Some(Self::OpenAi),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダ名から解析（未知の名前は引数エラー）
    pub fn from_name(name: &ProviderName) -> Result<Self, Error> {
        Self::parse(name).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown provider: {} (expected one of: openai, echo)",
                name
            ))
        })
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Echo => "echo",
        }
    }

    /// API キーが必須か
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    OpenAi(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::OpenAi(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::OpenAi(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        match self {
            Self::OpenAi(p) => p.make_request_payload(query, system_instruction, history),
            Self::Echo(p) => p.make_request_payload(query, system_instruction, history),
        }
    }
}

/// プロバイダを作成
///
/// # Arguments
/// * `provider_type` - プロバイダタイプ
/// * `model` - モデル名（None のときプロバイダ既定）
/// * `base_url` - ベース URL（OpenAI 互換のみ）
/// * `api_key` - API キー（OpenAI 互換では必須）
/// * `temperature` - 温度
///
/// # Errors
/// API キー必須のプロバイダでキーが無い場合は `Error::Config`
pub fn create_provider(
    provider_type: ProviderType,
    model: Option<ModelName>,
    base_url: Option<String>,
    api_key: Option<ApiKey>,
    temperature: Option<f64>,
) -> Result<AnyProvider, Error> {
    if provider_type.requires_api_key() && api_key.is_none() {
        return Err(Error::config(
            "OpenAI API key not found in environment variables",
        ));
    }
    match provider_type {
        ProviderType::OpenAi => Ok(AnyProvider::OpenAi(OpenAiCompatProvider::new(
            model,
            base_url,
            api_key,
            temperature,
        ))),
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}
