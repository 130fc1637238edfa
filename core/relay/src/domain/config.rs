//! 解決済みの実行設定（CLI 引数 > 環境変数 > 既定値）

use super::BatchSize;
use common::domain::ModelName;
use common::llm::openai_compat::DEFAULT_MODEL;
use common::llm::ProviderType;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub batch_size: BatchSize,
    pub provider: ProviderType,
    pub model: ModelName,
    /// None のときプロバイダ既定の URL
    pub base_url: Option<String>,
    /// None のとき stderr にログを出す
    pub log_file: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            batch_size: BatchSize::default(),
            provider: ProviderType::OpenAi,
            model: ModelName::new(DEFAULT_MODEL),
            base_url: None,
            log_file: None,
        }
    }
}
