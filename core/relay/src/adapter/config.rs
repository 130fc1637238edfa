//! 実行設定の解決（CLI 引数 > 環境変数 > 既定値）

use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::ProviderType;
use common::ports::outbound::EnvResolver;
use std::path::PathBuf;

use crate::cli::Config;
use crate::domain::{BatchSize, RelayConfig};

pub const BATCH_SIZE_ENV: &str = "RELAY_BATCH_SIZE";
pub const PROVIDER_ENV: &str = "RELAY_PROVIDER";
pub const MODEL_ENV: &str = "RELAY_MODEL";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const LOG_FILE_ENV: &str = "RELAY_LOG_FILE";

/// 引数と環境変数から RelayConfig を組み立てる。不正値は引数エラー。
///
/// API キーはここでは読まない（レコードがある呼び出しでのみ TransformFactory が読む）。
pub fn resolve_config(args: &Config, env: &dyn EnvResolver) -> Result<RelayConfig, Error> {
    let defaults = RelayConfig::default();

    let batch_size = match args.batch_size.clone().or_else(|| env.var(BATCH_SIZE_ENV)) {
        Some(s) => BatchSize::parse(&s)?,
        None => defaults.batch_size,
    };

    let provider = match args
        .provider
        .clone()
        .or_else(|| env.var(PROVIDER_ENV).map(ProviderName::new))
    {
        Some(name) => ProviderType::from_name(&name)?,
        None => defaults.provider,
    };

    let model = args
        .model
        .clone()
        .or_else(|| env.var(MODEL_ENV).map(ModelName::new))
        .unwrap_or(defaults.model);

    let base_url = args.base_url.clone().or_else(|| env.var(BASE_URL_ENV));

    let log_file = args
        .log_file
        .clone()
        .or_else(|| env.var(LOG_FILE_ENV).map(PathBuf::from));

    Ok(RelayConfig {
        batch_size,
        provider,
        model,
        base_url,
        log_file,
    })
}
