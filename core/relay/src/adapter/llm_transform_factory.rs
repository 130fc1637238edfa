//! 標準の TransformFactory（環境変数から API キーを読み、プロバイダを組み立てる）

use std::sync::Arc;

use common::domain::{ApiKey, ModelName};
use common::error::Error;
use common::llm::{create_provider, ProviderType};
use common::ports::outbound::{EnvResolver, Log, LogRecord};

use super::llm_transform::LlmMessageTransform;
use crate::domain::RelayConfig;
use crate::ports::outbound::{MessageTransform, TransformFactory};

/// API キーを読む環境変数
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// 決定的な応答を得るため温度は固定で 0
const TEMPERATURE: f64 = 0.0;

pub struct StdTransformFactory {
    env: Arc<dyn EnvResolver>,
    log: Arc<dyn Log>,
    provider: ProviderType,
    model: ModelName,
    base_url: Option<String>,
}

impl StdTransformFactory {
    pub fn new(env: Arc<dyn EnvResolver>, log: Arc<dyn Log>, config: &RelayConfig) -> Self {
        Self {
            env,
            log,
            provider: config.provider,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl TransformFactory for StdTransformFactory {
    fn create(&self) -> Result<Box<dyn MessageTransform>, Error> {
        let api_key = self.env.var(API_KEY_ENV).map(ApiKey::new);
        let provider = create_provider(
            self.provider,
            Some(self.model.clone()),
            self.base_url.clone(),
            api_key,
            Some(TEMPERATURE),
        )?;
        let _ = self.log.log(
            &LogRecord::info("transform client ready")
                .layer("adapter")
                .kind("lifecycle")
                .field("provider", self.provider.as_str())
                .field("model", &*self.model),
        );
        Ok(Box::new(LlmMessageTransform::new(
            provider,
            Arc::clone(&self.log),
        )))
    }
}
