//! LLM でメッセージを平易な言い回しに変換する MessageTransform 実装

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LlmProvider, LogRecord};

use crate::domain::MessageText;
use crate::ports::outbound::MessageTransform;

/// 固定の system 指示
pub const SYSTEM_PROMPT: &str = "You are an assistant that helps translate messages into simpler, clearer terms. \
Keep the translation concise and easy to understand.";

/// user メッセージのテンプレート
pub fn user_prompt(text: &str) -> String {
    format!("Translate this message in simpler terms: {}", text)
}

/// プロバイダ 1 つを保持し、1 メッセージにつき 1 リクエストを送る
pub struct LlmMessageTransform<P> {
    provider: P,
    log: Arc<dyn Log>,
}

impl<P: LlmProvider> LlmMessageTransform<P> {
    pub fn new(provider: P, log: Arc<dyn Log>) -> Self {
        Self { provider, log }
    }

    fn request(&self, text: &str) -> Result<String, Error> {
        let payload = self
            .provider
            .make_request_payload(&user_prompt(text), Some(SYSTEM_PROMPT), &[])?;
        let request_json = serde_json::to_string(&payload)?;
        let response_json = self.provider.make_http_request(&request_json)?;
        self.provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::json("Response contained no completion text"))
    }
}

impl<P: LlmProvider> MessageTransform for LlmMessageTransform<P> {
    fn transform(&self, text: &MessageText) -> Result<String, Error> {
        match self.request(text) {
            Ok(response) => {
                let _ = self.log.log(
                    &LogRecord::info(format!("GPT response: {}", response))
                        .layer("adapter")
                        .kind("transform")
                        .field("provider", self.provider.name())
                        .field("response", response.as_str()),
                );
                Ok(response)
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::error(format!("Error processing prompt: {}", e))
                        .layer("adapter")
                        .kind("transform")
                        .field("provider", self.provider.name()),
                );
                let _ = self.log.log(
                    &LogRecord::debug(format!("Full error: {:?}", e))
                        .layer("adapter")
                        .kind("transform")
                        .field("provider", self.provider.name())
                        .field("error_kind", e.kind_name())
                        .field("exit_code", e.exit_code())
                        .field("input_len", text.len()),
                );
                Err(e)
            }
        }
    }
}
