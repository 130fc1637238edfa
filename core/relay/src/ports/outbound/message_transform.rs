//! 単発メッセージ変換の Outbound ポート
//!
//! 1 メッセージを LLM に送り、平易に言い換えた応答文字列を得る。

use crate::domain::MessageText;
use common::error::Error;

/// 1 メッセージの変換（同期・リトライなし）
///
/// 失敗はそのまま呼び出し元へ返す。呼び出し元が failed として数える。
pub trait MessageTransform {
    fn transform(&self, text: &MessageText) -> Result<String, Error>;
}
