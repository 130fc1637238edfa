//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（メッセージ変換 = LLM 呼び出し）を使うための trait

pub mod inbound;
pub mod outbound;
