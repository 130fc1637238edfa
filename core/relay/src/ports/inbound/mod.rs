//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::domain::{InboundEvent, RelayResponse};

/// 配信イベント 1 件を処理する Inbound ポート
///
/// 失敗は RelayResponse::Failed として返し、エラーを外へ伝播させない。
pub trait HandleEvent: Send + Sync {
    fn handle(&self, event: &InboundEvent) -> RelayResponse;
}
