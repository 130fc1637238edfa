//! メッセージ変換の生成 Outbound ポート
//!
//! 呼び出しごとに変換クライアントを組み立てる。資格情報が無ければ Error::Config で即失敗する。

use super::MessageTransform;
use common::error::Error;

pub trait TransformFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn MessageTransform>, Error>;
}
