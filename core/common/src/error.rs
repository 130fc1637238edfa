//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。カテゴリごとに終了コードを持つ。

use thiserror::Error;

/// 引数不正（EX_USAGE）
pub const EXIT_USAGE: i32 = 64;
/// 内部エラー（EX_SOFTWARE）
pub const EXIT_SYSTEM: i32 = 70;
/// 入出力・HTTP エラー（EX_IOERR）
pub const EXIT_IO: i32 = 74;
/// 設定不備（EX_CONFIG）
pub const EXIT_CONFIG: i32 = 78;

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// 引数・入力の不正
    #[error("{0}")]
    InvalidArgument(String),
    /// 必須設定（API キー等）の欠落・不正
    #[error("{0}")]
    Config(String),
    /// HTTP 通信・API エラー
    #[error("{0}")]
    Http(String),
    /// JSON のパース・シリアライズ失敗
    #[error("{0}")]
    Json(String),
    /// ファイル等の I/O 失敗
    #[error("{0}")]
    Io(String),
    /// 分類外の内部エラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => EXIT_USAGE,
            Self::Config(_) => EXIT_CONFIG,
            Self::Http(_) | Self::Json(_) | Self::Io(_) => EXIT_IO,
            Self::System(_) => EXIT_SYSTEM,
        }
    }

    /// 使い方の表示が必要なエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// ログ用のカテゴリ名
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Config(_) => "config",
            Self::Http(_) => "http",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
            Self::System(_) => "system",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
