//! アダプター（外界の I/O を trait で抽象化）
//!
//! usecase は ports の trait 経由でのみ環境変数・ログに触れる。
//! 実装は標準実装（Std*）やテスト用の MemoryLog / NoopLog を注入する。

pub mod file_json_log;
pub mod memory_log;
pub mod std_env_resolver;

pub use file_json_log::{FileJsonLog, NoopLog, StderrJsonLog};
pub use memory_log::MemoryLog;
pub use std_env_resolver::StdEnvResolver;
