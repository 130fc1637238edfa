//! メモリに溜める Log 実装（テストで出力内容を検証する）

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Mutex;

/// 出力されたレコードを保持する Log 実装
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに記録されたレコードのコピー
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// message が一致するレコードのみ
    pub fn with_message(&self, message: &str) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.message == message)
            .collect()
    }

    /// kind が一致するレコードのみ
    pub fn with_kind(&self, kind: &str) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.kind.as_deref() == Some(kind))
            .collect()
    }

    pub fn count_level(&self, level: LogLevel) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }
}

impl Log for MemoryLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records
            .lock()
            .map_err(|_| Error::system("log lock poisoned"))?
            .push(record.clone());
        Ok(())
    }
}
