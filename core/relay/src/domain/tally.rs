//! 処理件数の集計

use serde::Serialize;

/// 1 回の呼び出しの成功・失敗件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingTally {
    pub success: usize,
    pub failed: usize,
}

impl ProcessingTally {
    pub fn new(success: usize, failed: usize) -> Self {
        Self { success, failed }
    }

    pub fn record_success(&mut self) {
        self.success += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}
