//! バッチバッファ（抽出済みメッセージを一定件数まで溜める）

use super::MessageText;
use common::error::Error;

/// 既定のバッチサイズ
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// バッチサイズ（1 以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    pub fn new(n: usize) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::invalid_argument("batch size must be at least 1"));
        }
        Ok(Self(n))
    }

    /// 文字列（CLI 引数・環境変数）から解析
    pub fn parse(s: &str) -> Result<Self, Error> {
        let n = s
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::invalid_argument(format!("invalid batch size: {}", s)))?;
        Self::new(n)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_BATCH_SIZE)
    }
}

/// 1 回の呼び出し内でだけ使うバッファ
#[derive(Debug)]
pub struct BatchBuffer {
    capacity: BatchSize,
    items: Vec<MessageText>,
}

impl BatchBuffer {
    pub fn new(capacity: BatchSize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn append(&mut self, text: MessageText) {
        self.items.push(text);
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity.get()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 中身を取り出して空に戻す
    pub fn flush(&mut self) -> Vec<MessageText> {
        std::mem::take(&mut self.items)
    }
}
