//! JSONL で書き出す Log 実装（ファイル追記 / stderr）と何もしない NoopLog

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn to_line(record: &LogRecord) -> Result<String, Error> {
    let mut line = serde_json::to_string(record).map_err(|e| Error::json(e.to_string()))?;
    line.push('\n');
    Ok(line)
}

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    path: PathBuf,
    // 複数スレッドからの同時追記で行が混ざらないようにする
    lock: Mutex<()>,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let line = to_line(record)?;
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::system("log lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        w.write_all(line.as_bytes())?;
        w.flush()?;
        Ok(())
    }
}

/// stderr へ JSONL を出力する Log 実装（CLI の既定）
///
/// stdout は応答 JSON 専用のため、ログは stderr に分離する。
#[derive(Debug, Clone, Default)]
pub struct StderrJsonLog;

impl Log for StderrJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let line = to_line(record)?;
        let mut err = std::io::stderr().lock();
        err.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}
