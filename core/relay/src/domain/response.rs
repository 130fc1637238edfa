//! 呼び出し結果（常にこのいずれかを返す）

use super::ProcessingTally;
use serde_json::{json, Value};

pub const NO_RECORDS_MESSAGE: &str = "No records to process";
pub const COMPLETE_MESSAGE: &str = "Processing complete";

/// 呼び出しの構造化結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResponse {
    /// レコード無し（何もしない）
    NoRecords,
    /// 全レコードを処理した（個別の失敗は processed.failed に含まれる）
    Complete { processed: ProcessingTally },
    /// 呼び出し全体が中断した（それまでの集計を持つ）
    Failed {
        error: String,
        processed: ProcessingTally,
    },
}

impl RelayResponse {
    pub fn status(&self) -> u16 {
        match self {
            Self::NoRecords | Self::Complete { .. } => 200,
            Self::Failed { .. } => 500,
        }
    }

    /// 集計（NoRecords は None）
    pub fn processed(&self) -> Option<ProcessingTally> {
        match self {
            Self::NoRecords => None,
            Self::Complete { processed } | Self::Failed { processed, .. } => Some(*processed),
        }
    }

    /// status を除いた本文
    pub fn body(&self) -> Value {
        match self {
            Self::NoRecords => json!({ "message": NO_RECORDS_MESSAGE }),
            Self::Complete { processed } => json!({
                "message": COMPLETE_MESSAGE,
                "processed": processed,
            }),
            Self::Failed { error, processed } => json!({
                "error": error,
                "processed": processed,
            }),
        }
    }

    /// Lambda プロキシ形式 `{"statusCode": .., "body": "<JSON 文字列>"}`
    pub fn to_lambda_json(&self) -> Value {
        json!({
            "statusCode": self.status(),
            "body": self.body().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_records_shape() {
        let r = RelayResponse::NoRecords;
        assert_eq!(r.status(), 200);
        assert_eq!(r.body(), json!({"message": "No records to process"}));
        assert!(r.processed().is_none());
    }

    #[test]
    fn test_complete_shape() {
        let r = RelayResponse::Complete {
            processed: ProcessingTally::new(3, 1),
        };
        assert_eq!(r.status(), 200);
        assert_eq!(
            r.body(),
            json!({"message": "Processing complete", "processed": {"success": 3, "failed": 1}})
        );
    }

    #[test]
    fn test_failed_lambda_encoding() {
        let r = RelayResponse::Failed {
            error: "OpenAI API key not found in environment variables".to_string(),
            processed: ProcessingTally::default(),
        };
        let v = r.to_lambda_json();
        assert_eq!(v["statusCode"], 500);
        let body: Value = serde_json::from_str(v["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["processed"], json!({"success": 0, "failed": 0}));
        assert!(body["error"].as_str().unwrap().contains("API key"));
    }
}
