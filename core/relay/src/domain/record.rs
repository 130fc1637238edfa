//! 配信イベントとレコード（SQS 形式）、およびメッセージ本文の抽出

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// 配信イベント `{ "Records": [ ... ] }`
///
/// `Records` が無い・null の場合は空として扱う。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "Records", default, deserialize_with = "null_as_empty")]
    pub records: Vec<InboundRecord>,
}

fn null_as_empty<'de, D>(d: D) -> Result<Vec<InboundRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<InboundRecord>>::deserialize(d)?.unwrap_or_default())
}

impl InboundEvent {
    pub fn new(records: Vec<InboundRecord>) -> Self {
        Self { records }
    }

    /// イベント JSON を解析する
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// キューから届いた 1 レコード
///
/// `body` は `{"message": "..."}` をシリアライズした文字列のはずだが、形の崩れたレコードも
/// イベント全体を拒否せずに受け取り、抽出時に不正として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct InboundRecord {
    pub message_id: Option<String>,
    pub body: Option<Value>,
}

impl From<Value> for InboundRecord {
    fn from(value: Value) -> Self {
        let Value::Object(mut obj) = value else {
            return Self::default();
        };
        let message_id = match obj.get("messageId") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            message_id,
            body: obj.remove("body"),
        }
    }
}

impl InboundRecord {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            message_id: None,
            body: Some(Value::String(body.into())),
        }
    }

    /// 本文から `message` を取り出す（副作用なし・何度呼んでも同じ結果）
    pub fn extract(&self) -> Result<MessageText, MalformedRecordError> {
        extract_message(self.body.as_ref()).map_err(|fault| MalformedRecordError {
            record: self.clone(),
            fault,
        })
    }
}

fn extract_message(body: Option<&Value>) -> Result<MessageText, RecordFault> {
    let body = match body {
        None | Some(Value::Null) => return Err(RecordFault::MissingBody),
        Some(Value::String(s)) => s,
        Some(_) => return Err(RecordFault::BodyNotString),
    };
    let parsed: Value =
        serde_json::from_str(body).map_err(|e| RecordFault::InvalidJson(e.to_string()))?;
    let obj = parsed.as_object().ok_or(RecordFault::NotAnObject)?;
    match obj.get("message") {
        None | Some(Value::Null) => Err(RecordFault::MissingMessage),
        Some(Value::String(s)) => MessageText::new(s.clone()).ok_or(RecordFault::MissingMessage),
        Some(_) => Err(RecordFault::MessageNotString),
    }
}

/// 抽出に失敗した理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFault {
    #[error("record has no body")]
    MissingBody,
    #[error("body is not a string")]
    BodyNotString,
    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("body is not a JSON object")]
    NotAnObject,
    #[error("Missing 'message' in the SQS JSON body")]
    MissingMessage,
    #[error("'message' is not a string")]
    MessageNotString,
}

/// 不正レコード（レコード単位で回復可能。failed として数えて次へ進む）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to process record: {fault}")]
pub struct MalformedRecordError {
    pub record: InboundRecord,
    #[source]
    pub fault: RecordFault,
}

/// 抽出済みのメッセージ本文（空でないことを保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// 空文字なら None
    pub fn new(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }
}

impl std::ops::Deref for MessageText {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
