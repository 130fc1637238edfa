//! Outbound ポート: アプリが外界（LLM によるメッセージ変換）を使うための trait

pub mod message_transform;
pub mod transform_factory;

pub use message_transform::MessageTransform;
pub use transform_factory::TransformFactory;
