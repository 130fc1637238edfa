//! テスト用: ネットワークを使わない MessageTransform / TransformFactory

#[cfg(test)]
mod stub {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use common::error::Error;

    use crate::domain::MessageText;
    use crate::ports::outbound::{MessageTransform, TransformFactory};

    #[derive(Debug, Default)]
    struct StubState {
        calls: Mutex<Vec<String>>,
        failing: HashSet<String>,
        panicking: HashSet<String>,
        reply: Option<String>,
    }

    /// テスト用: 入力を記録し、固定の応答（または失敗）を返す
    pub struct StubTransform {
        state: Arc<StubState>,
    }

    impl MessageTransform for StubTransform {
        fn transform(&self, text: &MessageText) -> Result<String, Error> {
            self.state.calls.lock().unwrap().push(text.to_string());
            if self.state.panicking.contains(&**text) {
                panic!("stub transform panicked on {}", &**text);
            }
            if self.state.failing.contains(&**text) {
                return Err(Error::http(format!("HTTP request failed: network error for {}", &**text)));
            }
            Ok(self
                .state
                .reply
                .clone()
                .unwrap_or_else(|| format!("simple: {}", &**text)))
        }
    }

    /// テスト用: StubTransform を生成するファクトリ（生成失敗も再現できる）
    pub struct StubTransformFactory {
        state: Arc<StubState>,
        create_error: Option<Error>,
        creates: AtomicUsize,
    }

    impl StubTransformFactory {
        pub fn new() -> Self {
            Self {
                state: Arc::new(StubState::default()),
                create_error: None,
                creates: AtomicUsize::new(0),
            }
        }

        /// 常に同じ文字列を返す
        pub fn with_reply(reply: &str) -> Self {
            Self {
                state: Arc::new(StubState {
                    reply: Some(reply.to_string()),
                    ..StubState::default()
                }),
                ..Self::new()
            }
        }

        /// 指定した入力のときだけ変換を失敗させる
        pub fn failing_on(inputs: &[&str]) -> Self {
            Self {
                state: Arc::new(StubState {
                    failing: inputs.iter().map(|s| s.to_string()).collect(),
                    ..StubState::default()
                }),
                ..Self::new()
            }
        }

        /// 指定した入力のときに panic させる（想定外エラーの再現）
        pub fn panicking_on(inputs: &[&str]) -> Self {
            Self {
                state: Arc::new(StubState {
                    panicking: inputs.iter().map(|s| s.to_string()).collect(),
                    ..StubState::default()
                }),
                ..Self::new()
            }
        }

        /// 資格情報が無い状態を再現する（create が Error::Config）
        pub fn missing_credentials() -> Self {
            Self {
                create_error: Some(Error::config(
                    "OpenAI API key not found in environment variables",
                )),
                ..Self::new()
            }
        }

        /// transform に渡された入力（呼び出し順）
        pub fn calls(&self) -> Vec<String> {
            self.state.calls.lock().unwrap().clone()
        }

        pub fn create_count(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }
    }

    impl TransformFactory for StubTransformFactory {
        fn create(&self) -> Result<Box<dyn MessageTransform>, Error> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if let Some(e) = &self.create_error {
                return Err(e.clone());
            }
            Ok(Box::new(StubTransform {
                state: Arc::clone(&self.state),
            }))
        }
    }
}

#[cfg(test)]
pub use stub::StubTransformFactory;
