//! テスト用: 固定のキー・値を返す EnvResolver 実装


#[cfg(test)]
pub use map::MapEnvResolver;
