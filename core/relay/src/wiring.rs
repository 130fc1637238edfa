//! 配線: 標準アダプタで RelayUseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StderrJsonLog};
use common::ports::outbound::{EnvResolver, Log};

use crate::adapter::StdTransformFactory;
use crate::domain::RelayConfig;
use crate::ports::inbound::HandleEvent;
use crate::ports::outbound::TransformFactory;
use crate::usecase::RelayUseCase;

/// 組み立て済みのアプリ
pub struct App {
    pub logger: Arc<dyn Log>,
    pub handler: Arc<dyn HandleEvent>,
}

/// 設定からロガーを選ぶ（--log-file 指定時はファイル、既定は stderr）
pub fn logger_for(config: &RelayConfig) -> Arc<dyn Log> {
    match &config.log_file {
        Some(path) => Arc::new(FileJsonLog::new(path)),
        None => Arc::new(StderrJsonLog),
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_relay(config: &RelayConfig, env_resolver: Arc<dyn EnvResolver>) -> App {
    let logger = logger_for(config);
    let factory: Arc<dyn TransformFactory> = Arc::new(StdTransformFactory::new(
        env_resolver,
        Arc::clone(&logger),
        config,
    ));
    wire_with_factory(config, logger, factory)
}

/// 変換ファクトリを差し替えて組み立てる（テストではスタブを渡す）
pub fn wire_with_factory(
    config: &RelayConfig,
    logger: Arc<dyn Log>,
    factory: Arc<dyn TransformFactory>,
) -> App {
    let handler = Arc::new(RelayUseCase::new(
        Arc::clone(&logger),
        factory,
        config.batch_size,
    ));
    App { logger, handler }
}
