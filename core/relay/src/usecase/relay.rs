//! 配信イベントの処理（抽出 → バッチ蓄積 → 1 件ずつ変換 → 集計）

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogRecord};

use crate::domain::{
    BatchBuffer, BatchSize, InboundEvent, MessageText, ProcessingTally, RelayResponse,
};
use crate::ports::inbound::HandleEvent;
use crate::ports::outbound::{MessageTransform, TransformFactory};

/// バッチ 1 つ分を順に変換し、結果を `tally` に加算する。
///
/// 1 件の失敗でバッチを中断しない。戻り値はこのバッチだけの集計。
pub fn process_batch(
    transform: &dyn MessageTransform,
    batch: &[MessageText],
    tally: &mut ProcessingTally,
    log: &dyn Log,
) -> ProcessingTally {
    let mut local = ProcessingTally::default();
    for (index, text) in batch.iter().enumerate() {
        match transform.transform(text) {
            Ok(_) => local.record_success(),
            Err(e) => {
                local.record_failure();
                let _ = log.log(
                    &LogRecord::warn(format!("Failed to transform message: {}", e))
                        .layer("usecase")
                        .kind("transform")
                        .field("item_index", index)
                        .field("error_kind", e.kind_name()),
                );
            }
        }
    }
    tally.success += local.success;
    tally.failed += local.failed;
    local
}

/// relay のユースケース
pub struct RelayUseCase {
    log: Arc<dyn Log>,
    transform_factory: Arc<dyn TransformFactory>,
    batch_size: BatchSize,
}

impl RelayUseCase {
    pub fn new(
        log: Arc<dyn Log>,
        transform_factory: Arc<dyn TransformFactory>,
        batch_size: BatchSize,
    ) -> Self {
        Self {
            log,
            transform_factory,
            batch_size,
        }
    }

    fn flush(
        &self,
        transform: &dyn MessageTransform,
        buffer: &mut BatchBuffer,
        batch_index: &mut usize,
        tally: &mut ProcessingTally,
    ) {
        let batch = buffer.flush();
        let local = process_batch(transform, &batch, tally, self.log.as_ref());
        let _ = self.log.log(
            &LogRecord::info("batch processed")
                .layer("usecase")
                .kind("batch")
                .field("batch_index", *batch_index)
                .field("size", batch.len())
                .field("success", local.success)
                .field("failed", local.failed),
        );
        *batch_index += 1;
    }

    /// レコード列を処理する。`tally` には途中までの結果が残る。
    fn run(&self, event: &InboundEvent, tally: &mut ProcessingTally) -> Result<(), Error> {
        let transform = self.transform_factory.create()?;
        let mut buffer = BatchBuffer::new(self.batch_size);
        let mut batch_index = 0;

        for (index, record) in event.records.iter().enumerate() {
            match record.extract() {
                Ok(text) => {
                    buffer.append(text);
                    if buffer.is_full() {
                        self.flush(transform.as_ref(), &mut buffer, &mut batch_index, tally);
                    }
                }
                Err(e) => {
                    tally.record_failure();
                    let mut rec = LogRecord::warn(e.to_string())
                        .layer("usecase")
                        .kind("record")
                        .field("record_index", index);
                    if let Some(id) = &e.record.message_id {
                        rec = rec.field("message_id", id.as_str());
                    }
                    let _ = self.log.log(&rec);
                }
            }
        }

        if !buffer.is_empty() {
            self.flush(transform.as_ref(), &mut buffer, &mut batch_index, tally);
        }
        Ok(())
    }

    fn fail(&self, error: String, kind: &str, processed: ProcessingTally) -> RelayResponse {
        let _ = self.log.log(
            &LogRecord::error(format!("Main handler error: {}", error))
                .layer("usecase")
                .kind("error")
                .field("error_kind", kind)
                .field("success", processed.success)
                .field("failed", processed.failed),
        );
        RelayResponse::Failed { error, processed }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl HandleEvent for RelayUseCase {
    fn handle(&self, event: &InboundEvent) -> RelayResponse {
        if event.is_empty() {
            let _ = self.log.log(
                &LogRecord::info("No records to process")
                    .layer("usecase")
                    .kind("lifecycle"),
            );
            return RelayResponse::NoRecords;
        }

        let mut tally = ProcessingTally::default();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(event, &mut tally)));
        match outcome {
            Ok(Ok(())) => RelayResponse::Complete { processed: tally },
            Ok(Err(e)) => self.fail(e.to_string(), e.kind_name(), tally),
            Err(payload) => self.fail(
                format!("invocation panicked: {}", panic_message(payload.as_ref())),
                "panic",
                tally,
            ),
        }
    }
}
