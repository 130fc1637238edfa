//! relay 固有のドメイン型（型と不変条件）

pub mod batch;
pub mod config;
pub mod record;
pub mod response;
pub mod tally;

pub use batch::{BatchBuffer, BatchSize};
pub use config::RelayConfig;
pub use record::{InboundEvent, MessageText};
pub use response::RelayResponse;
pub use tally::ProcessingTally;
