pub mod relay;

pub use relay::{process_batch, RelayUseCase};
