pub mod args;

pub use args::{parse_args, print_completion, print_help, print_usage, Config, ParseOutcome};
