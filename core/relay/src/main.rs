mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{Read, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;

use cli::{parse_args, print_completion, print_help, print_usage, ParseOutcome};
use common::adapter::StdEnvResolver;
use common::error::{Error, EXIT_SYSTEM};
use common::ports::outbound::{EnvResolver, LogRecord};
use domain::InboundEvent;
use wiring::{wire_relay, App};

/// イベント 1 件を処理し、応答 JSON を出力する Runner
struct Runner {
    app: App,
}

impl Runner {
    /// 応答を `out` に 1 行で書き出し、終了コードを返す（200 → 0, 500 → 70）
    fn run(&self, event_json: &str, out: &mut dyn Write) -> Result<i32, Error> {
        let event = InboundEvent::from_json(event_json)
            .map_err(|e| Error::invalid_argument(format!("Invalid event JSON: {}", e)))?;

        let _ = self.app.logger.log(
            &LogRecord::info("invocation started")
                .layer("cli")
                .kind("lifecycle")
                .field("records", event.records.len()),
        );

        let response = self.app.handler.handle(&event);

        writeln!(out, "{}", response.to_lambda_json())?;
        out.flush()?;

        let code = if response.status() == 200 { 0 } else { EXIT_SYSTEM };
        let mut rec = LogRecord::info("invocation finished")
            .layer("cli")
            .kind("lifecycle")
            .field("status", response.status())
            .field("exit_code", code);
        if let Some(processed) = response.processed() {
            rec = rec
                .field("success", processed.success)
                .field("failed", processed.failed);
        }
        let _ = self.app.logger.log(&rec);
        Ok(code)
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("relay: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

/// --event のファイル、未指定なら stdin からイベント JSON を読む
fn read_event(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| Error::io_msg(format!("Failed to read {}: {}", p.display(), e))),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Error::io_msg(format!("Failed to read stdin: {}", e)))?;
            Ok(buf)
        }
    }
}

pub fn run() -> Result<i32, Error> {
    let args = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if args.help {
        print_help();
        return Ok(0);
    }

    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let config = adapter::resolve_config(&args, env_resolver.as_ref())?;
    let event_json = read_event(args.event.as_deref())?;

    let runner = Runner {
        app: wire_relay(&config, env_resolver),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.run(&event_json, &mut out)
}
