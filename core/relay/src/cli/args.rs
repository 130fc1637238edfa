use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

/// コマンドライン引数（未指定は None。環境変数・既定値との合成は adapter::config で行う）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --event: 配信イベント JSON のパス（未指定なら stdin）
    pub event: Option<PathBuf>,
    /// --batch-size: 文字列のまま保持し、解決時に検証する
    pub batch_size: Option<String>,
    pub provider: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("relay")
        .about("Relay queued messages to an LLM and report a success/failure tally")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("event")
                .short('e')
                .long("event")
                .value_name("path")
                .help("Delivery event JSON file (default: read from stdin)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("batch-size")
                .short('b')
                .long("batch-size")
                .value_name("n")
                .help("Number of messages per batch (default: 10)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("provider")
                .short('p')
                .long("provider")
                .value_name("provider")
                .help("LLM provider (openai, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (default: gpt-3.5-turbo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("base-url")
                .long("base-url")
                .value_name("url")
                .help("Chat completions base URL (default: https://api.openai.com/v1)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Append JSONL logs to this file instead of stderr")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        event: matches.get_one::<PathBuf>("event").cloned(),
        batch_size: matches.get_one::<String>("batch-size").cloned(),
        provider: matches
            .get_one::<String>("provider")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        base_url: matches.get_one::<String>("base-url").cloned(),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "relay", &mut std::io::stdout());
}

pub fn print_usage() {
    eprintln!("Usage: relay [options] [--event <path>]");
}

pub fn print_help() {
    println!("Usage: relay [options] [--event <path>]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -e, --event <path>         Delivery event JSON file. Default: read from stdin");
    println!("  -b, --batch-size <n>       Messages per batch (>= 1). Default: 10");
    println!("  -p, --provider <provider>  LLM provider: openai (default) or echo (offline, no API key)");
    println!("  -m, --model <model>        Model name. Default: gpt-3.5-turbo");
    println!("      --base-url <url>       Chat completions base URL. Default: https://api.openai.com/v1");
    println!("      --log-file <path>      Append JSONL logs to a file. Default: stderr");
    println!("      --generate <shell>     Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY     API key for the openai provider (required when records are present)");
    println!("  OPENAI_BASE_URL    Same as --base-url");
    println!("  RELAY_BATCH_SIZE   Same as --batch-size");
    println!("  RELAY_PROVIDER     Same as --provider");
    println!("  RELAY_MODEL        Same as --model");
    println!("  RELAY_LOG_FILE     Same as --log-file");
    println!();
    println!("Input:");
    println!(r#"  {{"Records": [{{"body": "{{\"message\": \"...\"}}"}}, ...]}}"#);
    println!();
    println!("Output (stdout):");
    println!(r#"  {{"statusCode": 200, "body": "{{\"message\": \"Processing complete\", \"processed\": {{...}}}}"}}"#);
}
