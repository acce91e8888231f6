use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use fraud_rule_engine::config::RuleConfig;
use fraud_rule_engine::engine::{EvaluationOutcome, FraudEngine};
use fraud_rule_engine::storage::{CreditLimitStore, MerchantRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Three positional arguments do not justify pulling in clap yet.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: fraud-rule-engine [input].csv [log_level:optional] [rules].json:optional > [outcome].json");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let config = match args.get(3) {
        Some(config_path) => RuleConfig::from_json_file(config_path)
            .with_context(|| format!("Invalid rule configuration at path: {config_path}"))?,
        None => RuleConfig::default()
    };

    let merchants = Arc::new(MerchantRegistry::with_defaults());
    let credit_limits = Arc::new(CreditLimitStore::with_defaults());
    let engine = FraudEngine::new(config, merchants, credit_limits)?;

    let timer = Instant::now();
    let outcome = engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Evaluated batch in: {duration:?}");

    write_report_to_stdout(&outcome)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the JSON report, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(outcome: &EvaluationOutcome) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    //NOTE: Rejected records travel with the reports so they are visible at any log level.
    serde_json::to_writer_pretty(&mut output, outcome)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
