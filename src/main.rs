use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use w3c_tokens::{build, BuildConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "build-tokens")]
#[command(about = "Generate W3C design tokens from the design primitives file")]
struct Args {
    /// Primitives JSON document
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Destination of the tokens document, missing directories are created
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            args.verbose,
        ))
        .init();

    let config = BuildConfig {
        input: args.input,
        output: args.output,
    };
    let report = build(&config).context("Failed to build tokens")?;
    println!(
        "Successfully generated W3C tokens at {}",
        report.output.display()
    );
    Ok(())
}

/// `RUST_LOG` wins when set; `--verbose` only picks the fallback level.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.to_string()))
}

#[test]
fn rust_log_takes_precedence() {
    assert_eq!(log_filter(Some("warn"), false).max_level_hint(), Some(LevelFilter::WARN));
    assert_eq!(log_filter(Some("warn"), true).max_level_hint(), Some(LevelFilter::WARN));
    assert_eq!(log_filter(Some("trace"), false).max_level_hint(), Some(LevelFilter::TRACE));
}

#[test]
fn verbose_sets_fallback_level() {
    assert_eq!(log_filter(None, false).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(log_filter(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
    assert_eq!(log_filter(Some(""), true).max_level_hint(), Some(LevelFilter::DEBUG));
}
