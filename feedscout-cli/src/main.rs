use anyhow::{Context, Result};
use clap::Parser;
use feedscout::{
    matchers::register_builtin, metrics::RunMetrics, JsonFeedFile, MatcherRegistry, SearchConfig,
    SearchEngine,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Term to search for (regular expression, case-sensitive)
    term: Option<String>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match SearchConfig::load_from(cli.config.as_deref())
        .and_then(|config| config.merge_with_cli(cli.term))
    {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SearchConfig) -> Result<()> {
    let metrics = RunMetrics::new();

    let mut registry = MatcherRegistry::new();
    register_builtin(&mut registry, config, &metrics).context("registering matchers")?;

    let source = JsonFeedFile::new(&config.feeds_path);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    SearchEngine::new(&registry)
        .with_worker_threads(config.worker_threads)
        .with_metrics(metrics)
        .run(&source, &config.search_term, &mut out)
        .with_context(|| format!("searching feeds from {}", source.path().display()))?;

    Ok(())
}

/// Logs go to stderr; stdout carries only rendered results
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
