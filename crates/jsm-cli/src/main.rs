mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use jsm_core::MinifyConfig;
use jsm_runner::{Report, ReportFormat, Runner, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "jsmin")]
#[command(version, about = "Minify JavaScript files", long_about = None)]
struct Cli {
    /// Input file or directory
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file (single-file mode only; defaults to <stem>.min<ext>)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Keep polling the input and re-minify files when they change
    #[arg(short, long)]
    watch: bool,

    /// Keep a leading /*! ... */ license comment
    #[arg(long)]
    preserve_license: bool,

    /// Rename var/let/const bindings to short names
    #[arg(long)]
    shorten_vars: bool,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,

    /// Maximum files minified at once in directory mode
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Poll period for --watch, in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Log the buffer after every pipeline stage (implies -v)
    #[arg(long)]
    debug_stages: bool,

    /// JSON config file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn verbosity(&self) -> u8 {
        if self.debug_stages {
            self.verbose.max(1)
        } else {
            self.verbose
        }
    }

    fn format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else {
            ReportFormat::Text
        }
    }

    /// Config file (or defaults) with command-line overrides applied.
    fn resolve_config(&self) -> Result<MinifyConfig> {
        let mut config = match &self.config {
            Some(path) => MinifyConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => MinifyConfig::default(),
        };
        config.preserve_license |= self.preserve_license;
        config.shorten_vars |= self.shorten_vars;
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(ms) = self.interval_ms {
            config.watch_interval_ms = ms;
        }
        config.validate().context("invalid options")?;
        Ok(config)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

async fn run_once(cli: &Cli, runner: &Runner) -> Result<()> {
    let format = cli.format();
    if cli.input.is_dir() {
        if cli.output.is_some() {
            tracing::warn!("--output is ignored for directory input");
        }
        let outcome = runner
            .process_directory(&cli.input)
            .await
            .with_context(|| format!("failed to process directory {}", cli.input.display()))?;
        println!("{}", Report::render_many(&outcome.stats, format)?);
        tracing::info!(
            files = outcome.summary.files,
            failures = outcome.summary.failures,
            original_bytes = outcome.summary.original_bytes,
            minified_bytes = outcome.summary.minified_bytes,
            "batch summary"
        );
    } else {
        let stats = runner
            .process_single(&cli.input, cli.output.as_deref())
            .await
            .with_context(|| format!("failed to minify {}", cli.input.display()))?;
        print!("{}", Report::render_one(&stats, format)?);
        if format == ReportFormat::Json {
            println!();
        }
    }
    Ok(())
}

async fn run_watch(cli: &Cli, runner: Runner, interval: Duration) -> Result<()> {
    ensure_exists(&cli.input)?;
    let mut watcher = Watcher::new(runner, &cli.input, interval).with_output(cli.output.clone());
    watcher.run(shutdown_signal()).await?;
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<()> {
    anyhow::ensure!(path.exists(), "input not found: {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbosity(), cli.log_json);

    let config = cli.resolve_config()?;
    tracing::debug!(?config, "resolved config");
    let runner = Runner::new(&config).with_stage_trace(cli.debug_stages);

    if cli.watch {
        run_watch(&cli, runner, Duration::from_millis(config.watch_interval_ms)).await
    } else {
        run_once(&cli, &runner).await
    }
}
