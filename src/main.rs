use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kousei_rs::config::Config;
use kousei_rs::discover;
use kousei_rs::format::{self, OutputFormat};
use kousei_rs::linter::Linter;
use kousei_rs::result::Severity;
use kousei_rs::server::KouseiServer;

#[derive(Debug, Parser)]
#[command(name = "kousei", version, about = "Proofreading linter for Japanese Markdown")]
struct Cli {
    /// Config file (defaults to ./kousei.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User dictionary (YAML, JSON or one word per line)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check files and print findings
    Check {
        /// Files or glob patterns (default: **/*.md)
        inputs: Vec<String>,

        /// Directory that inputs are resolved against
        #[arg(long, default_value = ".")]
        root: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with status 1 when a finding is at or above this level
        #[arg(long, value_enum)]
        fail_on: Option<FailLevel>,
    },
    /// Run the Language Server over stdio
    Lsp,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FailLevel {
    Info,
    Warning,
    Error,
}

impl From<FailLevel> for Severity {
    fn from(level: FailLevel) -> Self {
        match level {
            FailLevel::Info => Severity::Info,
            FailLevel::Warning => Severity::Warning,
            FailLevel::Error => Severity::Error,
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_from_default(),
    };
    if let Some(dictionary) = &cli.dictionary {
        config.dictionary.path = Some(dictionary.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let linter = Linter::new(&config);

    match cli.command {
        Command::Check {
            inputs,
            root,
            format,
            fail_on,
        } => {
            let files = discover::collect(&inputs, &root);
            let results = linter.lint_files_in(&root, &files);

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            format::write_results(&mut out, &results, format).context("writing results")?;
            out.flush()?;

            let failed = fail_on
                .map(Severity::from)
                .is_some_and(|level| results.iter().any(|r| r.severity >= level));
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Command::Lsp => {
            tracing::info!("Starting kousei Language Server...");

            let linter = Arc::new(linter);
            let stdin = tokio::io::stdin();
            let stdout = tokio::io::stdout();

            let (service, socket) = LspService::new(|client| KouseiServer::new(client, linter.clone()));
            Server::new(stdin, stdout, socket).serve(service).await;

            Ok(ExitCode::SUCCESS)
        }
    }
}
