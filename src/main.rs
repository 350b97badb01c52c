//! TransAssist - AI-assisted translation for web-based translation platforms
//!
//! Main entry point for the TransAssist CLI and stdio bridge.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use transassist_background::serve_lines;
use transassist_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use transassist_core::SiteRegistry;

mod adapters;
mod cli;
mod cmd_scan;
mod cmd_sites;
mod register;

use cli::{Cli, Commands};
use cmd_scan::ScanOptions;
use register::create_background_service;

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so it never mixes with command output or
/// the bridge protocol on stdout. Log files rotate daily.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::expand_path(&logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("transassist")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the file writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
        )
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        // An explicitly named file must exist.
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_tracing(&config.logging)?;

    if !matches!(cli.command, Commands::Validate) {
        ensure_valid(&config)?;
    }
    let registry = || SiteRegistry::from_config(&config).map(Arc::new);

    match cli.command {
        Commands::Validate => cmd_sites::validate(&config),
        Commands::Sites { format } => cmd_sites::sites_list(&*registry()?, &format),
        Commands::CheckSite { host } => cmd_sites::check_site(&config, registry()?, &host).await,
        Commands::Scan {
            file,
            host,
            translate,
            apply,
            output,
        } => {
            let options = ScanOptions {
                file,
                host,
                translate,
                apply,
                output,
            };
            cmd_scan::scan(&config, registry()?, options).await
        }
        Commands::Bridge => run_bridge(&config, registry()?).await,
        Commands::ForceEnable { host, disable } => {
            cmd_sites::force_enable(&config, registry()?, &host, !disable).await
        }
    }
}

/// Log validation warnings; refuse to run on errors.
fn ensure_valid(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(config)?;
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if validation.is_valid() {
        return Ok(());
    }
    for error in &validation.errors {
        error!("{}: {}", error.path, error.message);
    }
    Err("Invalid configuration, run `transassist validate` for details".into())
}

/// Serve background requests on stdin/stdout until stdin closes.
async fn run_bridge(config: &Config, registry: Arc<SiteRegistry>) -> Result<(), Box<dyn std::error::Error>> {
    let service = create_background_service(config, registry);
    info!("Bridge ready, reading requests from stdin");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let answered = serve_lines(&service, stdin, stdout).await?;

    info!("Bridge stopped after {} requests", answered);
    Ok(())
}
