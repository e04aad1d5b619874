//! Entry point: config loading, logging setup, subcommand dispatch.

mod cli;
mod monitor;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::{Result, WrapErr};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::cli::{Cli, Commands, FILE_GUARD};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    init_logging(&cli, &cfg.logging)?;

    match cli.cmd {
        Commands::Monitor {
            ticks,
            ref history,
            stream,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&shutdown);
            ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
                .wrap_err("install Ctrl-C handler")?;
            monitor::run_monitor(&cfg, ticks, history, stream, &shutdown)?;
        }
        Commands::History { ref history } => monitor::run_history(history)?,
        Commands::Tune {
            register,
            value,
            locked,
        } => monitor::run_tune(&cfg, register, value, locked)?,
        Commands::SelfCheck => monitor::run_self_check(&cfg)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<pour_config::Config> {
    let cfg = if cli.config.exists() {
        let raw = fs::read_to_string(&cli.config)
            .wrap_err_with(|| format!("failed to read config {}", cli.config.display()))?;
        toml::from_str::<pour_config::Config>(&raw)
            .wrap_err_with(|| format!("failed to parse config {}", cli.config.display()))?
    } else {
        // Missing file is fine; every table has documented defaults.
        pour_config::Config::default()
    };
    cfg.validate().wrap_err("invalid configuration")?;
    Ok(cfg)
}

fn init_logging(cli: &Cli, logging: &pour_config::Logging) -> Result<()> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // Console on stderr, so stdout stays clean for data output.
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    if cli.json {
        layers.push(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(console_filter)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter)
                .boxed(),
        );
    }

    if let Some(file) = &logging.file {
        let path = Path::new(file);
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let name = path
            .file_name()
            .ok_or_else(|| eyre::eyre!("logging.file has no file name: {file}"))?;
        let dir = dir.unwrap_or_else(|| Path::new("."));
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        let file_level = logging.level.clone().unwrap_or_else(|| cli.log_level.clone());
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(file_level))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).init();
    Ok(())
}
