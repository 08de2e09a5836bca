//! gistnotify - gist comment notifier
//!
//! CLI entry point for a single notification run.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use gistnotify::cli::Cli;
use gistnotify::config::Config;
use gistnotify::{
    GistSource, NotificationDispatcher, NotificationRequest, ReportComposer, ReqwestFetcher, RunCoordinator,
    SmtpMailer, WatermarkStore,
};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gistnotify")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("gistnotify.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    debug!(?config, "main: configuration resolved");

    let password = cli.password(&config).ok_or_else(|| {
        eyre!(
            "No SMTP password given. Pass it as PASSWORD or set the {} environment variable.",
            config.mail.password_env
        )
    })?;

    let request = NotificationRequest {
        recipient: cli.recipient.clone(),
        sender: cli.sender.clone(),
        password,
        smtp_server: config.mail.smtp_server.clone(),
        smtp_port: config.mail.smtp_port,
    };
    request.validate().context("Invalid mail settings")?;

    let fetcher = ReqwestFetcher::from_config(&config.github).context("Failed to create HTTP client")?;
    let mailer = SmtpMailer::new(&request).context("Failed to create mail transport")?;
    let composer =
        ReportComposer::from_file(config.report.template.as_deref()).context("Failed to load report template")?;

    let coordinator = RunCoordinator::new(
        cli.user.clone(),
        WatermarkStore::new(&config.watermark.path),
        GistSource::new(
            Arc::new(fetcher),
            config.github.api_base_url.clone(),
            config.github.comment_delay(),
        ),
        composer,
        NotificationDispatcher::new(request, config.mail.subject.clone(), Arc::new(mailer)),
    );

    let summary = coordinator
        .run()
        .await
        .context(format!("Run for {} failed", cli.user))?;

    info!(next = %summary.next, "Run for {} complete", cli.user);
    println!("{}", summary.to_string().cyan());
    if let Some(report) = &summary.report {
        println!("{}", report);
        println!("{} Sent digest to {}", "✓".green(), cli.recipient);
    }

    Ok(())
}
