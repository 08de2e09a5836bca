//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;

/// gistnotify - email a digest of new comments on your gists
#[derive(Debug, Parser)]
#[command(name = "gn")]
#[command(author, version, about = "Email a digest of new comments on a user's gists", long_about = None)]
pub struct Cli {
    /// GitHub user whose gists are checked
    #[arg(value_name = "USER", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub user: String,

    /// Address the digest is sent to
    #[arg(value_name = "RECIPIENT")]
    pub recipient: String,

    /// Address the digest is sent from (also the SMTP login)
    #[arg(value_name = "SENDER")]
    pub sender: String,

    /// SMTP password for SENDER (default: read from the environment variable in `mail.password-env`)
    #[arg(value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Mail relay host (default: smtp.gmail.com)
    #[arg(short, long)]
    pub smtp_server: Option<String>,

    /// File holding the last successful run time
    #[arg(short, long)]
    pub watermark_file: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        debug!(?self.smtp_server, ?self.watermark_file, "Cli::apply: called");
        if let Some(server) = &self.smtp_server {
            config.mail.smtp_server = server.clone();
        }
        if let Some(path) = &self.watermark_file {
            config.watermark.path = path.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
    }

    /// The password from the command line, or from the configured environment variable
    pub fn password(&self, config: &Config) -> Option<String> {
        self.password
            .clone()
            .or_else(|| std::env::var(&config.mail.password_env).ok())
            .filter(|p| !p.is_empty())
    }
}
