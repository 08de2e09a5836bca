//! gistnotify configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main gistnotify configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// GitHub API configuration
    pub github: GithubConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Watermark storage configuration
    pub watermark: WatermarkConfig,

    /// Report rendering configuration
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .gistnotify.yml
        let local_config = PathBuf::from(".gistnotify.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/gistnotify/gistnotify.yml
        if let Some(user_config) = user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, so logging can start before the full load
    ///
    /// Any failure here is swallowed; the full load reports it properly.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => [Some(PathBuf::from(".gistnotify.yml")), user_config_path()]
                .into_iter()
                .flatten()
                .collect(),
        };

        candidates
            .iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gistnotify").join("gistnotify.yml"))
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// API base URL
    #[serde(rename = "api-base-url")]
    pub api_base_url: String,

    /// User-Agent header sent with every request (GitHub rejects requests without one)
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Environment variable containing an optional API token
    #[serde(rename = "token-env")]
    pub token_env: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Pause before each comments request, in milliseconds
    #[serde(rename = "comment-delay-ms")]
    pub comment_delay_ms: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            user_agent: concat!("gistnotify/", env!("CARGO_PKG_VERSION")).to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            timeout_ms: 30_000,
            comment_delay_ms: 3_000,
        }
    }
}

impl GithubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn comment_delay(&self) -> Duration {
        Duration::from_millis(self.comment_delay_ms)
    }

    /// Read the API token from the configured environment variable, if set
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|t| !t.is_empty())
    }
}

/// Outbound mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Mail relay host
    #[serde(rename = "smtp-server")]
    pub smtp_server: String,

    /// Submission port (STARTTLS)
    #[serde(rename = "smtp-port")]
    pub smtp_port: u16,

    /// Subject line of every digest
    pub subject: String,

    /// Environment variable holding the sender password when not given on the command line
    #[serde(rename = "password-env")]
    pub password_env: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            subject: crate::DEFAULT_SUBJECT.to_string(),
            password_env: "GIST_NOTIFY_PASSWORD".to_string(),
        }
    }
}

/// Watermark storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// File holding the last successful run time
    pub path: PathBuf,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            path: std::env::temp_dir().join("gist-notifications-last-run-time"),
        }
    }
}

/// Report rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Handlebars template overriding the built-in digest layout
    pub template: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.github.comment_delay(), Duration::from_secs(3));
        assert_eq!(config.mail.smtp_server, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.subject, "New comments on gists");
        assert!(config.watermark.path.ends_with("gist-notifications-last-run-time"));
        assert!(config.report.template.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: DEBUG
github:
  api-base-url: https://ghe.example.com/api/v3
  user-agent: my-notifier
  token-env: MY_TOKEN
  timeout-ms: 5000
  comment-delay-ms: 250
mail:
  smtp-server: smtp.example.com
  smtp-port: 2525
  subject: Gist activity
  password-env: MY_MAIL_PASSWORD
watermark:
  path: /var/lib/gistnotify/last-run
report:
  template: /etc/gistnotify/digest.hbs
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.github.api_base_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.token_env, "MY_TOKEN");
        assert_eq!(config.github.timeout(), Duration::from_secs(5));
        assert_eq!(config.github.comment_delay(), Duration::from_millis(250));
        assert_eq!(config.mail.smtp_port, 2525);
        assert_eq!(config.mail.subject, "Gist activity");
        assert_eq!(config.watermark.path, PathBuf::from("/var/lib/gistnotify/last-run"));
        assert_eq!(
            config.report.template,
            Some(PathBuf::from("/etc/gistnotify/digest.hbs"))
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
mail:
  smtp-server: mail.example.org
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.mail.smtp_server, "mail.example.org");

        // Defaults for unspecified
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.github.comment_delay_ms, 3_000);
        assert_eq!(config.mail.password_env, "GIST_NOTIFY_PASSWORD");
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gistnotify.yml");
        fs::write(&path, "log-level: WARN\ngithub:\n  comment-delay-ms: 0\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.github.comment_delay(), Duration::ZERO);
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }
}
