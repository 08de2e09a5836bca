//! gistnotify - email digests of new comments on a user's gists
//!
//! Each run reads a watermark (the start time of the last successful run),
//! walks the user's gists, keeps those with comments at or after the
//! watermark, mails a digest of them and then advances the watermark.
//!
//! # Core Concepts
//!
//! - **Watermark in a file**: the only state kept between runs
//! - **Advance on success only**: a failed run leaves the watermark alone, so
//!   the next run sees the same comments again
//! - **Polite traversal**: one request at a time, with a pause before each
//!   comments request
//!
//! # Modules
//!
//! - [`store`] - Watermark persistence
//! - [`github`] - Gist listing and comment fetching
//! - [`filter`] - Recency filtering
//! - [`report`] - Digest rendering
//! - [`mail`] - Digest delivery
//! - [`coordinator`] - One run, end to end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod filter;
pub mod github;
pub mod mail;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use config::{Config, GithubConfig, MailConfig, ReportConfig, WatermarkConfig};
pub use coordinator::{RunCoordinator, RunState, RunSummary};
pub use domain::{Comment, Gist, Watermark};
pub use error::NotifyError;
pub use github::{GistSource, HttpFetch, ReqwestFetcher};
pub use mail::{Mailer, NotificationDispatcher, NotificationRequest, OutgoingMessage, SmtpMailer};
pub use report::ReportComposer;
pub use store::WatermarkStore;

/// Subject line of every digest
pub const DEFAULT_SUBJECT: &str = "New comments on gists";
