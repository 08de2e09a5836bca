//! Report Composer
//!
//! Renders the plaintext digest from filtered gists with Handlebars.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::domain::{Gist, Watermark};
use crate::error::NotifyError;
use crate::filter::qualifying_comments;

const TEMPLATE_NAME: &str = "digest";

/// Values exposed to the digest template
#[derive(Debug, Clone, Serialize)]
pub struct DigestContext {
    /// Watermark the gists were filtered against
    pub watermark: String,
    /// Number of gists in the digest
    pub count: usize,
    pub gists: Vec<GistEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GistEntry {
    pub description: String,
    pub html_url: String,
    pub url: String,
    /// Only the comments at or after the watermark
    pub comments: Vec<CommentEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    pub author: String,
    pub body: String,
    pub updated_at: String,
}

impl DigestContext {
    pub fn build(gists: &[Gist], watermark: &Watermark) -> Self {
        debug!(count = gists.len(), %watermark, "DigestContext::build: called");
        let gists: Vec<GistEntry> = gists
            .iter()
            .map(|g| GistEntry {
                description: g.description.clone(),
                html_url: g.html_url.clone(),
                url: g.url.clone(),
                comments: qualifying_comments(g, watermark)
                    .into_iter()
                    .map(|c| CommentEntry {
                        author: c.author.clone(),
                        body: c.body.clone(),
                        updated_at: c.updated_at.to_rfc3339(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            watermark: watermark.to_rfc3339(),
            count: gists.len(),
            gists,
        }
    }
}

/// Renders digests from a registered template
#[derive(Debug)]
pub struct ReportComposer {
    hbs: Handlebars<'static>,
}

impl ReportComposer {
    /// Composer using the built-in digest template
    pub fn new() -> Result<Self, NotifyError> {
        debug!("ReportComposer::new: called");
        Self::with_template(embedded::DIGEST)
    }

    /// Composer using a template file, falling back to the built-in one when `path` is None
    pub fn from_file(path: Option<&Path>) -> Result<Self, NotifyError> {
        debug!(?path, "ReportComposer::from_file: called");
        match path {
            Some(path) => {
                let template = std::fs::read_to_string(path)
                    .map_err(|e| NotifyError::Render(format!("Failed to read template {}: {}", path.display(), e)))?;
                info!("Using report template {}", path.display());
                Self::with_template(&template)
            }
            None => {
                debug!("ReportComposer::from_file: no template path, using embedded");
                Self::new()
            }
        }
    }

    /// Composer using the given template source
    pub fn with_template(template: &str) -> Result<Self, NotifyError> {
        let mut hbs = Handlebars::new();
        // Plaintext mail, nothing to escape
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| NotifyError::Render(format!("Invalid template: {}", e)))?;
        Ok(Self { hbs })
    }

    /// Render the digest for already-filtered gists
    pub fn render(&self, gists: &[Gist], watermark: &Watermark) -> Result<String, NotifyError> {
        debug!(count = gists.len(), %watermark, "ReportComposer::render: called");
        let context = DigestContext::build(gists, watermark);
        self.hbs
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| NotifyError::Render(e.to_string()))
    }
}
