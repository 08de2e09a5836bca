//! Gist and Comment domain types

use chrono::{DateTime, FixedOffset};

/// A comment attached to a gist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Login of the comment author
    pub author: String,
    /// Comment text, empty when the host sent none
    pub body: String,
    /// Last time the comment was created or edited
    pub updated_at: DateTime<FixedOffset>,
}

/// A gist together with the comments fetched for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gist {
    /// API URL of the gist
    pub url: String,
    /// Free-text description, empty when unset
    pub description: String,
    /// Browser URL of the gist
    pub html_url: String,
    /// API URL listing the gist's comments
    pub comments_url: String,
    /// Comment count reported by the listing
    pub comment_count: u64,
    /// Comments in the order the host returned them
    pub comments: Vec<Comment>,
}

impl Gist {
    /// Whether the listing reported any comments
    pub fn has_comments(&self) -> bool {
        self.comment_count > 0
    }
}
