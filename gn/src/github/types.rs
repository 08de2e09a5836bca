//! Wire records returned by the GitHub gists API
//!
//! Only the fields the pipeline reads are declared; everything else in the
//! payload is ignored.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Comment, Gist, Watermark};
use crate::error::NotifyError;

/// One entry of `GET /users/{user}/gists`
#[derive(Debug, Clone, Deserialize)]
pub struct GistRecord {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    pub comments_url: String,
    #[serde(default)]
    pub comments: u64,
}

/// Author of a comment
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub login: String,
}

/// One entry of `GET {comments_url}`
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    pub user: UserRecord,
    #[serde(default)]
    pub body: Option<String>,
    pub updated_at: String,
}

impl CommentRecord {
    pub fn into_comment(self) -> Result<Comment, NotifyError> {
        let updated_at = *Watermark::parse(&self.updated_at)?.as_datetime();
        debug!(author = %self.user.login, %updated_at, "CommentRecord::into_comment: parsed");
        Ok(Comment {
            author: self.user.login,
            body: self.body.unwrap_or_default(),
            updated_at,
        })
    }
}

impl GistRecord {
    /// Build the domain gist around `comments`
    pub fn into_gist(self, comments: Vec<Comment>) -> Gist {
        Gist {
            url: self.url,
            description: self.description.unwrap_or_default(),
            html_url: self.html_url,
            comments_url: self.comments_url,
            comment_count: self.comments,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gist_record_null_description() {
        let record: GistRecord = serde_json::from_value(json!({
            "url": "https://api.github.com/gists/abc",
            "description": null,
            "html_url": "https://gist.github.com/abc",
            "comments_url": "https://api.github.com/gists/abc/comments",
            "comments": 0,
            "public": true
        }))
        .unwrap();

        let gist = record.into_gist(vec![]);
        assert_eq!(gist.description, "");
        assert!(!gist.has_comments());
    }

    #[test]
    fn test_comment_record_into_comment() {
        let record: CommentRecord = serde_json::from_value(json!({
            "id": 1,
            "user": { "login": "octocat", "id": 583231 },
            "body": "Nice gist",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }))
        .unwrap();

        let comment = record.into_comment().unwrap();
        assert_eq!(comment.author, "octocat");
        assert_eq!(comment.body, "Nice gist");
        assert_eq!(comment.updated_at.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_comment_record_bad_timestamp() {
        let record = CommentRecord {
            user: UserRecord {
                login: "octocat".to_string(),
            },
            body: None,
            updated_at: "yesterday".to_string(),
        };

        let err = record.into_comment().unwrap_err();
        assert!(matches!(err, NotifyError::TimestampParse { .. }));
    }
}
