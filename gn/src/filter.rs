//! Recency filtering
//!
//! A comment is new when its `updated_at` is at or after the watermark. The
//! boundary is inclusive.

use tracing::debug;

use crate::domain::{Comment, Gist, Watermark};

/// Keep the gists that have at least one comment at or after `watermark`
pub fn select(gists: Vec<Gist>, watermark: &Watermark) -> Vec<Gist> {
    debug!(count = gists.len(), %watermark, "select: called");
    let selected: Vec<Gist> = gists
        .into_iter()
        .filter(|g| g.comments.iter().any(|c| watermark.admits(&c.updated_at)))
        .collect();
    debug!(selected = selected.len(), "select: done");
    selected
}

/// The comments of `gist` at or after `watermark`, in their original order
pub fn qualifying_comments<'a>(gist: &'a Gist, watermark: &Watermark) -> Vec<&'a Comment> {
    gist.comments
        .iter()
        .filter(|c| watermark.admits(&c.updated_at))
        .collect()
}
