//! Domain types for gistnotify
//!
//! Core domain types: Watermark, Gist, Comment.
//!
//! Gists and comments are immutable values built once the remote traversal
//! for a gist completes.

mod gist;
mod watermark;

pub use gist::{Comment, Gist};
pub use watermark::Watermark;
