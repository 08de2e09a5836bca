//! GitHub gist access
//!
//! [`HttpFetch`] is the transport seam; [`GistSource`] walks the gists API on
//! top of it.

pub mod fetch;
mod source;
mod types;

pub use fetch::{GITHUB_ACCEPT, HttpFetch, ReqwestFetcher};
pub use source::GistSource;
pub use types::{CommentRecord, GistRecord, UserRecord};
