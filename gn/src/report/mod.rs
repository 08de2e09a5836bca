//! Digest rendering
//!
//! Template loading:
//! 1. `report.template` from config (user override)
//! 2. Embedded default compiled from `templates/digest.hbs`
//!
//! Templates use Handlebars syntax; HTML escaping is off.

pub mod embedded;
mod composer;

pub use composer::{CommentEntry, DigestContext, GistEntry, ReportComposer};
