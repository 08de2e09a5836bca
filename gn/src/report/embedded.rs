//! Embedded templates
//!
//! Compiled into the binary from `templates/` at build time.

/// Default digest layout
pub const DIGEST: &str = include_str!("../../templates/digest.hbs");
