//! Watermark persistence
//!
//! A single plain-text file holding one RFC 3339 timestamp: the start time of
//! the last successful run.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::Watermark;
use crate::error::NotifyError;

/// File-backed store for the last successful run time
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        debug!(?path, "WatermarkStore::new: called");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored watermark
    ///
    /// A missing file yields `now` minus one day. An unreadable file or a
    /// malformed value is an error.
    pub fn load(&self, now: Watermark) -> Result<Watermark, NotifyError> {
        debug!(path = ?self.path, "WatermarkStore::load: called");
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let fallback = Watermark::fallback(now);
                info!(%fallback, "No watermark at {}, using fallback", self.path.display());
                return Ok(fallback);
            }
            Err(e) => {
                debug!(error = %e, "WatermarkStore::load: read failed");
                return Err(NotifyError::StoreRead {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let watermark = Watermark::parse(&content).map_err(|e| NotifyError::StoreRead {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        debug!(%watermark, "WatermarkStore::load: parsed stored value");
        Ok(watermark)
    }

    /// Replace the stored watermark with `value`
    ///
    /// The value goes to a sibling temp file that is renamed over the old
    /// one, so an interrupted save leaves the previous watermark intact.
    pub fn save(&self, value: Watermark) -> Result<(), NotifyError> {
        debug!(path = ?self.path, %value, "WatermarkStore::save: called");
        let temp = self.temp_path();
        let write_err = |source| NotifyError::StoreWrite {
            path: self.path.clone(),
            source,
        };

        fs::write(&temp, value.to_rfc3339()).map_err(write_err)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            debug!(error = %e, temp = ?temp, "WatermarkStore::save: rename failed");
            let _ = fs::remove_file(&temp);
            return Err(write_err(e));
        }
        info!(%value, "Saved watermark to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
