//! Document intake: writes the uploaded bytes under the configured upload
//! directory and guarantees cleanup when the verification attempt ends.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use log::{debug, info, warn};

use crate::models::DocumentUpload;
use crate::utils::VisaError;

// Distinguishes stored files even when two requests land in the same
// sub-second timestamp tick.
static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

/// Upload directory handle. Safe for concurrent use: every stored file gets
/// a name carrying a timestamp and a process-unique sequence number, so two
/// uploads with the same original filename never collide.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Opens (creating if needed) the upload directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, VisaError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            VisaError::Storage(format!("Could not create upload folder {:?}: {}", root, e))
        })?;
        info!("Upload folder verified/created: {:?}", root);
        Ok(DocumentStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the upload to disk under a collision-safe name and returns the
    /// scoped handle that deletes the file on drop.
    pub fn store(&self, document: &DocumentUpload) -> Result<StoredDocument, VisaError> {
        let filename = Self::storage_name(document.filename.as_deref());
        let path = self.root.join(&filename);
        info!("Saving visa file to: {:?}", path);

        fs::write(&path, &document.bytes).map_err(|e| {
            VisaError::Storage(format!("Error saving uploaded file {}: {}", filename, e))
        })?;

        Ok(StoredDocument { path })
    }

    fn storage_name(original: Option<&str>) -> String {
        let stamp = Utc::now().format("%Y%m%d%H%M%S%f");
        let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);

        match original.and_then(sanitize_filename) {
            Some(sanitized) => format!("{}_{}_{}", stamp, seq, sanitized),
            None => {
                warn!("Uploaded file has no usable filename. Generating a default.");
                format!("uploaded_visa_{}_{}.bin", stamp, seq)
            }
        }
    }
}

/// Strips directory components and unsafe characters from a client-supplied
/// filename. Returns `None` when nothing safe remains.
pub fn sanitize_filename(original: &str) -> Option<String> {
    // Last path component only; clients may send full paths.
    let base = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.').trim_matches('_').to_string();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.' || c == '_') {
        None
    } else {
        Some(cleaned)
    }
}

/// Ephemeral on-disk document. Deleting the file is best-effort: a failed
/// removal is logged and swallowed, never propagated.
pub struct StoredDocument {
    path: PathBuf,
}

impl StoredDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoredDocument {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Cleaned up file: {:?}", self.path),
            Err(e) => warn!(
                "Could not remove file {:?} after processing: {}",
                self.path, e
            ),
        }
    }
}
