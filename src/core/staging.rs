use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub async fn ensure_upload_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// An uploaded file staged on local disk for the lifetime of one request.
///
/// The file is removed by [`StagedUpload::remove`] or, failing that, when the
/// handle is dropped. Removal never fails loudly: a file that is already gone
/// counts as removed, anything else is logged and left behind.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    field_name: String,
    file_name: Option<String>,
    removed: bool,
}

impl StagedUpload {
    pub async fn write(
        dir: &Path,
        field_name: &str,
        file_name: Option<String>,
        bytes: Bytes,
    ) -> std::io::Result<Self> {
        let path = dir.join(Uuid::new_v4().simple().to_string());
        // the handle owns the path from here so a partial write is cleaned up too
        let upload = Self {
            path,
            field_name: field_name.to_string(),
            file_name,
            removed: false,
        };

        tokio::fs::write(&upload.path, &bytes).await?;

        debug!(
            path = %upload.path.display(),
            field = %upload.field_name,
            file_name = ?upload.file_name,
            size = bytes.len(),
            "staged upload"
        );

        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn exists(&self) -> bool {
        !self.removed && self.path.exists()
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    pub fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed staged upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "staged upload already gone")
            }
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove staged upload"
            ),
        }
    }
}

impl Drop for StagedUpload {
    // Synchronous unlink: the file has to be gone before the response is sent,
    // a spawned tokio::fs task could still be pending or be dropped.
    fn drop(&mut self) {
        self.remove();
    }
}
