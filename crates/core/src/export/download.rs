//! "Save as" for exported reports.
//!
//! Bytes are staged in a uniquely named hidden file next to the target, the
//! final name is claimed with `create_new` (adding ` (1)`, ` (2)`, ... when
//! taken), and the staged file is renamed over the claim. The staging file is
//! removed on every exit path.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::{Result, ResumoError};

const MAX_NAME_ATTEMPTS: usize = 1000;

struct StagingFile {
    path: PathBuf,
    armed: bool,
}

impl StagingFile {
    fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!(".resumo-{}.part", Uuid::new_v4())),
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// `name` for the first attempt, then `stem (n).ext`.
pub fn candidate_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, attempt, ext.to_string_lossy()),
        None => format!("{} ({})", stem, attempt),
    }
}

async fn claim_name(dir: &Path, file_name: &str) -> Result<PathBuf> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = dir.join(candidate_name(file_name, attempt));
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(ResumoError::ExportFailed {
        path: dir.join(file_name),
        reason: format!("no free file name after {} attempts", MAX_NAME_ATTEMPTS),
    })
}

/// Write `bytes` to `dir/file_name` (or the next free variant of it) and
/// return the final path.
pub async fn save_as(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;

    let mut staging = StagingFile::new(dir);
    fs::write(&staging.path, bytes).await?;

    let target = claim_name(dir, file_name).await?;
    if let Err(e) = fs::rename(&staging.path, &target).await {
        let _ = fs::remove_file(&target).await;
        return Err(e.into());
    }
    staging.disarm();

    tracing::debug!(path = %target.display(), bytes = bytes.len(), "file saved");
    Ok(target)
}
