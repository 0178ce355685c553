//! On-disk storage for generated exports.
//!
//! Each conversion writes an HTML/CSS pair sharing a random base name.
//! Artifacts are served at most once — downloading deletes the file — and
//! a retention sweep removes leftovers older than one hour on each new
//! conversion request.

use std::path::{Path, PathBuf};
use std::time::Duration;

use uuid::Uuid;

/// How long artifacts survive before the sweep removes them.
pub const RETENTION: Duration = Duration::from_secs(60 * 60);

/// Filenames of one generated export pair.
#[derive(Debug, Clone)]
pub struct ArtifactPair {
    /// Shared random base identifier.
    pub base: String,
    /// Markup artifact filename, `<base>.html`.
    pub html_filename: String,
    /// Style sheet artifact filename, `<base>.css`.
    pub css_filename: String,
}

impl ArtifactPair {
    /// Generate a fresh pair of filenames under a random base.
    #[must_use]
    pub fn generate() -> Self {
        let base = format!("export-{}", Uuid::new_v4().simple());
        Self {
            html_filename: format!("{base}.html"),
            css_filename: format!("{base}.css"),
            base,
        }
    }
}

/// Directory-backed artifact store.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The store's root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an export pair to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub async fn write_pair(
        &self,
        pair: &ArtifactPair,
        html: &str,
        css: &str,
    ) -> std::io::Result<()> {
        tokio::fs::write(self.dir.join(&pair.html_filename), html).await?;
        tokio::fs::write(self.dir.join(&pair.css_filename), css).await?;
        tracing::info!("Wrote export pair {}", pair.base);
        Ok(())
    }

    /// Read an artifact and delete it, so each file downloads exactly
    /// once. Returns `None` for unknown, already-taken, or unsafe names.
    pub async fn take(&self, filename: &str) -> Option<String> {
        if !Self::is_safe_name(filename) {
            tracing::warn!("Rejected artifact name {filename:?}");
            return None;
        }

        let path = self.dir.join(filename);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        if let Err(error) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to delete served artifact {}: {error}", path.display());
        }
        Some(content)
    }

    /// Delete artifacts older than the retention window.
    ///
    /// Errors are logged and skipped; a failed sweep never blocks a
    /// conversion.
    pub async fn sweep(&self) {
        self.sweep_older_than(RETENTION).await;
    }

    async fn sweep_older_than(&self, max_age: Duration) {
        let Ok(mut entries) = tokio::fs::read_dir(&self.dir).await else {
            return;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let expired = entry
                .metadata()
                .await
                .ok()
                .and_then(|metadata| metadata.modified().ok())
                .and_then(|modified| modified.elapsed().ok())
                .is_some_and(|age| age >= max_age);

            if expired {
                if let Err(error) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Failed to sweep artifact {}: {error}", path.display());
                } else {
                    tracing::debug!("Swept stale artifact {}", path.display());
                }
            }
        }
    }

    /// Accept only flat, plainly named files — no separators, no parent
    /// traversal.
    fn is_safe_name(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
    }
}
