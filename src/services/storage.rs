use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncWriteExt, BufWriter};
use tracing::debug;
use uuid::Uuid;

use crate::models::GridRole;

/// The storage area: one directory holding the canonical grid file per role
/// plus whatever surface artifacts the external tool writes next to them.
pub struct GridStore {
    root: PathBuf,
}

impl GridStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("failed to create storage area {}", self.root.display()))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Authoritative on-disk path for a role's grid file.
    pub fn canonical_path(&self, role: GridRole) -> PathBuf {
        self.root.join(role.canonical_file_name())
    }

    /// Stream an uploaded grid into the role's canonical slot.
    ///
    /// The bytes are first written to a uniquely named staging file in the
    /// storage directory, then renamed over the canonical path. Staging in
    /// the same directory keeps the rename on one filesystem, so replacement
    /// is atomic and readers observe either the old file or the new one,
    /// never a partial write.
    pub async fn save_grid<R>(&self, role: GridRole, mut reader: R) -> Result<(PathBuf, u64)>
    where
        R: AsyncRead + Unpin + Send,
    {
        let staging = self.root.join(format!(".staging-{}", Uuid::new_v4()));
        let canonical = self.canonical_path(role);

        let written = async {
            let file = tokio::fs::File::create(&staging).await?;
            let mut writer = BufWriter::new(file);
            let written = tokio::io::copy(&mut reader, &mut writer).await?;
            writer.flush().await?;
            Ok::<u64, std::io::Error>(written)
        }
        .await;

        let written = match written {
            Ok(n) => n,
            Err(e) => {
                let _ = tokio::fs::remove_file(&staging).await;
                return Err(e).with_context(|| {
                    format!("failed to stage upload for {} grid", role)
                });
            }
        };

        if let Err(e) = tokio::fs::rename(&staging, &canonical).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e).with_context(|| {
                format!("failed to promote staged upload to {}", canonical.display())
            });
        }

        debug!(
            "staged {} bytes into {}",
            written,
            canonical.display()
        );
        Ok((canonical, written))
    }
}
