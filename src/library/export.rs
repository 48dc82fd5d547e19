use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};

use super::catalog::Catalog;
use super::copy::copy_tree;
use super::display::{group_by_performer, render_groups};
use super::model::Album;

/// Result of [`Catalog::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    UpToDate,
    /// The pending albums were listed but the user declined.
    Declined,
    Exported { copied: usize, failed: usize },
}

impl Catalog {
    /// Copy albums this catalog has and the catalog at `target` lacks.
    ///
    /// Copied albums are merged into the target's own index, which is then
    /// saved; albums only the target has are kept.
    pub fn export(&self, target: &Path) -> Result<ExportOutcome> {
        if !target.is_dir() {
            self.ui.show(&format!("Not found: {}", target.display()));
            return Err(CatalogError::NotFound(target.to_path_buf()));
        }
        let same_root = target
            .canonicalize()
            .map(|t| t == self.root)
            .unwrap_or(false);
        if same_root {
            return Err(CatalogError::InvalidInput(
                "cannot export a library into itself".to_string(),
            ));
        }

        let mut other = Catalog::open(
            target,
            self.settings.clone(),
            self.ui.clone(),
            self.covers.clone(),
        )?;

        let pending: Vec<&Album> = self.index.diff(&other.index);
        if pending.is_empty() {
            self.ui.show("Library is up to date");
            other.save()?;
            return Ok(ExportOutcome::UpToDate);
        }

        let listing = render_groups(group_by_performer(&pending));
        let prompt = format!(
            "These albums will be copied to {}\n{listing}\n",
            other.root.display()
        );
        if !self.ui.confirm(&prompt) {
            other.save()?;
            return Ok(ExportOutcome::Declined);
        }

        let (mut copied, mut failed) = (0, 0);
        for album in pending {
            let src = album.location(&self.root);
            let dest = album.location(&other.root);
            let fresh = !dest.exists();
            let result = fs::create_dir_all(other.root.join(&album.performer))
                .and_then(|_| {
                    copy_tree(&src, &dest, &mut |file, done, total| {
                        let label = file
                            .file_name()
                            .map(|s| s.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        self.ui.progress(&label, done, total)
                    })
                });
            match result {
                Ok(bytes) => {
                    tracing::info!(album = %album.relative_location().display(), bytes, "album exported");
                    other.index.put(&album.performer, album.clone());
                    copied += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, album = %album.relative_location().display(), "export copy failed");
                    self.ui.warn(&format!("{}\n{e}", src.display()));
                    if fresh && dest.exists() {
                        self.discard_partial(&dest);
                    }
                    failed += 1;
                }
            }
        }

        other.close()?;
        self.ui.show("Library exported");
        Ok(ExportOutcome::Exported { copied, failed })
    }
}
