use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::LibrarySettings;
use crate::error::{CatalogError, Result};

use super::hooks::{CoverFetcher, Interaction};
use super::index::{CatalogIndex, index_path};

/// One open catalog: a root folder plus the index describing it.
///
/// Source and export target are independent instances; they share only the
/// interaction and cover hooks.
pub struct Catalog {
    pub(super) root: PathBuf,
    pub(super) index: CatalogIndex,
    pub(super) settings: LibrarySettings,
    pub(super) ui: Rc<dyn Interaction>,
    pub(super) covers: Rc<dyn CoverFetcher>,
}

impl Catalog {
    /// Open the catalog at `root` and bring its index in line with the disk.
    ///
    /// Albums whose folders vanished are dropped first, then unknown folders
    /// are ingested in place.
    pub fn open(
        root: &Path,
        settings: LibrarySettings,
        ui: Rc<dyn Interaction>,
        covers: Rc<dyn CoverFetcher>,
    ) -> Result<Self> {
        if !root.is_dir() {
            return Err(CatalogError::NotFound(root.to_path_buf()));
        }
        let root = root
            .canonicalize()
            .map_err(|e| CatalogError::io(root, e))?;

        let index = CatalogIndex::load(&root)?;
        let mut catalog = Self {
            root,
            index,
            settings,
            ui,
            covers,
        };

        let removed = catalog.index.remove_missing(&catalog.root);
        if removed > 0 {
            catalog
                .ui
                .show(&format!("Removed {removed} missing album(s) from the index"));
        }
        catalog.reconcile();

        tracing::info!(
            root = %catalog.root.display(),
            performers = catalog.index.performers().len(),
            albums = catalog.index.len(),
            "catalog opened"
        );
        Ok(catalog)
    }

    /// Persist the index and release the catalog.
    pub fn close(self) -> Result<()> {
        self.save()?;
        self.ui.show("Library saved");
        Ok(())
    }

    pub(super) fn save(&self) -> Result<()> {
        self.index.save(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn index_file(&self) -> PathBuf {
        index_path(&self.root)
    }

    /// Report a per-file copy through the interaction hook.
    pub(super) fn progress_for<'a>(&'a self, label: &'a str) -> impl FnMut(u64, u64) + 'a {
        move |copied, total| self.ui.progress(label, copied, total)
    }
}
