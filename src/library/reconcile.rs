use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::Catalog;
use super::ingest::AddOptions;
use super::model::{Album, upper_first};
use super::scan::{has_tracks, is_hidden};

impl Catalog {
    /// Ingest folders under the root that the index does not know about.
    ///
    /// A root-level folder holding audio files is a stray album; any other
    /// root-level folder is a performer folder whose unknown album folders
    /// are adopted. Both are moved into their canonical place.
    pub(super) fn reconcile(&mut self) {
        self.ui.show("Search for unknown albums in the library");

        for dir in self.child_dirs(&self.root) {
            if has_tracks(&dir, &self.settings) {
                self.adopt(&dir, None);
            } else {
                self.adopt_performer_folder(&dir);
            }

            if dir.is_dir() && is_empty_dir(&dir) {
                tracing::debug!(dir = %dir.display(), "removing empty folder");
                if let Err(e) = fs::remove_dir(&dir) {
                    self.ui.warn(&format!("{}\n{e}", dir.display()));
                }
            }
        }
    }

    fn adopt_performer_folder(&mut self, dir: &Path) {
        let performer = dir
            .file_name()
            .map(|s| upper_first(&s.to_string_lossy()))
            .unwrap_or_default();
        let known: HashSet<String> = self
            .index
            .get(&performer)
            .map(|albums| albums.iter().map(Album::folder_name).collect())
            .unwrap_or_default();

        for album_dir in self.child_dirs(dir) {
            let name = album_dir
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if known.contains(&name) || !has_tracks(&album_dir, &self.settings) {
                continue;
            }
            self.adopt(&album_dir, Some(performer.clone()));
        }
    }

    fn adopt(&mut self, dir: &Path, performer: Option<String>) {
        tracing::info!(dir = %dir.display(), "adopting unknown album folder");
        if let Err(e) = self.add_album(dir, AddOptions::in_place(performer)) {
            tracing::warn!(error = %e, dir = %dir.display(), "could not adopt folder");
            self.ui.warn(&e.to_string());
        }
    }

    /// Immediate subdirectories of `dir`, sorted, skipping hidden ones unless configured.
    fn child_dirs(&self, dir: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = match fs::read_dir(dir) {
            Ok(rd) => rd
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.is_dir() && (self.settings.include_hidden || !is_hidden(p)))
                .collect(),
            Err(e) => {
                self.ui.warn(&format!("{}\n{e}", dir.display()));
                Vec::new()
            }
        };
        dirs.sort();
        dirs
    }
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut rd| rd.next().is_none())
        .unwrap_or(false)
}
