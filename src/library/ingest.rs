//! Adding album folders to a catalog.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{CatalogError, Result};

use super::catalog::Catalog;
use super::copy::copy_file;
use super::cue::{CueSheet, find_cue};
use super::hooks::{Draft, FETCHED_COVER_NAME};
use super::model::{Album, upper_first};
use super::resolve::{resolve_performer, resolve_year_title, review};
use super::scan::{find_cover, has_tracks, is_hidden, read_tag_hints, read_tracks};

/// How [`Catalog::add_album`] treats its source folder.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Performer to file the album under; resolved from metadata when `None`.
    pub performer: Option<String>,
    /// Allow sources that already live inside the catalog root.
    pub inside_ok: bool,
    /// Remove the source folder after a successful copy.
    pub delete_src: bool,
    /// Confirm tracks and review metadata through the interaction hook.
    pub interactive: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            performer: None,
            inside_ok: false,
            delete_src: false,
            interactive: true,
        }
    }
}

impl AddOptions {
    /// Options for a folder found inside the catalog that should be moved
    /// into its canonical place without asking.
    pub fn in_place(performer: Option<String>) -> Self {
        Self {
            performer,
            inside_ok: true,
            delete_src: true,
            interactive: false,
        }
    }
}

/// What happened to a folder handed to [`Catalog::add_album`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added {
        performer: String,
        year: u32,
        title: String,
    },
    NotADirectory,
    /// The source already lives inside the catalog root.
    AlreadyInCatalog,
    /// An equal album is already filed under the performer.
    Duplicate,
    NoTracks,
    Aborted,
    /// Copying into the catalog failed; the index was left untouched.
    CopyFailed,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

impl Catalog {
    /// Ingest the album folder at `path`.
    pub fn add_album(&mut self, path: &Path, opts: AddOptions) -> Result<AddOutcome> {
        if !path.exists() {
            self.ui.show(&format!("Not found: {}", path.display()));
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let path = path.canonicalize().map_err(|e| CatalogError::io(path, e))?;
        let folder = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !path.is_dir() {
            self.ui.show(&format!("Is not a directory: {folder}"));
            return Ok(AddOutcome::NotADirectory);
        }
        if !opts.inside_ok && path.starts_with(&self.root) {
            self.ui.show("Album already exists");
            return Ok(AddOutcome::AlreadyInCatalog);
        }

        let cue_path = find_cue(&path);
        let cue = match cue_path.as_deref().map(CueSheet::read) {
            Some(Ok(cue)) => Some(cue),
            Some(Err(e)) => {
                self.ui.warn(&format!("Ignoring unreadable cue sheet: {e}"));
                None
            }
            None => None,
        };

        let list = read_tracks(&path, cue.as_ref(), &self.settings);
        for file in &list.missing {
            self.ui.warn(&format!("WARNING: {file} declared in .cue not found"));
        }
        if list.tracks.is_empty() {
            self.ui.show("Tracks not found");
            return Ok(AddOutcome::NoTracks);
        }
        if opts.interactive {
            let listing: Vec<String> = list.tracks.iter().map(|t| t.to_string()).collect();
            let prompt = format!(
                "These tracks will be added from {}\n{}\n",
                path.display(),
                listing.join("\n")
            );
            if !self.ui.confirm(&prompt) {
                return Ok(AddOutcome::Aborted);
            }
        }

        let tags = read_tag_hints(&path, &list.tracks);
        let known = self.index.performers();
        let resolved = opts
            .performer
            .as_deref()
            .map(|p| Ok(upper_first(p.trim())))
            .unwrap_or_else(|| resolve_performer(cue.as_ref(), &tags, self.ui.as_ref(), &known))
            .and_then(|performer| {
                resolve_year_title(&path, cue.as_ref(), &tags, self.ui.as_ref(), opts.interactive)
                    .map(|(year, title)| Draft {
                        performer,
                        year,
                        title,
                    })
            });
        let draft = match resolved {
            Ok(draft) => draft,
            Err(CatalogError::InvalidInput(msg)) => {
                self.ui.warn(&msg);
                return Ok(AddOutcome::Aborted);
            }
            Err(e) => return Err(e),
        };

        let exists =
            |d: &Draft| self.index.contains(&d.performer, &Album::new(&d.performer, d.year, &d.title));
        let draft = if opts.interactive {
            match review(self.ui.as_ref(), draft, &known, exists) {
                Some(draft) => draft,
                None => return Ok(AddOutcome::Aborted),
            }
        } else if exists(&draft) {
            self.ui.show("Album already exists");
            return Ok(AddOutcome::Duplicate);
        } else {
            draft
        };

        let cover = self.cover_for(&path, &draft);
        let album = Album {
            performer: draft.performer.clone(),
            year: draft.year,
            title: draft.title.clone(),
            cue: cue_path
                .as_deref()
                .and_then(|p| p.file_name())
                .map(|s| s.to_string_lossy().into_owned()),
            cover,
            tracks: list.tracks,
        };

        let dest = album.location(&self.root);
        if !dest.exists() {
            if let Err(e) = self.copy_album(&album, &path, &dest) {
                tracing::warn!(error = %e, src = %path.display(), "album copy failed");
                self.ui.warn(&e.to_string());
                return Ok(AddOutcome::CopyFailed);
            }
            if opts.delete_src {
                // The catalog may live inside the source, or the album may land below it.
                let keep = if self.root.starts_with(&path) { &self.root } else { &dest };
                self.purge(&path, keep);
            }
        }

        self.index.put(&draft.performer, album);
        self.ui.show(&format!(
            "Successfully added {} - {} to {}\n",
            draft.year, draft.title, draft.performer
        ));
        tracing::info!(performer = %draft.performer, year = draft.year, title = %draft.title, "album added");
        Ok(AddOutcome::Added {
            performer: draft.performer,
            year: draft.year,
            title: draft.title,
        })
    }

    /// Ingest every folder under `path` that directly holds audio files.
    ///
    /// A folder that fails is reported and the walk goes on with the rest.
    pub fn add_folder(&mut self, path: &Path) -> Result<Vec<AddOutcome>> {
        if !path.is_dir() {
            self.ui.show(&format!("Not found: {}", path.display()));
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let include_hidden = self.settings.include_hidden;
        let albums: Vec<_> = WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_dir() && has_tracks(e.path(), &self.settings))
            .map(|e| e.into_path())
            .collect();

        let mut outcomes = Vec::with_capacity(albums.len());
        for dir in albums {
            match self.add_album(&dir, AddOptions::default()) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::warn!(error = %e, dir = %dir.display(), "skipping folder");
                    self.ui.warn(&e.to_string());
                }
            }
        }
        Ok(outcomes)
    }

    fn cover_for(&self, src: &Path, draft: &Draft) -> Option<String> {
        if let Some(found) = find_cover(src, &self.settings) {
            return found
                .file_name()
                .map(|s| s.to_string_lossy().into_owned());
        }
        if self
            .covers
            .fetch_cover(&draft.performer, &draft.title, src)
            && src.join(FETCHED_COVER_NAME).is_file()
        {
            self.ui.show("Successfully downloaded cover for album");
            return Some(FETCHED_COVER_NAME.to_string());
        }
        None
    }

    /// Copy the album's files from `src` into `dest`.
    ///
    /// A failed copy removes the partially created `dest`.
    fn copy_album(&self, album: &Album, src: &Path, dest: &Path) -> Result<()> {
        fs::create_dir_all(dest).map_err(|e| CatalogError::io(dest, e))?;
        for name in album.files() {
            let file = src.join(name);
            let mut progress = self.progress_for(name);
            if let Err(e) = copy_file(&file, dest, &mut progress) {
                self.discard_partial(dest);
                return Err(CatalogError::io(file, e));
            }
        }
        Ok(())
    }

    /// Remove a half-copied album folder, reporting when that fails too.
    pub(super) fn discard_partial(&self, dest: &Path) {
        if let Err(e) = fs::remove_dir_all(dest) {
            tracing::warn!(error = %e, dest = %dest.display(), "partial copy left behind");
            self.ui
                .warn(&format!("Could not remove partial copy {}\n{e}", dest.display()));
        }
    }

    /// Best-effort removal of an ingested source folder.
    ///
    /// `keep` and everything below it survive, as do the folders leading to it.
    fn purge(&self, dir: &Path, keep: &Path) {
        let walker = WalkDir::new(dir)
            .contents_first(true)
            .into_iter()
            .filter_entry(|e| !e.path().starts_with(keep));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.ui.warn(&e.to_string());
                    continue;
                }
            };
            if keep.starts_with(entry.path()) {
                continue;
            }
            let removed = if entry.file_type().is_dir() {
                fs::remove_dir(entry.path())
            } else {
                fs::remove_file(entry.path())
            };
            if let Err(e) = removed {
                self.ui.warn(&format!("{}\n{e}", entry.path().display()));
            }
        }
    }
}
