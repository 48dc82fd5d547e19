//! The performer -> albums index and its on-disk form.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

use super::model::Album;

/// File name of the persisted index at the catalog root.
pub const INDEX_FILE_NAME: &str = "library.metadata";

/// Schema version written into every index file.
pub const INDEX_VERSION: u32 = 1;

/// Albums of one performer, keeping the name as first seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelf {
    pub name: String,
    pub albums: Vec<Album>,
}

/// Case-insensitive mapping from performer to their albums.
///
/// Performers iterate in case-folded name order; albums keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    shelves: BTreeMap<String, Shelf>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

#[derive(Deserialize)]
struct IndexFile {
    #[allow(dead_code)]
    version: u32,
    #[serde(default)]
    performers: Vec<Shelf>,
}

#[derive(Serialize)]
struct IndexFileRef<'a> {
    version: u32,
    performers: Vec<&'a Shelf>,
}

fn key(performer: &str) -> String {
    performer.to_lowercase()
}

pub fn index_path(root: &Path) -> PathBuf {
    root.join(INDEX_FILE_NAME)
}

impl CatalogIndex {
    /// Read the index stored under `root`, or start empty when there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = index_path(root);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no index file, starting empty");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        let format_err = |source| CatalogError::IndexFormat {
            path: path.clone(),
            source,
        };

        let probe: VersionProbe = toml::from_str(&content).map_err(format_err)?;
        let found = probe.version.unwrap_or(0);
        if found != INDEX_VERSION {
            return Err(CatalogError::IndexVersion {
                found,
                expected: INDEX_VERSION,
            });
        }

        let file: IndexFile = toml::from_str(&content).map_err(format_err)?;
        let mut index = Self::default();
        for shelf in file.performers {
            index
                .shelves
                .entry(key(&shelf.name))
                .or_insert_with(|| Shelf {
                    name: shelf.name.clone(),
                    albums: Vec::new(),
                })
                .albums
                .extend(shelf.albums);
        }
        tracing::debug!(albums = index.len(), "index loaded");
        Ok(index)
    }

    /// Write the whole index to `root`, replacing any previous file.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = index_path(root);
        let doc = IndexFileRef {
            version: INDEX_VERSION,
            performers: self.shelves.values().collect(),
        };
        let content = toml::to_string(&doc)?;

        let tmp = path.with_extension("metadata.tmp");
        fs::write(&tmp, content).map_err(|e| CatalogError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| CatalogError::io(&path, e))?;
        tracing::debug!(path = %path.display(), albums = self.len(), "index saved");
        Ok(())
    }

    pub fn get(&self, performer: &str) -> Option<&[Album]> {
        self.shelves.get(&key(performer)).map(|s| s.albums.as_slice())
    }

    pub fn contains(&self, performer: &str, album: &Album) -> bool {
        self.get(performer)
            .map(|albums| albums.contains(album))
            .unwrap_or(false)
    }

    /// Append `album` to `performer`'s shelf.
    ///
    /// Returns `false`, leaving the index untouched, when an equal album is
    /// already filed under that performer.
    pub fn put(&mut self, performer: &str, album: Album) -> bool {
        let shelf = self.shelves.entry(key(performer)).or_insert_with(|| Shelf {
            name: performer.to_string(),
            albums: Vec::new(),
        });
        if shelf.albums.contains(&album) {
            return false;
        }
        shelf.albums.push(album);
        true
    }

    /// Drop albums whose canonical folder under `root` no longer exists.
    ///
    /// Performers left without albums are removed. Returns the number of
    /// albums dropped.
    pub fn remove_missing(&mut self, root: &Path) -> usize {
        let mut removed = 0;
        self.shelves.retain(|_, shelf| {
            shelf.albums.retain(|album| {
                let exists = album.location(root).is_dir();
                if !exists {
                    tracing::info!(album = %album.relative_location().display(), "album folder vanished, dropping it");
                    removed += 1;
                }
                exists
            });
            !shelf.albums.is_empty()
        });
        removed
    }

    /// Display names of all performers.
    pub fn performers(&self) -> Vec<String> {
        self.shelves.values().map(|s| s.name.clone()).collect()
    }

    /// Albums of `self` missing from `other`, compared performer by performer.
    ///
    /// Results are grouped by performer in index order.
    pub fn diff<'a>(&'a self, other: &CatalogIndex) -> Vec<&'a Album> {
        self.shelves
            .iter()
            .flat_map(|(k, shelf)| {
                let theirs: &[Album] = other
                    .shelves
                    .get(k)
                    .map(|s| s.albums.as_slice())
                    .unwrap_or(&[]);
                shelf.albums.iter().filter(move |a| !theirs.contains(a))
            })
            .collect()
    }

    pub fn shelves(&self) -> impl Iterator<Item = &Shelf> {
        self.shelves.values()
    }

    /// Total number of albums.
    pub fn len(&self) -> usize {
        self.shelves.values().map(|s| s.albums.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }
}
