use std::fs;
use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, TaggedFileExt};

use crate::config::LibrarySettings;

use super::cue::CueSheet;
use super::model::Track;

/// Result of reading an album folder's track list.
#[derive(Debug, Default)]
pub struct TrackList {
    pub tracks: Vec<Track>,
    /// Files a cue sheet referenced that are not in the folder.
    pub missing: Vec<String>,
}

/// Artist/album read from the first track's embedded tags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagHints {
    pub artist: Option<String>,
    pub album: Option<String>,
}

fn normalized(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    let exts = normalized(exts);
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    has_extension(path, &settings.audio_extensions)
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Regular files directly inside `dir`, sorted by name.
fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(rd) => rd
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Whether `dir` directly contains at least one supported audio file.
pub fn has_tracks(dir: &Path, settings: &LibrarySettings) -> bool {
    files_in(dir).iter().any(|p| is_audio_file(p, settings))
}

/// Build the track list of an album folder.
///
/// Cue-sheet tracks win when at least one of them is complete and its file
/// is present; otherwise every supported audio file becomes a track named
/// after its stem.
pub fn read_tracks(dir: &Path, cue: Option<&CueSheet>, settings: &LibrarySettings) -> TrackList {
    let files = files_in(dir);
    let mut list = TrackList::default();

    if let Some(cue) = cue {
        let present: Vec<&str> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|s| s.to_str()))
            .collect();

        for entry in &cue.tracks {
            let (Some(file), Some(title), Some(index)) = (&entry.file, &entry.title, &entry.index)
            else {
                continue;
            };
            let name = Path::new(file)
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(file.as_str());
            if !present.contains(&name) {
                tracing::warn!(dir = %dir.display(), file = %file, "cue references a missing file");
                list.missing.push(file.clone());
                continue;
            }
            list.tracks
                .push(Track::new(title.clone(), name).with_offset(index.clone()));
        }
    }

    if list.tracks.is_empty() {
        list.tracks = files
            .iter()
            .filter(|p| is_audio_file(p, settings))
            .filter_map(|p| {
                let stem = p.file_stem().and_then(|s| s.to_str())?;
                let name = p.file_name().and_then(|s| s.to_str())?;
                Some(Track::new(stem, name))
            })
            .collect();
    }

    list
}

/// First file in `dir` with a cover-art extension.
pub fn find_cover(dir: &Path, settings: &LibrarySettings) -> Option<PathBuf> {
    files_in(dir)
        .into_iter()
        .find(|p| has_extension(p, &settings.cover_extensions))
}

/// Read artist/album tags from the first track that carries any.
pub fn read_tag_hints(dir: &Path, tracks: &[Track]) -> TagHints {
    for track in tracks {
        let Ok(tagged) = lofty::read_from_path(dir.join(&track.path)) else {
            continue;
        };
        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            continue;
        };

        let pick = |v: Option<std::borrow::Cow<'_, str>>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        let hints = TagHints {
            artist: pick(tag.artist()),
            album: pick(tag.album()),
        };
        if hints != TagHints::default() {
            return hints;
        }
    }
    TagHints::default()
}
