use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Start offset used when a track begins at the start of its file.
pub const DEFAULT_OFFSET: &str = "00:00:00";

/// One track of an album, addressed relative to the album folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// File name inside the album folder.
    pub path: String,
    /// Cue-sheet timecode (`mm:ss:ff`) where the track starts within `path`.
    #[serde(default = "default_offset")]
    pub offset: String,
}

fn default_offset() -> String {
    DEFAULT_OFFSET.to_string()
}

impl Track {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            offset: default_offset(),
        }
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = offset.into();
        self
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:30} located at [{}] {}", self.name, self.offset, self.path)
    }
}

/// An album as the catalog knows it.
///
/// Equality and hashing only look at the year and the case-folded title;
/// albums are always compared within a single performer's bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub performer: String,
    pub year: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn new(performer: impl Into<String>, year: u32, title: impl Into<String>) -> Self {
        Self {
            performer: performer.into(),
            year,
            title: title.into(),
            cue: None,
            cover: None,
            tracks: Vec::new(),
        }
    }

    /// Folder name of the album inside its performer folder: `YYYY - Title`.
    pub fn folder_name(&self) -> String {
        self.to_string()
    }

    /// Path of the album relative to a catalog root.
    pub fn relative_location(&self) -> PathBuf {
        Path::new(&self.performer).join(self.folder_name())
    }

    /// Canonical location of the album under `root`.
    pub fn location(&self, root: &Path) -> PathBuf {
        root.join(self.relative_location())
    }

    /// Every file that belongs to the album folder, without repeats.
    ///
    /// Cover and cue sheet come first, followed by track files in track order.
    pub fn files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        let named = self.cover.iter().chain(self.cue.iter()).map(String::as_str);
        for name in named.chain(self.tracks.iter().map(|t| t.path.as_str())) {
            if !files.contains(&name) {
                files.push(name);
            }
        }
        files
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.year, self.title)
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year && self.title.to_lowercase() == other.title.to_lowercase()
    }
}

impl Eq for Album {}

impl Hash for Album {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.to_lowercase().hash(state);
        self.year.hash(state);
    }
}

/// Upper-case the first character of `s`, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
