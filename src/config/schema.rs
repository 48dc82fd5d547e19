use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tapeshelf/config.toml` or `~/.config/tapeshelf/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAPESHELF__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Catalog root used when `--library` is not passed.
    pub location: Option<PathBuf>,
    /// File extensions to treat as album tracks (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// File extensions accepted as album cover art.
    pub cover_extensions: Vec<String>,
    /// Whether reconciliation looks into dot-folders of the catalog root.
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            location: None,
            audio_extensions: vec!["flac".into(), "alac".into(), "mp3".into(), "wav".into()],
            cover_extensions: vec!["jpeg".into(), "jpg".into(), "bmp".into(), "png".into()],
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive; `RUST_LOG` takes precedence when set.
    ///
    /// Example: "info,tapeshelf::library=debug"
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
