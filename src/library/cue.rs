//! Minimal cue-sheet reader.
//!
//! Only the commands the catalog consumes are interpreted: global
//! `PERFORMER`, `TITLE` and `REM DATE`, and per-track `FILE`, `TITLE`
//! and `INDEX`. Everything else is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};

/// Value cue authoring tools write when a field was left blank.
pub const PLACEHOLDER: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    pub performer: Option<String>,
    /// Global `TITLE`, i.e. the album title.
    pub album: Option<String>,
    pub date: Option<String>,
    pub tracks: Vec<CueTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueTrack {
    pub file: Option<String>,
    pub title: Option<String>,
    pub performer: Option<String>,
    /// Start timecode, `INDEX 01` when present.
    pub index: Option<String>,
}

impl CueSheet {
    pub fn parse(content: &str) -> Self {
        let mut sheet = CueSheet::default();
        let mut current_file: Option<String> = None;
        let mut current: Option<CueTrack> = None;

        for line in content.trim_start_matches('\u{feff}').lines() {
            let line = line.trim();
            let (command, rest) = split_command(line);

            match command.to_ascii_uppercase().as_str() {
                "FILE" => current_file = Some(file_name_of(rest)),
                "TRACK" => {
                    if let Some(track) = current.take() {
                        sheet.tracks.push(track);
                    }
                    current = Some(CueTrack {
                        file: current_file.clone(),
                        ..CueTrack::default()
                    });
                }
                "TITLE" => match current.as_mut() {
                    Some(track) => track.title = meaningful(rest),
                    None => sheet.album = meaningful(rest),
                },
                "PERFORMER" => match current.as_mut() {
                    Some(track) => track.performer = meaningful(rest),
                    None => sheet.performer = meaningful(rest),
                },
                "INDEX" => {
                    if let Some(track) = current.as_mut() {
                        let (number, time) = split_command(rest);
                        if number == "01" || track.index.is_none() {
                            track.index = meaningful(time);
                        }
                    }
                }
                "REM" => {
                    let (key, value) = split_command(rest);
                    if key.eq_ignore_ascii_case("DATE") && current.is_none() {
                        sheet.date = meaningful(value);
                    }
                }
                _ => {}
            }
        }

        if let Some(track) = current.take() {
            sheet.tracks.push(track);
        }
        sheet
    }

    /// Read and parse a cue file; text that is not valid UTF-8 is decoded lossily.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }
}

/// Locate the cue sheet of an album folder, if any.
///
/// When several are present the first by file name wins.
pub fn find_cue(dir: &Path) -> Option<PathBuf> {
    let mut cues: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("cue"))
                    .unwrap_or(false)
        })
        .collect();
    cues.sort();
    cues.into_iter().next()
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    }
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    if let Some(inner) = value.strip_prefix('"') {
        return match inner.find('"') {
            Some(end) => &inner[..end],
            None => inner,
        };
    }
    value
}

fn meaningful(value: &str) -> Option<String> {
    let value = unquote(value).trim();
    if value.is_empty() || value == PLACEHOLDER {
        None
    } else {
        Some(value.to_string())
    }
}

/// `FILE "name.flac" WAVE` -> `name.flac`; unquoted names drop the trailing type.
fn file_name_of(rest: &str) -> String {
    let rest = rest.trim();
    if rest.starts_with('"') {
        return unquote(rest).to_string();
    }
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, _kind)) => name.trim().to_string(),
        None => rest.to_string(),
    }
}
