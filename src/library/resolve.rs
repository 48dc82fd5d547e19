//! Album identity resolution: performer, year and title for a folder.
//!
//! Sources are tried in order: the `YYYY - Title` folder-name convention,
//! the cue sheet, embedded tags, and finally the interaction hook.

use std::path::Path;

use crate::error::{CatalogError, Result};

use super::cue::CueSheet;
use super::hooks::{Draft, Interaction, Review};
use super::model::upper_first;
use super::scan::TagHints;

/// Attempts the hook gets to produce a numeric year before giving up.
const YEAR_ATTEMPTS: usize = 3;

/// Split a `YYYY - Title` folder name into its year and title.
pub fn parse_folder_name(name: &str) -> Option<(u32, String)> {
    let (year, title) = name.split_at_checked(4)?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let title = title.strip_prefix(" - ")?;
    if title.is_empty() {
        return None;
    }
    Some((year.parse().ok()?, title.to_string()))
}

/// Ask the hook for a year until it answers with a number.
pub fn ask_year(ui: &dyn Interaction, prompt: &str) -> Result<u32> {
    for _ in 0..YEAR_ATTEMPTS {
        let Some(answer) = ui.ask(prompt) else {
            break;
        };
        match answer.trim().parse::<u32>() {
            Ok(year) => return Ok(year),
            Err(_) => ui.warn(&format!("'{}' is not a year", answer.trim())),
        }
    }
    Err(CatalogError::InvalidInput(
        "a numeric release year is required".to_string(),
    ))
}

/// Ask the hook to pick or type a performer.
pub fn ask_performer(ui: &dyn Interaction, known: &[String]) -> Option<String> {
    ui.choose_performer(known)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(|p| upper_first(&p))
}

/// Resolve year and title of the album stored in `dir`.
pub fn resolve_year_title(
    dir: &Path,
    cue: Option<&CueSheet>,
    tags: &TagHints,
    ui: &dyn Interaction,
    interactive: bool,
) -> Result<(u32, String)> {
    let folder = dir
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (mut year, mut title) = match parse_folder_name(&folder) {
        Some((y, t)) => (Some(y), Some(t)),
        None => (None, None),
    };

    if let Some(cue) = cue {
        if year.is_none() {
            year = cue
                .date
                .as_deref()
                .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|d| d.parse().ok());
        }
        if title.is_none() {
            title = cue.album.clone();
        }
    }
    if title.is_none() {
        title = tags.album.clone();
    }

    let year = match year {
        Some(y) => y,
        None => ask_year(ui, &format!("Enter release year of {folder}"))?,
    };

    let title = match title {
        Some(t) => t,
        None if interactive => ui
            .ask(&format!("Enter album title (empty keeps '{folder}')"))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(folder),
        None => folder,
    };

    Ok((year, upper_first(&title)))
}

/// Resolve the performer from the cue sheet (global, then first track), tags, or the hook.
pub fn resolve_performer(
    cue: Option<&CueSheet>,
    tags: &TagHints,
    ui: &dyn Interaction,
    known: &[String],
) -> Result<String> {
    let from_cue = cue.and_then(|c| {
        c.performer
            .as_deref()
            .or_else(|| c.tracks.iter().find_map(|t| t.performer.as_deref()))
    });
    if let Some(p) = from_cue {
        return Ok(upper_first(p));
    }
    if let Some(p) = tags.artist.as_deref() {
        return Ok(upper_first(p));
    }
    ask_performer(ui, known)
        .ok_or_else(|| CatalogError::InvalidInput("a performer is required".to_string()))
}

/// Let the user correct the draft until it is accepted or the ingestion is aborted.
///
/// Acceptance is refused while `exists` reports an equal album under the
/// draft's performer. Returns `None` on abort.
pub fn review(
    ui: &dyn Interaction,
    mut draft: Draft,
    known: &[String],
    exists: impl Fn(&Draft) -> bool,
) -> Option<Draft> {
    loop {
        match ui.review(&draft) {
            Review::Accept => {
                if exists(&draft) {
                    ui.warn(
                        "Such an album already exists in the library\n\
                         Change the metadata of the new album or delete the old one",
                    );
                    continue;
                }
                return Some(draft);
            }
            Review::ChangePerformer => {
                if let Some(p) = ask_performer(ui, known) {
                    draft.performer = p;
                }
            }
            Review::ChangeYear => match ask_year(ui, "Enter new year") {
                Ok(y) => draft.year = y,
                Err(e) => ui.warn(&e.to_string()),
            },
            Review::ChangeTitle => {
                if let Some(t) = ui
                    .ask("Enter new title")
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                {
                    draft.title = upper_first(&t);
                }
            }
            Review::Abort => return None,
        }
    }
}
