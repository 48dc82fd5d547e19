//! Outward-facing hooks the catalog calls instead of touching the console
//! or the network itself.

use std::path::Path;

/// Album metadata while it is being reviewed before ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub performer: String,
    pub year: u32,
    pub title: String,
}

/// Answer to a [`Interaction::review`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Review {
    Accept,
    ChangePerformer,
    ChangeYear,
    ChangeTitle,
    Abort,
}

/// User-facing side of the catalog.
pub trait Interaction {
    /// Informational message.
    fn show(&self, message: &str);
    fn warn(&self, message: &str);
    /// Ask for a free-form value. `None` means no answer is available.
    fn ask(&self, prompt: &str) -> Option<String>;
    fn confirm(&self, prompt: &str) -> bool;
    /// Pick one of `known` performers or type a new one.
    fn choose_performer(&self, known: &[String]) -> Option<String>;
    fn review(&self, draft: &Draft) -> Review;
    /// Bytes copied so far out of `total` for the file named `label`.
    fn progress(&self, label: &str, copied: u64, total: u64);
}

/// Source of cover art for albums that ship without one.
pub trait CoverFetcher {
    /// Store a cover for the album as `cover.png` inside `dest_dir`.
    fn fetch_cover(&self, performer: &str, title: &str, dest_dir: &Path) -> bool;
}

/// Never finds a cover.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCovers;

impl CoverFetcher for NoCovers {
    fn fetch_cover(&self, _performer: &str, _title: &str, _dest_dir: &Path) -> bool {
        false
    }
}

/// File name a [`CoverFetcher`] writes into the album folder.
pub const FETCHED_COVER_NAME: &str = "cover.png";
