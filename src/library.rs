//! The catalog: album model, index, folder scanning and the engines that
//! ingest, reconcile and export albums.
//!
//! A catalog root is laid out as `<root>/<performer>/<year> - <title>/`
//! with the serialized index in `<root>/library.metadata`.

mod catalog;
mod copy;
mod cue;
mod display;
mod export;
mod hooks;
mod index;
mod ingest;
mod model;
mod reconcile;
mod resolve;
mod scan;

pub use catalog::Catalog;
pub use display::render_index;
pub use export::ExportOutcome;
pub use hooks::{Draft, Interaction, NoCovers, Review};
pub use ingest::{AddOptions, AddOutcome};
