use std::rc::Rc;

use anyhow::{Context, bail};
use clap::Parser;

use crate::error::CatalogError;
use crate::library::{Catalog, Interaction, NoCovers, render_index};
use crate::ui::ConsoleUi;

mod cli;
mod commands;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let settings = settings::load_settings();
    settings::init_tracing(&settings.logging);

    let location = args
        .library
        .clone()
        .or_else(|| settings.library.location.clone())
        .ok_or(CatalogError::MissingLibrary)?;
    if !location.is_dir() {
        bail!("Not found library at {}", location.display());
    }

    let ui = Rc::new(ConsoleUi::default());
    let mut catalog = Catalog::open(&location, settings.library.clone(), ui.clone(), Rc::new(NoCovers))
        .with_context(|| format!("failed to open library at {}", location.display()))?;
    ui.show(&format!("Library loaded [{}]", catalog.index_file().display()));

    let result = match args.command {
        Some(command) => commands::execute(&mut catalog, ui.as_ref(), command),
        None => {
            ui.show(&render_index(catalog.index()));
            commands::shell(&mut catalog, &ui);
            Ok(())
        }
    };

    // Whatever the command did is already on disk; save the index even on failure.
    let root = catalog.root().to_path_buf();
    catalog
        .close()
        .with_context(|| format!("failed to save library index in {}", root.display()))?;
    result
}
