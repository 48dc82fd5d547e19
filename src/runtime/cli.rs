//! Command-line interface definitions.
//!
//! This module contains the `clap`-powered CLI surface area (args + commands).
//! It has no catalog logic of its own.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tapeshelf", version, about)]
pub struct Args {
    /// Path to the library root (overrides `library.location` from the config)
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// Command to run; starts the interactive shell when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every performer and album in the library
    List,

    /// Add one album folder to the library
    AddAlbum {
        path: PathBuf,

        /// File the album under this performer instead of asking
        #[arg(long)]
        performer: Option<String>,

        /// Remove the source folder after copying it into the library
        #[arg(long)]
        delete_src: bool,

        /// Do not ask for confirmation or metadata review
        #[arg(long, short)]
        yes: bool,
    },

    /// Add every album found below a folder
    AddFolder { path: PathBuf },

    /// Copy albums missing from another library (e.g. a music player)
    Export { target: PathBuf },
}
