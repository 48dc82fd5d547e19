//! The command table behind the interactive shell and its dispatcher.

use std::path::PathBuf;

use anyhow::Result;

use crate::library::{AddOptions, Catalog, ExportOutcome, Interaction, render_index};
use crate::ui::ConsoleUi;

use super::cli::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    List,
    AddAlbum,
    AddFolder,
    Export,
    Exit,
}

/// One entry of the interactive shell: key, label and the argument it asks for.
#[derive(Debug)]
pub struct CommandSpec {
    pub key: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
    pub arg_prompt: Option<&'static str>,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        key: "ls",
        description: "show library",
        kind: CommandKind::List,
        arg_prompt: None,
    },
    CommandSpec {
        key: "aa",
        description: "add album",
        kind: CommandKind::AddAlbum,
        arg_prompt: Some("Enter path to album"),
    },
    CommandSpec {
        key: "af",
        description: "extract all albums from folder",
        kind: CommandKind::AddFolder,
        arg_prompt: Some("Enter path to folder with music"),
    },
    CommandSpec {
        key: "e",
        description: "export library to player",
        kind: CommandKind::Export,
        arg_prompt: Some("Enter path to music player folder"),
    },
    CommandSpec {
        key: "ex",
        description: "save library and exit",
        kind: CommandKind::Exit,
        arg_prompt: None,
    },
];

/// Strip one pair of matching quotes, as pasted paths often carry them.
fn unquote(arg: &str) -> &str {
    let arg = arg.trim();
    for q in ['"', '\''] {
        if let Some(inner) = arg.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    arg
}

impl CommandSpec {
    /// Build the command, asking for its argument when it has one.
    ///
    /// Returns `None` for `Exit`, or when no usable argument was given.
    pub fn build(&self, ui: &dyn Interaction) -> Option<Command> {
        let arg = match self.arg_prompt {
            Some(prompt) => {
                let raw = ui.ask(prompt)?;
                let arg = unquote(&raw);
                if arg.is_empty() {
                    return None;
                }
                Some(PathBuf::from(arg))
            }
            None => None,
        };

        match (self.kind, arg) {
            (CommandKind::List, _) => Some(Command::List),
            (CommandKind::AddAlbum, Some(path)) => Some(Command::AddAlbum {
                path,
                performer: None,
                delete_src: false,
                yes: false,
            }),
            (CommandKind::AddFolder, Some(path)) => Some(Command::AddFolder { path }),
            (CommandKind::Export, Some(target)) => Some(Command::Export { target }),
            _ => None,
        }
    }
}

/// Run one command against the open catalog.
pub fn execute(catalog: &mut Catalog, ui: &dyn Interaction, command: Command) -> Result<()> {
    tracing::debug!(?command, "executing command");
    match command {
        Command::List => ui.show(&render_index(catalog.index())),
        Command::AddAlbum {
            path,
            performer,
            delete_src,
            yes,
        } => {
            let opts = AddOptions {
                performer,
                delete_src,
                interactive: !yes,
                ..AddOptions::default()
            };
            catalog.add_album(&path, opts)?;
        }
        Command::AddFolder { path } => {
            let outcomes = catalog.add_folder(&path)?;
            let added = outcomes.iter().filter(|o| o.is_added()).count();
            ui.show(&format!("Added {added} of {} album(s)", outcomes.len()));
        }
        Command::Export { target } => {
            if let ExportOutcome::Exported { failed, .. } = catalog.export(&target)?
                && failed > 0
            {
                ui.warn(&format!("{failed} album(s) could not be exported"));
            }
        }
    }
    Ok(())
}

/// Interactive loop over [`COMMANDS`] until `ex` or end of input.
///
/// A failing command is reported and the loop keeps going.
pub fn shell(catalog: &mut Catalog, ui: &ConsoleUi) {
    let options: Vec<(&str, &str)> = COMMANDS.iter().map(|c| (c.key, c.description)).collect();
    loop {
        let Some(i) = ui.choose("Choose command", &options) else {
            break;
        };
        let spec = &COMMANDS[i];
        if spec.kind == CommandKind::Exit {
            break;
        }
        let Some(command) = spec.build(ui) else {
            continue;
        };
        if let Err(e) = execute(catalog, ui, command) {
            tracing::warn!(error = %e, "command failed");
            ui.warn(&format!("{e:#}"));
        }
    }
}
