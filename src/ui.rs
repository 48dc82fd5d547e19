//! Console implementation of the catalog's interaction hook.
//!
//! Prompts are read line by line from stdin; end of input counts as "no
//! answer" so the catalog can back out cleanly.

use std::cell::Cell;
use std::io::{self, BufRead, Write};

use crossterm::style::{Print, Stylize};
use crossterm::{cursor, queue, terminal};

use crate::library::{Draft, Interaction, Review};

const BAR_WIDTH: u64 = 30;

#[derive(Default)]
pub struct ConsoleUi {
    /// Last percentage drawn, so the bar only redraws when it moves.
    last_percent: Cell<Option<u64>>,
}

impl ConsoleUi {
    fn read_line(&self) -> Option<String> {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Show `options` as `[key] - label` and wait for one of the keys.
    pub fn choose(&self, message: &str, options: &[(&str, &str)]) -> Option<usize> {
        println!("{message}");
        for (key, label) in options {
            println!("[{}] - {label}", key.bold());
        }
        loop {
            let answer = self.read_line()?;
            if let Some(i) = options.iter().position(|(key, _)| *key == answer) {
                return Some(i);
            }
            let keys: Vec<&str> = options.iter().map(|(k, _)| *k).collect();
            println!("Choose one of {}", keys.join(", "));
        }
    }
}

impl Interaction for ConsoleUi {
    fn show(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        println!("{}", message.yellow());
    }

    fn ask(&self, prompt: &str) -> Option<String> {
        println!("{prompt}");
        self.read_line()
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.choose(prompt, &[("ok", "all right"), ("ex", "abort operation")]) == Some(0)
    }

    fn choose_performer(&self, known: &[String]) -> Option<String> {
        println!("Enter performer or choose from existing");
        for (i, name) in known.iter().enumerate() {
            println!("[{}] - {name}", i.to_string().bold());
        }
        loop {
            let answer = self.read_line()?;
            if answer.is_empty() {
                continue;
            }
            return match answer.parse::<usize>() {
                Ok(i) if i < known.len() => Some(known[i].clone()),
                _ => Some(answer),
            };
        }
    }

    fn review(&self, draft: &Draft) -> Review {
        let message = format!(
            "Is this album data correct?\nPerformer: {}\nYear:      {}\nTitle:     {}\n",
            draft.performer, draft.year, draft.title
        );
        let options = [
            ("ok", "all right"),
            ("p", "change performer"),
            ("y", "change year"),
            ("t", "change title"),
            ("ex", "abort operation"),
        ];
        match self.choose(&message, &options) {
            Some(0) => Review::Accept,
            Some(1) => Review::ChangePerformer,
            Some(2) => Review::ChangeYear,
            Some(3) => Review::ChangeTitle,
            _ => Review::Abort,
        }
    }

    fn progress(&self, label: &str, copied: u64, total: u64) {
        let percent = if total == 0 {
            100
        } else {
            (copied.saturating_mul(100) / total).min(100)
        };
        if self.last_percent.get() == Some(percent) && percent < 100 {
            return;
        }
        self.last_percent.set(Some(percent));

        let filled = percent * BAR_WIDTH / 100;
        let bar = format!(
            "[{}{}] {percent:>3}% Copying {label}",
            "#".repeat(filled as usize),
            " ".repeat((BAR_WIDTH - filled) as usize)
        );
        let mut out = io::stdout();
        let _ = queue!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(bar)
        );
        if percent == 100 {
            let _ = queue!(out, Print("\n"));
            self.last_percent.set(None);
        }
        let _ = out.flush();
    }
}
