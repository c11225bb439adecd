use anyhow::Result;
use colored::*;
use std::io::{BufRead, Write};

use crate::actions::{ActionResult, MenuAction};

pub const TITLE: &str = "🎨 DREAM.AI MENU 🎨";
pub const PROMPT: &str = "> ";
pub const QUIT_TOKEN: &str = "q";
pub const FAREWELL: &str = "Au revoir !";
pub const INVALID_CHOICE: &str = "Choix invalide. Veuillez sélectionner 1, 2, 3, 4 ou q.";

/// Why the menu stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitReason {
    /// The user typed `q`.
    Requested,
    /// The input closed before a line could be read.
    EndOfInput,
}

/// Result of resolving one menu choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Continue(String),
    Quit(QuitReason),
}

/// Anything the menu can read a line from.
pub trait LineSource {
    /// Read one line, showing `prompt` if the source is interactive.
    /// `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Whether the source draws `prompt` itself. When it does not, the
    /// resolver writes the prompt to its output before reading.
    fn draws_prompt(&self) -> bool {
        false
    }
}

/// Line source over any buffered reader (piped stdin, files, in-memory input).
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Trim and lowercase a raw choice.
pub fn normalize(choice: &str) -> String {
    choice.trim().to_lowercase()
}

/// Print the framed title.
pub fn print_banner(out: &mut dyn Write) -> Result<()> {
    let rule = "=".repeat(TITLE.chars().count());
    writeln!(out)?;
    writeln!(out, "{}", rule.bright_cyan())?;
    writeln!(out, "{}", TITLE.bright_cyan().bold())?;
    writeln!(out, "{}", rule.bright_cyan())?;
    Ok(())
}

/// Print the banner followed by the numbered options.
pub fn print_menu(out: &mut dyn Write) -> Result<()> {
    print_banner(out)?;
    writeln!(out, "Choisissez une option :")?;
    for action in MenuAction::ALL {
        writeln!(out, "  {}. {}", action.token(), action.label())?;
    }
    writeln!(out, "  {}. Quitter", QUIT_TOKEN)?;
    out.flush()?;
    Ok(())
}

/// Resolve the next menu choice.
///
/// With `explicit` set, the value is normalized and used as-is; `input` is not
/// touched. Otherwise the menu is shown and one line is read from `input`.
/// Quit (`q` in any case, with any surrounding whitespace) prints the farewell.
/// End of input stops the menu quietly.
pub fn resolve_choice<S>(explicit: Option<&str>, input: &mut S, out: &mut dyn Write) -> Result<MenuOutcome>
where
    S: LineSource + ?Sized,
{
    let choice = match explicit {
        Some(choice) => normalize(choice),
        None => {
            print_menu(out)?;
            if !input.draws_prompt() {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }
            match input.read_line(PROMPT)? {
                Some(line) => normalize(&line),
                None => return Ok(MenuOutcome::Quit(QuitReason::EndOfInput)),
            }
        }
    };

    if choice == QUIT_TOKEN {
        writeln!(out, "{}", FAREWELL)?;
        out.flush()?;
        return Ok(MenuOutcome::Quit(QuitReason::Requested));
    }

    Ok(MenuOutcome::Continue(choice))
}

/// Run the action bound to `token`, or `None` when the token is not "1".."4".
pub fn dispatch(token: &str, out: &mut dyn Write) -> Option<ActionResult> {
    MenuAction::from_token(token).map(|action| ActionResult {
        action,
        message: action.run(out),
    })
}
