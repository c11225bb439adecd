use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Highlighter, Validator};
use std::io::{self, IsTerminal, Write};

use crate::actions::MenuAction;
use crate::logger::{Logger, SessionMetrics};
use crate::menu::{self, LineSource, MenuOutcome, QuitReason, ReaderSource, INVALID_CHOICE};

/// Rustyline helper showing the option label after a typed option number.
#[derive(Helper, Completer, Validator, Highlighter)]
struct MenuHinter;

impl Hinter for MenuHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos != line.len() {
            return None;
        }
        let token = menu::normalize(line);
        if token == menu::QUIT_TOKEN {
            return Some("  Quitter".to_string());
        }
        MenuAction::from_token(&token).map(|action| format!("  {}", action.label()))
    }
}

/// Terminal line source backed by rustyline.
pub struct EditorSource {
    editor: Editor<MenuHinter, DefaultHistory>,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        let rl_config = Config::builder().auto_add_history(true).build();
        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(MenuHinter));
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(&prompt.bright_cyan().bold().to_string()) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn draws_prompt(&self) -> bool {
        true
    }
}

/// Run the menu until the user quits or the input ends.
///
/// Every resolved token is dispatched; tokens outside "1".."4" print the
/// invalid-choice notice and the menu is shown again.
pub fn run_menu_loop<S>(
    input: &mut S,
    out: &mut dyn Write,
    logger: Option<&Logger>,
    metrics: &mut SessionMetrics,
) -> Result<QuitReason>
where
    S: LineSource + ?Sized,
{
    menu::print_banner(out)?;

    loop {
        let outcome = match menu::resolve_choice(None, input, out) {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(logger) = logger {
                    let _ = logger.log_error(&format!("Input error: {}", e));
                }
                return Err(e);
            }
        };

        let token = match outcome {
            MenuOutcome::Continue(token) => token,
            MenuOutcome::Quit(reason) => {
                if let Some(logger) = logger {
                    let _ = logger.log_quit(reason, metrics);
                }
                return Ok(reason);
            }
        };

        if let Some(logger) = logger {
            let _ = logger.log_choice(&token);
        }

        match menu::dispatch(&token, out) {
            Some(result) => {
                metrics.record(result.action);
                if let Some(logger) = logger {
                    let _ = logger.log_action(result.action);
                }
            }
            None => {
                writeln!(out, "{}", INVALID_CHOICE.yellow())?;
                metrics.record_invalid();
                if let Some(logger) = logger {
                    let _ = logger.log_invalid(&token);
                }
            }
        }
    }
}

/// Interactive entry point: rustyline on a terminal, buffered stdin otherwise.
pub fn start_repl(logger: Option<Logger>) -> Result<()> {
    let mut metrics = SessionMetrics::new();
    let mut out = io::stdout();

    if io::stdin().is_terminal() {
        let mut source = EditorSource::new()?;
        run_menu_loop(&mut source, &mut out, logger.as_ref(), &mut metrics)?;
    } else {
        let mut source = ReaderSource::new(io::stdin().lock());
        run_menu_loop(&mut source, &mut out, logger.as_ref(), &mut metrics)?;
    }

    Ok(())
}
