//! User input and interaction handling.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Select};
use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, StdinLock};

/// Console interactions needed while resolving parameters.
pub trait Prompter {
    /// Asks for a free text answer. An empty answer is only accepted when a
    /// default is given.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks to pick one of `choices`.
    fn select(&self, prompt: &str, choices: &[&str], default: Option<&str>) -> Result<String>;

    /// Asks a yes/no question.
    fn yes_no(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Asks for a confirmation defaulting to "no", or accepts right away when
    /// `skip` is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        self.yes_no(&prompt, false)
    }
}

/// [`Prompter`] backed by dialoguer terminal widgets.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string()).allow_empty(true);
        }
        Ok(input.interact_text()?)
    }

    fn select(&self, prompt: &str, choices: &[&str], default: Option<&str>) -> Result<String> {
        let default = default
            .and_then(|default| choices.iter().position(|choice| *choice == default))
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(choices)
            .interact()?;

        Ok(choices[selection].to_string())
    }

    fn yes_no(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }
}

/// [`Prompter`] reading one answer per line, used when stdin is not a
/// terminal.
///
/// Prompts go to stderr. An empty answer takes the default, unknown choices
/// and yes/no answers are asked again, and end of input falls back to the
/// default.
pub struct LinePrompter<R> {
    reader: RefCell<R>,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader: RefCell::new(reader) }
    }

    /// Shows `prompt` and reads the next trimmed line, `None` at end of input.
    fn ask(&self, prompt: &str) -> Result<Option<String>> {
        eprint!("{prompt}: ");
        let mut line = String::new();
        if self.reader.borrow_mut().read_line(&mut line)? == 0 {
            eprintln!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl LinePrompter<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let prompt = match default {
            Some(default) => format!("{prompt} [{default}]"),
            None => prompt.to_string(),
        };
        loop {
            match (self.ask(&prompt)?, default) {
                (Some(answer), _) if !answer.is_empty() => return Ok(answer),
                (Some(_), None) => continue,
                (_, Some(default)) => return Ok(default.to_string()),
                (None, None) => return Err(unexpected_eof(&prompt)),
            }
        }
    }

    fn select(&self, prompt: &str, choices: &[&str], default: Option<&str>) -> Result<String> {
        let default = default.or_else(|| choices.first().copied()).unwrap_or_default();
        let prompt = format!("{prompt} ({}) [{default}]", choices.join(", "));
        loop {
            match self.ask(&prompt)? {
                None => return Ok(default.to_string()),
                Some(answer) if answer.is_empty() => return Ok(default.to_string()),
                Some(answer) if choices.contains(&answer.as_str()) => return Ok(answer),
                Some(answer) => eprintln!("Error: '{answer}' is not one of {}.", choices.join(", ")),
            }
        }
    }

    fn yes_no(&self, prompt: &str, default: bool) -> Result<bool> {
        let prompt = format!("{prompt} [{}]", if default { "Y/n" } else { "y/N" });
        loop {
            match self.ask(&prompt)?.map(|answer| answer.to_lowercase()).as_deref() {
                None | Some("") => return Ok(default),
                Some("y") | Some("yes") => return Ok(true),
                Some("n") | Some("no") => return Ok(false),
                Some(_) => eprintln!("Error: invalid input"),
            }
        }
    }
}

fn unexpected_eof(prompt: &str) -> Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, format!("no answer for '{prompt}'")).into()
}

/// The prompter matching stdin: dialoguer widgets on a terminal, line reading
/// otherwise.
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if std::io::stdin().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(LinePrompter::stdin())
    }
}
