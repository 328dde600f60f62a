#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use riotgen::error::Result;
use riotgen::identity::{Identity, StaticIdentity};
use riotgen::prompt::Prompter;

pub const YEAR: i32 = 2024;

/// Prompter answering from a queue. Questions asked once the queue is empty
/// get their default, or fail the test when they have none.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|answer| answer.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Every prompt shown, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, prompt: &str) -> Option<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match (self.next(prompt), default) {
            (Some(answer), Some(default)) if answer.is_empty() => Ok(default.to_string()),
            (Some(answer), _) => Ok(answer),
            (None, Some(default)) => Ok(default.to_string()),
            (None, None) => panic!("no answer scripted for '{prompt}'"),
        }
    }

    fn select(&self, prompt: &str, choices: &[&str], default: Option<&str>) -> Result<String> {
        let answer = self.next(prompt).filter(|answer| !answer.is_empty());
        let answer = answer.or_else(|| default.map(str::to_string)).unwrap_or_else(|| choices[0].to_string());
        assert!(choices.contains(&answer.as_str()), "'{answer}' is not a choice of '{prompt}'");
        Ok(answer)
    }

    fn yes_no(&self, prompt: &str, default: bool) -> Result<bool> {
        match self.next(prompt).as_deref() {
            Some("y") | Some("yes") => Ok(true),
            Some("n") | Some("no") => Ok(false),
            Some("") | None => Ok(default),
            Some(other) => panic!("unexpected yes/no answer '{other}'"),
        }
    }
}

pub fn identity() -> StaticIdentity {
    StaticIdentity(Identity { name: "test_name".to_string(), email: "test_email".to_string() })
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Creates an empty RIOT base directory under `dir`.
pub fn riot_dir(dir: &Path) -> PathBuf {
    let riotbase = dir.join("RIOT");
    std::fs::create_dir_all(&riotbase).unwrap();
    riotbase
}
