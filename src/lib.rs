//! riotgen generates the boilerplate of RIOT OS applications, boards,
//! drivers, modules, packages, tests and examples from built-in templates.

/// Command-line interface module for the riotgen application
pub mod cli;

/// Configuration files, INI or YAML
pub mod config;

/// Error types and handling for the riotgen application
pub mod error;

/// Data-driven artifact generation
pub mod generator;

/// Author identity defaults read from git
pub mod identity;

pub mod ini;

/// Static description of every artifact kind
pub mod kinds;

/// License texts and comment headers
pub mod license;

pub mod logger;

/// Comma separated list options
pub mod options;

/// Parameter values, groups and schemas
pub mod params;

/// User input and interaction handling
pub mod prompt;

/// Parameter resolution and validation
pub mod resolver;

/// Template rendering and file writing
pub mod renderer;

/// Template sources
pub mod templates;

use error::Result;
use generator::{Generator, Outcome};
use identity::GitIdentity;
use prompt::stdin_prompter;
use renderer::MiniJinjaRenderer;
use templates::{BuiltinTemplates, DirectoryTemplates};

/// Runs the command described by `args` with the prompter matching stdin and
/// the git identity.
pub fn run(args: cli::Args) -> Result<Outcome> {
    let renderer = match &args.command.shared().templates {
        Some(dir) => MiniJinjaRenderer::new(DirectoryTemplates::new(dir)?.with_fallback(BuiltinTemplates)),
        None => MiniJinjaRenderer::default(),
    };
    let prompter = stdin_prompter();
    let identity = GitIdentity::new();

    Generator::new(prompter.as_ref(), &identity, &renderer).generate(&args.command.request())
}
