//! Error handling for riotgen.
//! Defines the error kinds raised while resolving parameters and rendering sources.

use std::io;
use thiserror::Error;

/// Errors raised by riotgen operations.
///
/// Declining the overwrite confirmation is not an error: the generator reports
/// it through [`crate::generator::Outcome::Aborted`].
#[derive(Error, Debug)]
pub enum Error {
    /// Neither interactive mode nor a configuration file was requested.
    #[error("Missing --interactive and/or --config options.")]
    MissingInput,

    /// The configuration file is neither valid INI nor valid YAML.
    #[error("Cannot parse configuration file '{path}': {reason}.")]
    ConfigParse { path: String, reason: String },

    /// A required parameter is still empty after resolution.
    #[error("Missing parameter: {name}.")]
    MissingParameter { name: String },

    /// A parameter value is present but unusable.
    #[error("Invalid value '{value}' for {name}: {reason}.")]
    InvalidParameter { name: String, value: String, reason: String },

    #[error("Template '{template}' not found.")]
    TemplateNotFound { template: String },

    #[error("Template '{template}' references undefined parameter '{key}'.")]
    UndefinedParameter { template: String, key: String },

    #[error("Templates directory '{path}' does not exist.")]
    TemplateDirectoryNotFound { path: String },

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),
}

impl Error {
    /// Builds a [`Error::MissingParameter`] from a field name, spelling
    /// underscores as spaces.
    pub fn missing_parameter(field: &str) -> Self {
        Error::MissingParameter { name: field.replace('_', " ") }
    }

    pub fn invalid_parameter(
        field: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name: field.replace('_', " "),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
