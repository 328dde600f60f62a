//! Parameter resolution.
//!
//! Merges configuration values, interactive answers and defaults into a
//! validated [`RenderContext`] holding the artifact group and the shared
//! `global` group.

use std::path::Path;

use chrono::Datelike;
use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::identity::{Identity, IdentityProvider};
use crate::license::LICENSES;
use crate::options::{list_option, parse_list_option};
use crate::params::{
    ParamKind, ParamSpec, ParamValue, ParameterDescriptor, ParameterGroup, RenderContext,
    GLOBAL_GROUP,
};
use crate::prompt::Prompter;

/// Schema of the `global` group. `year` and `riotbase` are filled in by the
/// resolver itself and never prompted.
pub static GLOBAL: ParameterDescriptor = ParameterDescriptor {
    group: GLOBAL_GROUP,
    subdir: "",
    params: &[
        ParamSpec::text("license", "License").with_choices(LICENSES).with_default("LGPLv21"),
        ParamSpec::text("author_name", "Author name"),
        ParamSpec::text("author_email", "Author email"),
        ParamSpec::text("organization", "Organization"),
    ],
    lists: &[],
};

/// Defaults computed at run time, taking precedence over the descriptor ones.
pub type Defaults = IndexMap<&'static str, String>;

pub struct Resolver<'a> {
    prompter: &'a dyn Prompter,
    identity: &'a dyn IdentityProvider,
    year: i32,
}

impl<'a> Resolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, identity: &'a dyn IdentityProvider) -> Self {
        Self { prompter, identity, year: chrono::Local::now().year() }
    }

    /// Overrides the year used when none is configured.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Resolves the parameters of `descriptor.group` and of the global group.
    ///
    /// # Arguments
    /// * `descriptor` - Schema of the artifact group
    /// * `interactive` - Prompt for every value still missing
    /// * `config` - Configuration file to start from
    /// * `riotbase` - Project root, exposed as `global.riotbase` over any
    ///   configured value
    ///
    /// # Errors
    /// * `Error::MissingInput` when neither `interactive` nor `config` is usable
    /// * `Error::ConfigParse` for an unreadable configuration
    /// * `Error::MissingParameter` for a required field left empty
    pub fn resolve(
        &self,
        descriptor: &ParameterDescriptor,
        interactive: bool,
        config: Option<&Path>,
        riotbase: Option<&Path>,
    ) -> Result<RenderContext> {
        if !interactive && config.is_none() {
            return Err(Error::MissingInput);
        }

        let mut context = match config {
            Some(path) => load_config(path, &[descriptor.group])?,
            None => RenderContext::new(),
        };

        let global_defaults = global_defaults(&self.identity.identity());
        let no_defaults = Defaults::new();

        if interactive {
            self.prompt_group(context.group_mut(descriptor.group), descriptor, &no_defaults)?;
            self.prompt_group(context.group_mut(GLOBAL_GROUP), &GLOBAL, &global_defaults)?;
        }

        validate_group(context.group_mut(descriptor.group), descriptor, &no_defaults)?;
        validate_group(context.group_mut(GLOBAL_GROUP), &GLOBAL, &global_defaults)?;

        let global = context.group_mut(GLOBAL_GROUP);
        if global.is_missing("year") {
            global.insert("year", self.year.to_string());
        }
        // the command line wins over the configuration
        match riotbase {
            Some(path) => global.insert("riotbase", path.display().to_string()),
            None if global.is_missing("riotbase") => global.insert("riotbase", ""),
            None => {}
        }

        debug!("Resolved parameters: {:?}", context);
        Ok(context)
    }

    /// Prompts for every parameter and list of the descriptor that is still missing.
    pub fn prompt_group(
        &self,
        group: &mut ParameterGroup,
        descriptor: &ParameterDescriptor,
        defaults: &Defaults,
    ) -> Result<()> {
        for spec in descriptor.params {
            if !group.is_missing(spec.name) {
                continue;
            }
            let default = default_for(spec, group, defaults);
            let value = match spec.kind {
                ParamKind::Flag => {
                    let default = default.as_deref().map(parse_flag).transpose()?.unwrap_or(false);
                    ParamValue::Flag(self.prompter.yes_no(spec.prompt, default)?)
                }
                ParamKind::Text if !spec.choices.is_empty() => ParamValue::Text(
                    self.prompter.select(spec.prompt, spec.choices, default.as_deref())?,
                ),
                ParamKind::Text => {
                    ParamValue::Text(self.prompter.input(spec.prompt, default.as_deref())?)
                }
            };
            group.insert(spec.name, value);
        }

        for name in descriptor.lists {
            if !group.is_missing(name) {
                continue;
            }
            let prompt = format!("{} (comma separated)", name.to_sentence_case());
            let answer = self.prompter.input(&prompt, Some(""))?;
            group.insert(*name, parse_list_option(&answer));
        }

        Ok(())
    }
}

fn global_defaults(identity: &Identity) -> Defaults {
    let mut defaults = Defaults::new();
    defaults.insert("author_name", identity.name.clone());
    defaults.insert("author_email", identity.email.clone());
    defaults.insert("organization", identity.name.clone());
    defaults
}

fn default_for(spec: &ParamSpec, group: &ParameterGroup, defaults: &Defaults) -> Option<String> {
    defaults
        .get(spec.name)
        .filter(|value| !value.is_empty())
        .cloned()
        .or_else(|| spec.default.value(group))
}

/// Parses the textual form of a flag.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "false" | "off" | "0" => Ok(false),
        _ => Err(Error::invalid_parameter("flag", value, "expected yes or no")),
    }
}

/// Validates a resolved group against its descriptor.
///
/// Missing values take their default, or fail with `Error::MissingParameter`.
/// Flags are converted to booleans, choices checked, lists normalized, and
/// spaces in `name` replaced with underscores as the last step. Running it on
/// an already valid group changes nothing.
pub fn validate_group(
    group: &mut ParameterGroup,
    descriptor: &ParameterDescriptor,
    defaults: &Defaults,
) -> Result<()> {
    for spec in descriptor.params {
        if group.is_missing(spec.name) {
            let default =
                default_for(spec, group, defaults).ok_or_else(|| Error::missing_parameter(spec.name))?;
            group.insert(spec.name, default);
        }

        let value = match group.get(spec.name) {
            Some(value) => value.clone(),
            None => return Err(Error::missing_parameter(spec.name)),
        };
        let value = match (spec.kind, value) {
            (ParamKind::Flag, ParamValue::Text(text)) => ParamValue::Flag(
                parse_flag(&text)
                    .map_err(|_| Error::invalid_parameter(spec.name, &text, "expected yes or no"))?,
            ),
            (ParamKind::Flag, flag @ ParamValue::Flag(_)) => flag,
            (ParamKind::Text, ParamValue::Flag(flag)) => ParamValue::Text(flag.to_string()),
            (ParamKind::Text, text @ ParamValue::Text(_)) => text,
            (_, list @ ParamValue::List(_)) => {
                return Err(Error::invalid_parameter(spec.name, list.to_string(), "expected a single value"));
            }
        };

        if let ParamValue::Text(text) = &value {
            if !spec.choices.is_empty() && !spec.choices.contains(&text.as_str()) {
                return Err(Error::invalid_parameter(
                    spec.name,
                    text,
                    format!("expected one of {}", spec.choices.join(", ")),
                ));
            }
        }
        group.insert(spec.name, value);
    }

    for name in descriptor.lists {
        if let Some(ParamValue::Flag(flag)) = group.get(name) {
            return Err(Error::invalid_parameter(name, flag.to_string(), "expected a comma separated list"));
        }
        let items = list_option(group.get(name));
        group.insert(*name, items);
    }

    if let Some(name) = group.text("name") {
        let name = name.replace(' ', "_");
        group.insert("name", name);
    }

    Ok(())
}
