//! Configuration file loading.
//! Reads a parameter tree from an INI or YAML file. Defaults and required
//! fields are left to the resolver.

use crate::error::{Error, Result};
use crate::ini::parse_ini;
use crate::options::list_option;
use crate::params::{ParamValue, ParameterGroup, RenderContext};
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

/// Parameters always handled as comma separated lists.
pub const LIST_PARAMS: [&str; 4] = ["modules", "packages", "features_required", "features_provided"];

/// Loads a configuration file into a render context.
///
/// # Arguments
/// * `path` - Configuration file, INI or YAML
/// * `groups` - Groups whose list parameters are normalized
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::ConfigParse` if the content matches neither format
pub fn load_config<P: AsRef<Path>>(path: P, groups: &[&str]) -> Result<RenderContext> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_config(&content, &path.display().to_string(), groups)
}

/// Parses configuration content: INI first, YAML as a fallback.
///
/// Every listed group present in the content gets its list parameters
/// normalized, absent ones are initialized to an empty list.
pub fn parse_config(content: &str, source: &str, groups: &[&str]) -> Result<RenderContext> {
    let mut context = match parse_ini(content) {
        Ok(sections) => {
            debug!("Configuration '{}' read as INI", source);
            ini_to_context(sections)
        }
        Err(ini_error) => {
            debug!("Configuration '{}' is not INI ({}), trying YAML", source, ini_error);
            yaml_to_context(content).map_err(|reason| Error::ConfigParse {
                path: source.to_string(),
                reason: format!("not INI ({ini_error}), not YAML ({reason})"),
            })?
        }
    };

    for group in groups {
        if !context.contains_group(group) {
            continue;
        }
        let params = context.group_mut(group);
        for name in LIST_PARAMS {
            let items = list_option(params.get(name));
            params.insert(name, items);
        }
    }

    Ok(context)
}

fn ini_to_context(sections: IndexMap<String, IndexMap<String, String>>) -> RenderContext {
    let mut context = RenderContext::new();
    for (name, options) in sections {
        context.insert_group(name, options.into_iter().collect::<ParameterGroup>());
    }
    context
}

fn yaml_to_context(content: &str) -> std::result::Result<RenderContext, String> {
    let raw: IndexMap<String, Option<IndexMap<String, serde_yaml::Value>>> =
        serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    let mut context = RenderContext::new();
    for (name, options) in raw {
        let mut group = ParameterGroup::new();
        for (key, value) in options.unwrap_or_default() {
            let value = yaml_value(&value).map_err(|reason| format!("{reason} for '{name}.{key}'"))?;
            group.insert(key, value);
        }
        context.insert_group(name, group);
    }
    Ok(context)
}

/// Reads a scalar as text. Floats are refused because their text form is not
/// kept (`1.10` would read as `1.1`): such values must be quoted.
fn yaml_scalar(value: &serde_yaml::Value) -> std::result::Result<String, String> {
    match value {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::Bool(flag) => Ok(flag.to_string()),
        serde_yaml::Value::Number(number) if number.is_f64() => {
            Err(format!("number {number} must be quoted to be read as text"))
        }
        serde_yaml::Value::Number(number) => Ok(number.to_string()),
        serde_yaml::Value::String(text) => Ok(text.clone()),
        _ => Err("unsupported value".to_string()),
    }
}

fn yaml_value(value: &serde_yaml::Value) -> std::result::Result<ParamValue, String> {
    match value {
        serde_yaml::Value::Bool(flag) => Ok(ParamValue::Flag(*flag)),
        serde_yaml::Value::Sequence(items) => {
            items.iter().map(yaml_scalar).collect::<std::result::Result<Vec<_>, _>>().map(ParamValue::List)
        }
        other => yaml_scalar(other).map(ParamValue::Text),
    }
}
