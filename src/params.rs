//! Parameter groups, their schema and the render context built from them.

use cruet::Inflector;
use indexmap::IndexMap;
use serde::Serialize;

/// Name of the group shared by every artifact kind (author, license, year...).
pub const GLOBAL_GROUP: &str = "global";

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl ParamValue {
    /// Empty text and empty lists count as missing; flags never do.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Text(text) => text.is_empty(),
            ParamValue::List(items) => items.is_empty(),
            ParamValue::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Text(text) => write!(f, "{text}"),
            ParamValue::List(items) => write!(f, "{}", items.join(",")),
            ParamValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

/// A named mapping from parameter names to values, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterGroup(IndexMap<String, ParamValue>);

impl ParameterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ParamValue::as_text)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Absent, empty text or empty list.
    pub fn is_missing(&self, key: &str) -> bool {
        self.0.get(key).map_or(true, ParamValue::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterGroup {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The full parameter tree handed to templates: group name to group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(IndexMap<String, ParameterGroup>);

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, name: &str) -> Option<&ParameterGroup> {
        self.0.get(name)
    }

    /// Returns the named group, creating it empty when absent.
    pub fn group_mut(&mut self, name: &str) -> &mut ParameterGroup {
        self.0.entry(name.to_string()).or_default()
    }

    pub fn insert_group(&mut self, name: impl Into<String>, group: ParameterGroup) {
        self.0.insert(name.into(), group);
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &ParameterGroup)> {
        self.0.iter()
    }

    pub fn groups_mut(&mut self) -> impl Iterator<Item = (&String, &mut ParameterGroup)> {
        self.0.iter_mut()
    }

    /// Context as a JSON tree, used to look up dotted keys.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Flag,
}

/// Where a parameter takes its value from when nothing was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    None,
    Literal(&'static str),
    /// Title case of another parameter of the same group.
    TitleCaseOf(&'static str),
}

impl DefaultValue {
    pub fn value(&self, group: &ParameterGroup) -> Option<String> {
        match self {
            DefaultValue::None => None,
            DefaultValue::Literal(value) => Some((*value).to_string()),
            DefaultValue::TitleCaseOf(field) => group
                .text(field)
                .filter(|value| !value.is_empty())
                .map(|value| value.to_title_case()),
        }
    }
}

/// Schema entry of a scalar parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: ParamKind,
    pub default: DefaultValue,
    pub choices: &'static [&'static str],
}

impl ParamSpec {
    pub const fn text(name: &'static str, prompt: &'static str) -> Self {
        Self { name, prompt, kind: ParamKind::Text, default: DefaultValue::None, choices: &[] }
    }

    pub const fn flag(name: &'static str, prompt: &'static str, default: bool) -> Self {
        Self {
            name,
            prompt,
            kind: ParamKind::Flag,
            default: DefaultValue::Literal(if default { "true" } else { "false" }),
            choices: &[],
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = DefaultValue::Literal(default);
        self
    }

    pub const fn title_of(mut self, field: &'static str) -> Self {
        self.default = DefaultValue::TitleCaseOf(field);
        self
    }

    pub const fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }
}

/// Static schema of a parameter group.
#[derive(Debug)]
pub struct ParameterDescriptor {
    /// Group the parameters live in.
    pub group: &'static str,
    /// Directory of this artifact kind relative to the project root.
    pub subdir: &'static str,
    pub params: &'static [ParamSpec],
    /// Comma separated list parameters.
    pub lists: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        let group: ParameterGroup = [
            ("name", ParamValue::from("foo")),
            ("brief", ParamValue::from("")),
            ("modules", ParamValue::List(vec![])),
            ("flag", ParamValue::Flag(false)),
        ]
        .into_iter()
        .collect();

        assert!(!group.is_missing("name"));
        assert!(group.is_missing("brief"));
        assert!(group.is_missing("modules"));
        assert!(!group.is_missing("flag"));
        assert!(group.is_missing("absent"));
    }

    #[test]
    fn test_context_serialization() {
        let mut context = RenderContext::new();
        context.group_mut("driver").insert("name", "foo");
        context.group_mut("driver").insert("modules", vec!["xtimer".to_string()]);
        context.group_mut("test").insert("use_testrunner", true);

        assert_eq!(
            context.to_json(),
            serde_json::json!({
                "driver": {"name": "foo", "modules": ["xtimer"]},
                "test": {"use_testrunner": true}
            })
        );
    }

    #[test]
    fn test_title_case_default() {
        let mut group = ParameterGroup::new();
        assert_eq!(DefaultValue::TitleCaseOf("name").value(&group), None);
        group.insert("name", "my_sensor");
        assert_eq!(DefaultValue::TitleCaseOf("name").value(&group), Some("My Sensor".to_string()));
        assert_eq!(DefaultValue::Literal("native").value(&group), Some("native".to_string()));
    }
}
