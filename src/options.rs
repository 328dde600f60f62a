//! Comma separated list options.

use crate::params::ParamValue;

/// Splits a comma separated option into a sorted list.
///
/// An empty option yields an empty list. Pieces are trimmed but never dropped,
/// so `n` commas always give `n + 1` elements.
pub fn parse_list_option(opt: &str) -> Vec<String> {
    if opt.is_empty() {
        return Vec::new();
    }
    let mut items: Vec<String> = opt.split(',').map(|item| item.trim().to_string()).collect();
    items.sort();
    items
}

/// Normalizes any list option input: missing values become an empty list,
/// text is split on commas and lists are sorted. Flags carry no list items.
pub fn list_option(value: Option<&ParamValue>) -> Vec<String> {
    match value {
        None | Some(ParamValue::Flag(_)) => Vec::new(),
        Some(ParamValue::Text(text)) => parse_list_option(text),
        Some(ParamValue::List(items)) => {
            let mut items = items.clone();
            items.sort();
            items
        }
    }
}
