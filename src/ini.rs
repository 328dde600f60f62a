//! Reader for INI-style configuration files.
//!
//! Follows the conventions of Python's `configparser`, which is what existing
//! riotgen configuration files are written for:
//! - `[section]` headers, every option must belong to a section
//! - `key=value` or `key: value` options, keys are lowercased
//! - `#` and `;` comment lines
//! - indented lines continue the value of the previous option
//! - duplicate sections or options are rejected

use indexmap::IndexMap;

/// Sections in file order, each with its options in file order.
pub type IniSections = IndexMap<String, IndexMap<String, String>>;

/// Parses INI content, returning a description of the first offending line on failure.
pub fn parse_ini(content: &str) -> Result<IniSections, String> {
    let mut sections = IniSections::new();
    let mut section: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let lineno = index + 1;
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // Continuation of the previous option value.
        if line.starts_with(char::is_whitespace) {
            if let (Some(name), Some(key)) = (&section, &last_key) {
                if let Some(value) = sections.get_mut(name).and_then(|options| options.get_mut(key)) {
                    value.push('\n');
                    value.push_str(trimmed);
                    continue;
                }
            }
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| format!("line {lineno}: malformed section header '{trimmed}'"))?;
            if sections.contains_key(name) {
                return Err(format!("line {lineno}: section '{name}' already exists"));
            }
            sections.insert(name.to_string(), IndexMap::new());
            section = Some(name.to_string());
            last_key = None;
            continue;
        }

        let Some(name) = &section else {
            return Err(format!("line {lineno}: option outside of any section header"));
        };

        let delimiter = trimmed
            .find(&['=', ':'][..])
            .ok_or_else(|| format!("line {lineno}: expected 'key=value', found '{trimmed}'"))?;
        let key = trimmed[..delimiter].trim().to_lowercase();
        let value = trimmed[delimiter + 1..].trim().to_string();
        if key.is_empty() {
            return Err(format!("line {lineno}: empty option name"));
        }

        let options = sections.entry(name.clone()).or_default();
        if options.contains_key(&key) {
            return Err(format!("line {lineno}: option '{key}' already exists in section '{name}'"));
        }
        options.insert(key.clone(), value);
        last_key = Some(key);
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_options() {
        let sections = parse_ini(
            "# riotgen configuration\n[global]\nauthor_name = Jane Doe\n\n[driver]\nName: foo\nmodules=\n",
        )
        .unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections["global"]["author_name"], "Jane Doe");
        assert_eq!(sections["driver"]["name"], "foo");
        assert_eq!(sections["driver"]["modules"], "");
    }

    #[test]
    fn test_value_keeps_later_delimiters() {
        let sections = parse_ini("[pkg]\nurl=https://github.com/foo/bar\n").unwrap();
        assert_eq!(sections["pkg"]["url"], "https://github.com/foo/bar");
    }

    #[test]
    fn test_continuation_lines() {
        let sections = parse_ini("[module]\nbrief = first line\n  second line\n").unwrap();
        assert_eq!(sections["module"]["brief"], "first line\nsecond line");
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_ini("").unwrap().is_empty());
    }

    #[test]
    fn test_rejected_content() {
        assert!(parse_ini("name=foo\n").is_err());
        assert!(parse_ini("[invalid_content]\n-").is_err());
        assert!(parse_ini("[a]\n[a]\n").is_err());
        assert!(parse_ini("[a]\nx=1\nx=2\n").is_err());
        assert!(parse_ini("[broken\nx=1\n").is_err());
        assert!(parse_ini("global:\n  name: test\n").is_err());
    }
}
