//! License texts injected at the top of generated sources.

use crate::error::{Error, Result};

/// Identifiers accepted for `global.license`.
pub const LICENSES: &[&str] = &["LGPLv21", "BSD", "MIT", "Apache2"];

/// Comment syntax of a generated file, deciding how the license lines are prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// C block comments: ` * `
    Block,
    /// Shell, make, Kconfig and Python comments: `# `
    Hash,
}

impl CommentStyle {
    pub fn prefix(&self) -> &'static str {
        match self {
            CommentStyle::Block => " * ",
            CommentStyle::Hash => "# ",
        }
    }
}

/// Returns the raw text of a license.
pub fn license_text(license: &str) -> Result<&'static str> {
    let text = match license {
        "LGPLv21" => include_str!("../licenses/LGPLv21.txt"),
        "BSD" => include_str!("../licenses/BSD.txt"),
        "MIT" => include_str!("../licenses/MIT.txt"),
        "Apache2" => include_str!("../licenses/Apache2.txt"),
        other => {
            return Err(Error::invalid_parameter(
                "license",
                other,
                format!("expected one of {}", LICENSES.join(", ")),
            ));
        }
    };
    Ok(text)
}

/// Formats a license as a comment block body, one prefixed line per text line.
/// Empty lines get the prefix without its trailing space.
pub fn license_header(license: &str, style: CommentStyle) -> Result<String> {
    let prefix = style.prefix();
    let header = license_text(license)?
        .lines()
        .map(|line| if line.is_empty() { prefix.trim_end().to_string() } else { format!("{prefix}{line}") })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(header)
}
