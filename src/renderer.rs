//! Template rendering for riotgen.
//! Renders logical templates from a [`TemplateStore`] against a
//! [`RenderContext`] using MiniJinja, and writes the results to disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::error::{Error, Result};
use crate::params::RenderContext;
use crate::templates::{BuiltinTemplates, TemplateStore};

/// Names MiniJinja provides without them being part of the context.
const BUILTIN_NAMES: [&str; 8] =
    ["loop", "range", "dict", "namespace", "debug", "lipsum", "cycler", "joiner"];

/// A template and the file name it is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    /// Logical template name in its group.
    pub template: &'static str,
    /// Output name pattern where `{name}` stands for the group's `name`
    /// parameter. `None` reuses the template name.
    pub output: Option<&'static str>,
}

impl TemplateFile {
    pub const fn verbatim(template: &'static str) -> Self {
        Self { template, output: None }
    }

    pub const fn renamed(template: &'static str, output: &'static str) -> Self {
        Self { template, output: Some(output) }
    }

    /// Destination file name for the given artifact name.
    pub fn output_name(&self, name: Option<&str>) -> Result<String> {
        match (self.output, name) {
            (None, _) => Ok(self.template.to_string()),
            (Some(pattern), Some(name)) => Ok(pattern.replace("{name}", name)),
            (Some(pattern), None) if !pattern.contains("{name}") => Ok(pattern.to_string()),
            (Some(_), None) => Err(Error::UndefinedParameter {
                template: self.template.to_string(),
                key: "name".to_string(),
            }),
        }
    }
}

/// Logical template names mapped to output file names.
pub type TemplateFileMapping = [TemplateFile];

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the template `group/name` against the whole context.
    fn render(&self, group: &str, name: &str, context: &RenderContext) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer loading templates from `store`.
    pub fn new(store: impl TemplateStore + 'static) -> Self {
        let store: Arc<dyn TemplateStore> = Arc::new(store);
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_loader(move |key| {
            let Some((group, name)) = key.split_once('/') else {
                return Ok(None);
            };
            store
                .load(group, name)
                .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))
        });
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new(BuiltinTemplates)
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the store has no such template
    /// * `Error::UndefinedParameter` if the template uses a key missing from the context
    /// * `Error::MinijinjaError` for any other template failure
    fn render(&self, group: &str, name: &str, context: &RenderContext) -> Result<String> {
        let key = format!("{group}/{name}");
        let template = self.env.get_template(&key).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => Error::TemplateNotFound { template: key.clone() },
            _ => Error::MinijinjaError(e),
        })?;

        template.render(context).map_err(|e| {
            if e.kind() != ErrorKind::UndefinedError {
                return Error::MinijinjaError(e);
            }
            let json = context.to_json();
            let mut variables: Vec<String> = template.undeclared_variables(true).into_iter().collect();
            variables.sort();
            match variables.into_iter().find(|variable| is_undefined(&json, variable)) {
                Some(variable) => Error::UndefinedParameter { template: key.clone(), key: variable },
                None => Error::MinijinjaError(e),
            }
        })
    }
}

fn is_undefined(context: &serde_json::Value, variable: &str) -> bool {
    let mut parts = variable.split('.');
    let Some(root) = parts.next() else {
        return false;
    };
    if BUILTIN_NAMES.contains(&root) {
        return false;
    }
    let mut value = context.get(root);
    for part in parts {
        value = value.and_then(|v| v.get(part));
    }
    value.is_none()
}

/// Renders one template and writes it to `dest`, replacing any existing file.
/// Parent directories are created as needed.
pub fn render_one<P: AsRef<Path>>(
    renderer: &dyn TemplateRenderer,
    context: &RenderContext,
    group: &str,
    name: &str,
    dest: P,
) -> Result<()> {
    let dest = dest.as_ref();
    let content = renderer.render(group, name, context)?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    debug!("Writing file: {}", dest.display());
    std::fs::write(dest, content)?;
    Ok(())
}

/// Renders every template of `mapping` into `output_dir[/output_subdir]`.
///
/// Output names embedding `{name}` use the `name` parameter of `group`.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Written files, in mapping order
pub fn render_many<P: AsRef<Path>>(
    renderer: &dyn TemplateRenderer,
    context: &RenderContext,
    group: &str,
    mapping: &TemplateFileMapping,
    output_dir: P,
    output_subdir: &str,
) -> Result<Vec<PathBuf>> {
    let mut output_dir = output_dir.as_ref().to_path_buf();
    if !output_subdir.is_empty() {
        output_dir = output_dir.join(output_subdir);
    }
    std::fs::create_dir_all(&output_dir)?;

    let name = context.group(group).and_then(|params| params.text("name"));
    let mut written = Vec::with_capacity(mapping.len());
    for file in mapping {
        let dest = output_dir.join(file.output_name(name)?);
        render_one(renderer, context, group, file.template, &dest)?;
        written.push(dest);
    }
    Ok(written)
}
