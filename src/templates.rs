//! Template stores: where template sources come from.
//! Templates are addressed by group (artifact kind) and logical file name.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Extension of template files on disk.
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Trait for looking up template sources.
pub trait TemplateStore: Send + Sync {
    /// Returns the source of `group/name`, or `None` when the store has no such template.
    fn load(&self, group: &str, name: &str) -> Result<Option<String>>;
}

macro_rules! builtin {
    ($($group:literal => [$($name:literal),* $(,)?]),* $(,)?) => {
        &[$($(($group, $name, include_str!(concat!("../templates/", $group, "/", $name, ".j2"))),)*)*]
    };
}

/// `(group, name, source)` of every template shipped with riotgen.
static BUILTIN_TEMPLATES: &[(&str, &str, &str)] = builtin! {
    "application" => ["main.c", "Makefile", "README.md"],
    "board" => [
        "board.c",
        "doc.txt",
        "Makefile",
        "Makefile.dep",
        "Makefile.features",
        "Makefile.include",
        "board.h",
        "periph_conf.h",
    ],
    "driver" => [
        "driver.c",
        "Makefile",
        "Makefile.include",
        "Makefile.dep",
        "driver.h",
        "driver_constants.h",
        "driver_params.h",
        "driver_netdev.c",
        "driver_netdev.h",
        "Kconfig",
    ],
    "module" => ["module.c", "Makefile", "module.h"],
    "pkg" => ["doc.txt", "Makefile", "Makefile.dep", "Makefile.include", "pkg.mk"],
    "test" => ["main.c", "Makefile", "01-run.py"],
};

/// Templates compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Lists the `(group, name)` pairs available.
    pub fn names(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        BUILTIN_TEMPLATES.iter().map(|(group, name, _)| (*group, *name))
    }
}

impl TemplateStore for BuiltinTemplates {
    fn load(&self, group: &str, name: &str) -> Result<Option<String>> {
        Ok(BUILTIN_TEMPLATES
            .iter()
            .find(|(g, n, _)| *g == group && *n == name)
            .map(|(_, _, source)| (*source).to_string()))
    }
}

/// Templates read from `<root>/<group>/<name>.j2`, falling back to another
/// store for files the directory does not provide.
pub struct DirectoryTemplates {
    root: PathBuf,
    fallback: Option<Box<dyn TemplateStore>>,
}

impl DirectoryTemplates {
    /// Creates a directory store.
    ///
    /// # Errors
    /// * `Error::TemplateDirectoryNotFound` if `root` is not a directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::TemplateDirectoryNotFound { path: root.display().to_string() });
        }
        Ok(Self { root: root.to_path_buf(), fallback: None })
    }

    pub fn with_fallback(mut self, fallback: impl TemplateStore + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }
}

impl TemplateStore for DirectoryTemplates {
    fn load(&self, group: &str, name: &str) -> Result<Option<String>> {
        let path = self.root.join(group).join(format!("{name}{TEMPLATE_SUFFIX}"));
        if path.is_file() {
            debug!("Using template {}", path.display());
            return Ok(Some(std::fs::read_to_string(&path)?));
        }
        match &self.fallback {
            Some(fallback) => fallback.load(group, name),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_lookup() {
        let store = BuiltinTemplates::new();
        assert!(store.load("driver", "driver.c").unwrap().is_some());
        assert!(store.load("driver", "missing.c").unwrap().is_none());
        assert!(store.load("nope", "main.c").unwrap().is_none());
    }

    #[test]
    fn test_directory_override_and_fallback() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("module")).unwrap();
        std::fs::write(temp_dir.path().join("module").join("Makefile.j2"), "custom\n").unwrap();

        let store = DirectoryTemplates::new(temp_dir.path()).unwrap().with_fallback(BuiltinTemplates);
        assert_eq!(store.load("module", "Makefile").unwrap().as_deref(), Some("custom\n"));
        assert!(store.load("module", "module.c").unwrap().is_some());

        let store = DirectoryTemplates::new(temp_dir.path()).unwrap();
        assert!(store.load("module", "module.c").unwrap().is_none());
    }

    #[test]
    fn test_directory_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let result = DirectoryTemplates::new(temp_dir.path().join("missing"));
        assert!(matches!(result, Err(Error::TemplateDirectoryNotFound { .. })));
    }
}
