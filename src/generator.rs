//! Artifact generation.
//!
//! One data-driven generator serves every [`Kind`]: it resolves the
//! parameters, computes the output directory, asks before overwriting it and
//! renders the kind's file sets.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::identity::IdentityProvider;
use crate::kinds::{Destination, Kind, KindSpec, ProjectRoot};
use crate::license::{license_header, CommentStyle};
use crate::params::{RenderContext, GLOBAL_GROUP};
use crate::prompt::Prompter;
use crate::renderer::{render_many, TemplateRenderer};
use crate::resolver::Resolver;

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub kind: Kind,
    pub interactive: bool,
    pub config: Option<PathBuf>,
    pub riotbase: Option<PathBuf>,
    /// Root of the `application` kind, current directory when `None`.
    pub output_dir: Option<PathBuf>,
    /// Overwrite an existing output directory without asking.
    pub force: bool,
}

impl GenerateRequest {
    pub fn new(kind: Kind) -> Self {
        Self { kind, interactive: false, config: None, riotbase: None, output_dir: None, force: false }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn config<P: Into<PathBuf>>(mut self, config: P) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn riotbase<P: Into<PathBuf>>(mut self, riotbase: P) -> Self {
        self.riotbase = Some(riotbase.into());
        self
    }

    pub fn output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// A successfully generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub kind: Kind,
    pub name: String,
    pub output_dir: PathBuf,
    /// Every written file, in render order.
    pub files: Vec<PathBuf>,
}

impl Generated {
    /// The user facing report of the run.
    pub fn summary(&self) -> String {
        let spec = self.kind.spec();
        let mut summary =
            format!("{} '{}' generated in {} with success!", spec.label, self.name, self.output_dir.display());
        if spec.buildable {
            summary.push_str(&format!(
                "\nTo build it, run:\n\n    make -C {}\n",
                self.output_dir.display()
            ));
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(Generated),
    /// The user declined to overwrite the output directory.
    Aborted,
}

pub struct Generator<'a> {
    prompter: &'a dyn Prompter,
    identity: &'a dyn IdentityProvider,
    renderer: &'a dyn TemplateRenderer,
    year: Option<i32>,
}

impl<'a> Generator<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        identity: &'a dyn IdentityProvider,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { prompter, identity, renderer, year: None }
    }

    /// Pins `global.year` when the configuration does not set it.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Generates one artifact.
    ///
    /// Nothing is written before the overwrite confirmation. A failure while
    /// rendering may leave the files written so far in place.
    ///
    /// # Errors
    /// * `Error::MissingInput` when neither interactive mode nor a config is requested
    /// * `Error::MissingParameter` when the RIOT base directory is needed but absent,
    ///   or a parameter cannot be resolved
    /// * `Error::InvalidParameter` when the project root is not an existing directory
    /// * Any resolution or rendering error
    pub fn generate(&self, request: &GenerateRequest) -> Result<Outcome> {
        let spec = request.kind.spec();
        if !request.interactive && request.config.is_none() {
            return Err(Error::MissingInput);
        }

        let root = project_root(spec, request)?;

        let mut resolver = Resolver::new(self.prompter, self.identity);
        if let Some(year) = self.year {
            resolver = resolver.with_year(year);
        }
        let mut context = resolver.resolve(
            spec.descriptor,
            request.interactive,
            request.config.as_deref(),
            request.riotbase.as_deref(),
        )?;

        let group = spec.descriptor.group;
        let params = context.group_mut(group);
        for (key, value) in spec.extra {
            params.insert(*key, *value);
        }
        let name = params.text("name").unwrap_or_default().to_string();

        let kind_dir = kind_dir(&root, spec);
        let output_dir = kind_dir.join(&name);
        debug!("Output directory: {}", output_dir.display());

        if output_dir.exists() {
            let prompt = format!("Output directory {} already exists, overwrite?", output_dir.display());
            if !self.prompter.confirm(request.force, prompt)? {
                debug!("Not overwriting {}", output_dir.display());
                return Ok(Outcome::Aborted);
            }
        }

        let license = context
            .group(GLOBAL_GROUP)
            .and_then(|global| global.text("license"))
            .unwrap_or_default()
            .to_string();

        let mut files = Vec::new();
        for set in spec.file_sets {
            let holds = context.group(group).is_some_and(|params| set.condition.holds(params));
            if !holds {
                debug!("Skipping {:?}", set.condition);
                continue;
            }
            inject_license(&mut context, &license, set.comment)?;

            let target = match set.destination {
                Destination::OutputDir => output_dir.clone(),
                Destination::OutputSubdir(subdir) => output_dir.join(subdir),
                Destination::KindSubdir(subdir) => kind_dir.join(subdir),
            };
            let written = render_many(self.renderer, &context, spec.templates, set.files, &target, "")?;
            if set.executable {
                for file in &written {
                    make_executable(file)?;
                }
            }
            files.extend(written);
        }

        Ok(Outcome::Generated(Generated { kind: request.kind, name, output_dir, files }))
    }
}

/// The directory the kind is generated under. It must already exist.
fn project_root(spec: &KindSpec, request: &GenerateRequest) -> Result<PathBuf> {
    let (field, root) = match spec.root {
        ProjectRoot::OutputDir => {
            ("output_directory", request.output_dir.clone().unwrap_or_else(|| PathBuf::from(".")))
        }
        ProjectRoot::Riotbase => match &request.riotbase {
            Some(riotbase) if !riotbase.as_os_str().is_empty() => ("riotbase_directory", riotbase.clone()),
            _ => return Err(Error::missing_parameter("riotbase_directory")),
        },
    };
    if !root.is_dir() {
        return Err(Error::invalid_parameter(field, root.display().to_string(), "no such directory"));
    }
    Ok(root)
}

fn kind_dir(root: &Path, spec: &KindSpec) -> PathBuf {
    match spec.descriptor.subdir {
        "" => root.to_path_buf(),
        subdir => root.join(subdir),
    }
}

/// Sets `global.license_header` for files using the given comment syntax.
fn inject_license(context: &mut RenderContext, license: &str, style: CommentStyle) -> Result<()> {
    let header = license_header(license, style)?;
    context.group_mut(GLOBAL_GROUP).insert("license_header", header);
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root() {
        let request = GenerateRequest::new(Kind::Application);
        assert_eq!(project_root(Kind::Application.spec(), &request).unwrap(), PathBuf::from("."));

        let request = GenerateRequest::new(Kind::Driver);
        let err = project_root(Kind::Driver.spec(), &request).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: riotbase directory.");

        let temp_dir = tempfile::TempDir::new().unwrap();
        let request = GenerateRequest::new(Kind::Driver).riotbase(temp_dir.path());
        assert_eq!(project_root(Kind::Driver.spec(), &request).unwrap(), temp_dir.path());
    }

    #[test]
    fn test_project_root_must_exist() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("typo");

        let request = GenerateRequest::new(Kind::Driver).riotbase(&missing);
        let err = project_root(Kind::Driver.spec(), &request).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "riotbase directory"));

        let request = GenerateRequest::new(Kind::Application).output_dir(&missing);
        let err = project_root(Kind::Application.spec(), &request).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid value '{}' for output directory: no such directory.", missing.display())
        );
        assert!(!missing.exists());
    }

    #[test]
    fn test_kind_dir() {
        assert_eq!(kind_dir(Path::new("RIOT"), Kind::Board.spec()), PathBuf::from("RIOT/boards"));
        assert_eq!(kind_dir(Path::new("apps"), Kind::Application.spec()), PathBuf::from("apps"));
    }

    #[test]
    fn test_summary() {
        let generated = Generated {
            kind: Kind::Test,
            name: "foo".to_string(),
            output_dir: PathBuf::from("RIOT/tests/foo"),
            files: vec![],
        };
        assert_eq!(
            generated.summary(),
            "Test 'foo' generated in RIOT/tests/foo with success!\nTo build it, run:\n\n    make -C RIOT/tests/foo\n"
        );

        let generated = Generated { kind: Kind::Module, ..generated };
        assert_eq!(generated.summary(), "Module 'foo' generated in RIOT/tests/foo with success!");
    }
}
