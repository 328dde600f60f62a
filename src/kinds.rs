//! Artifact kinds and their static description: parameters, template files
//! and output layout.

use std::fmt;

use crate::license::CommentStyle;
use crate::params::{ParamSpec, ParameterDescriptor, ParameterGroup};
use crate::renderer::TemplateFile;

/// Parent Doxygen groups a driver can belong to.
pub const DRIVER_PARENTS: &[&str] =
    &["actuators", "display", "can", "misc", "mtd", "netdev", "power", "sensors", "storage"];

const APPLICATION_LISTS: &[&str] = &["modules", "packages", "features_required"];

const APPLICATION_FILES: &[FileSet] = &[FileSet {
    files: &[
        TemplateFile::verbatim("main.c"),
        TemplateFile::verbatim("Makefile"),
        TemplateFile::verbatim("README.md"),
    ],
    ..FileSet::BASE
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Application,
    Board,
    Driver,
    Example,
    Module,
    Pkg,
    Test,
}

impl Kind {
    pub const ALL: [Kind; 7] =
        [Kind::Application, Kind::Board, Kind::Driver, Kind::Example, Kind::Module, Kind::Pkg, Kind::Test];

    pub fn spec(self) -> &'static KindSpec {
        match self {
            Kind::Application => &APPLICATION,
            Kind::Board => &BOARD,
            Kind::Driver => &DRIVER,
            Kind::Example => &EXAMPLE,
            Kind::Module => &MODULE,
            Kind::Pkg => &PKG,
            Kind::Test => &TEST,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Application => "application",
            Kind::Board => "board",
            Kind::Driver => "driver",
            Kind::Example => "example",
            Kind::Module => "module",
            Kind::Pkg => "pkg",
            Kind::Test => "test",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory the kind directory (`root/subdir`) is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRoot {
    /// The `--output-dir` argument, current directory by default.
    OutputDir,
    /// The RIOT base directory, which must be given.
    Riotbase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The artifact directory itself, `root/subdir/name`.
    OutputDir,
    /// A directory below the artifact directory.
    OutputSubdir(&'static str),
    /// A directory shared by every artifact of the kind, below `root/subdir`.
    KindSubdir(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// A text parameter equals the given value.
    Equals(&'static str, &'static str),
    /// A flag parameter is set.
    Enabled(&'static str),
}

impl Condition {
    pub fn holds(&self, group: &ParameterGroup) -> bool {
        match self {
            Condition::Always => true,
            Condition::Equals(param, value) => group.text(param) == Some(*value),
            Condition::Enabled(param) => group.get(param).and_then(|v| v.as_flag()).unwrap_or(false),
        }
    }
}

/// Templates rendered together into one directory.
#[derive(Debug)]
pub struct FileSet {
    pub files: &'static [TemplateFile],
    pub destination: Destination,
    pub condition: Condition,
    pub comment: CommentStyle,
    /// Mark the written files executable.
    pub executable: bool,
}

impl FileSet {
    /// Rendered unconditionally into the artifact directory with C comments.
    const BASE: FileSet = FileSet {
        files: &[],
        destination: Destination::OutputDir,
        condition: Condition::Always,
        comment: CommentStyle::Block,
        executable: false,
    };
}

/// Everything the generator needs to know about one artifact kind.
#[derive(Debug)]
pub struct KindSpec {
    pub kind: Kind,
    /// Used in the success message.
    pub label: &'static str,
    pub descriptor: &'static ParameterDescriptor,
    /// Template group in the template store.
    pub templates: &'static str,
    pub root: ProjectRoot,
    /// Values added to the group after resolution.
    pub extra: &'static [(&'static str, &'static str)],
    pub file_sets: &'static [FileSet],
    /// Print a `make -C` hint once generated.
    pub buildable: bool,
}

pub static APPLICATION: KindSpec = KindSpec {
    kind: Kind::Application,
    label: "Application",
    descriptor: &ParameterDescriptor {
        group: "application",
        subdir: "",
        params: &[
            ParamSpec::text("name", "Application name"),
            ParamSpec::text("brief", "Application brief description"),
            ParamSpec::text("board", "Target board").with_default("native"),
        ],
        lists: APPLICATION_LISTS,
    },
    templates: "application",
    root: ProjectRoot::OutputDir,
    extra: &[("type", "application")],
    file_sets: APPLICATION_FILES,
    buildable: true,
};

pub static EXAMPLE: KindSpec = KindSpec {
    kind: Kind::Example,
    label: "Example",
    descriptor: &ParameterDescriptor {
        group: "application",
        subdir: "examples",
        params: &[
            ParamSpec::text("name", "Example name"),
            ParamSpec::text("brief", "Example brief description"),
            ParamSpec::text("board", "Target board").with_default("native"),
        ],
        lists: APPLICATION_LISTS,
    },
    templates: "application",
    root: ProjectRoot::Riotbase,
    extra: &[("type", "example")],
    file_sets: APPLICATION_FILES,
    buildable: true,
};

pub static TEST: KindSpec = KindSpec {
    kind: Kind::Test,
    label: "Test",
    descriptor: &ParameterDescriptor {
        group: "test",
        subdir: "tests",
        params: &[
            ParamSpec::text("name", "Test name"),
            ParamSpec::text("brief", "Test brief description"),
            ParamSpec::text("board", "Target board").with_default("native"),
            ParamSpec::flag("use_testrunner", "Add testrunner script", false),
        ],
        lists: APPLICATION_LISTS,
    },
    templates: "test",
    root: ProjectRoot::Riotbase,
    extra: &[],
    file_sets: &[
        FileSet {
            files: &[TemplateFile::verbatim("main.c"), TemplateFile::verbatim("Makefile")],
            ..FileSet::BASE
        },
        FileSet {
            files: &[TemplateFile::verbatim("01-run.py")],
            destination: Destination::OutputSubdir("tests"),
            condition: Condition::Enabled("use_testrunner"),
            comment: CommentStyle::Hash,
            executable: true,
        },
    ],
    buildable: true,
};

pub static BOARD: KindSpec = KindSpec {
    kind: Kind::Board,
    label: "Support for board",
    descriptor: &ParameterDescriptor {
        group: "board",
        subdir: "boards",
        params: &[
            ParamSpec::text("name", "Board name"),
            ParamSpec::text("displayed_name", "Board displayed name (for doxygen documentation)")
                .title_of("name"),
            ParamSpec::text("cpu", "CPU name"),
            ParamSpec::text("cpu_model", "CPU model name"),
        ],
        lists: &["features_provided"],
    },
    templates: "board",
    root: ProjectRoot::Riotbase,
    extra: &[],
    file_sets: &[
        FileSet {
            files: &[
                TemplateFile::verbatim("board.c"),
                TemplateFile::verbatim("doc.txt"),
                TemplateFile::verbatim("Makefile"),
                TemplateFile::verbatim("Makefile.dep"),
                TemplateFile::verbatim("Makefile.features"),
                TemplateFile::verbatim("Makefile.include"),
            ],
            ..FileSet::BASE
        },
        FileSet {
            files: &[TemplateFile::verbatim("board.h"), TemplateFile::verbatim("periph_conf.h")],
            destination: Destination::OutputSubdir("include"),
            ..FileSet::BASE
        },
    ],
    buildable: false,
};

pub static DRIVER: KindSpec = KindSpec {
    kind: Kind::Driver,
    label: "Driver",
    descriptor: &ParameterDescriptor {
        group: "driver",
        subdir: "drivers",
        params: &[
            ParamSpec::text("name", "Driver name"),
            ParamSpec::text("displayed_name", "Driver Doxygen group name").title_of("name"),
            ParamSpec::text("brief", "Brief doxygen description"),
            ParamSpec::text("ingroup", "Parent driver Doxygen group").with_choices(DRIVER_PARENTS),
        ],
        lists: APPLICATION_LISTS,
    },
    templates: "driver",
    root: ProjectRoot::Riotbase,
    extra: &[],
    file_sets: &[
        FileSet {
            files: &[
                TemplateFile::renamed("driver.c", "{name}.c"),
                TemplateFile::verbatim("Makefile"),
                TemplateFile::verbatim("Makefile.include"),
                TemplateFile::verbatim("Makefile.dep"),
            ],
            ..FileSet::BASE
        },
        FileSet {
            files: &[TemplateFile::renamed("driver.h", "{name}.h")],
            destination: Destination::KindSubdir("include"),
            ..FileSet::BASE
        },
        FileSet {
            files: &[
                TemplateFile::renamed("driver_constants.h", "{name}_constants.h"),
                TemplateFile::renamed("driver_params.h", "{name}_params.h"),
            ],
            destination: Destination::OutputSubdir("include"),
            ..FileSet::BASE
        },
        FileSet {
            files: &[TemplateFile::renamed("driver_netdev.c", "{name}_netdev.c")],
            condition: Condition::Equals("ingroup", "netdev"),
            ..FileSet::BASE
        },
        FileSet {
            files: &[TemplateFile::renamed("driver_netdev.h", "{name}_netdev.h")],
            destination: Destination::OutputSubdir("include"),
            condition: Condition::Equals("ingroup", "netdev"),
            ..FileSet::BASE
        },
        FileSet { files: &[TemplateFile::verbatim("Kconfig")], comment: CommentStyle::Hash, ..FileSet::BASE },
    ],
    buildable: false,
};

pub static MODULE: KindSpec = KindSpec {
    kind: Kind::Module,
    label: "Module",
    descriptor: &ParameterDescriptor {
        group: "module",
        subdir: "sys",
        params: &[
            ParamSpec::text("name", "Module name"),
            ParamSpec::text("displayed_name", "Module Doxygen name").title_of("name"),
            ParamSpec::text("brief", "Brief doxygen description"),
        ],
        lists: &[],
    },
    templates: "module",
    root: ProjectRoot::Riotbase,
    extra: &[],
    file_sets: &[
        FileSet {
            files: &[TemplateFile::renamed("module.c", "{name}.c"), TemplateFile::verbatim("Makefile")],
            ..FileSet::BASE
        },
        FileSet {
            files: &[TemplateFile::renamed("module.h", "{name}.h")],
            destination: Destination::KindSubdir("include"),
            ..FileSet::BASE
        },
    ],
    buildable: false,
};

pub static PKG: KindSpec = KindSpec {
    kind: Kind::Pkg,
    label: "Package",
    descriptor: &ParameterDescriptor {
        group: "pkg",
        subdir: "pkg",
        params: &[
            ParamSpec::text("name", "Package name"),
            ParamSpec::text("displayed_name", "Package displayed name (for doxygen documentation)")
                .title_of("name"),
            ParamSpec::text("url", "Package source url"),
            ParamSpec::text("hash", "Package version hash"),
            ParamSpec::text("license", "Package license"),
            ParamSpec::text("description", "Package short description"),
        ],
        lists: APPLICATION_LISTS,
    },
    templates: "pkg",
    root: ProjectRoot::Riotbase,
    extra: &[],
    file_sets: &[FileSet {
        files: &[
            TemplateFile::verbatim("doc.txt"),
            TemplateFile::verbatim("Makefile"),
            TemplateFile::verbatim("Makefile.dep"),
            TemplateFile::verbatim("Makefile.include"),
            TemplateFile::renamed("pkg.mk", "{name}.mk"),
        ],
        ..FileSet::BASE
    }],
    buildable: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{BuiltinTemplates, TemplateStore};

    #[test]
    fn test_every_template_is_shipped() {
        let store = BuiltinTemplates::new();
        for kind in Kind::ALL {
            let spec = kind.spec();
            assert_eq!(spec.kind, kind);
            for set in spec.file_sets {
                for file in set.files {
                    assert!(
                        store.load(spec.templates, file.template).unwrap().is_some(),
                        "{}/{} missing",
                        spec.templates,
                        file.template
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_descriptor_has_a_name() {
        for kind in Kind::ALL {
            assert_eq!(kind.spec().descriptor.params[0].name, "name", "{kind}");
        }
    }

    #[test]
    fn test_conditions() {
        let group: ParameterGroup =
            [("ingroup", crate::params::ParamValue::from("netdev")), ("run", true.into())].into_iter().collect();
        assert!(Condition::Always.holds(&group));
        assert!(Condition::Equals("ingroup", "netdev").holds(&group));
        assert!(!Condition::Equals("ingroup", "sensors").holds(&group));
        assert!(Condition::Enabled("run").holds(&group));
        assert!(!Condition::Enabled("missing").holds(&group));
    }
}
