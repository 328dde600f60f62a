//! Command-line interface implementation for riotgen.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::generator::GenerateRequest;
use crate::kinds::Kind;

/// Command-line arguments structure for riotgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "riotgen: generate RIOT applications, boards, drivers and more", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bootstrap a RIOT application
    Application {
        #[command(flatten)]
        shared: SharedArgs,

        /// Directory where the application directory is created
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Bootstrap a RIOT board support
    Board(SharedArgs),
    /// Bootstrap a RIOT driver module
    Driver(SharedArgs),
    /// Bootstrap a RIOT example application
    Example(SharedArgs),
    /// Bootstrap a RIOT system module
    Module(SharedArgs),
    /// Bootstrap a RIOT external package
    Pkg(SharedArgs),
    /// Bootstrap a RIOT test application
    Test(SharedArgs),
}

/// Options accepted by every subcommand.
#[derive(ClapArgs, Debug, Clone)]
pub struct SharedArgs {
    /// Use interactive mode
    #[arg(short, long)]
    pub interactive: bool,

    /// Use configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base directory of the RIOT repository
    #[arg(short, long, value_name = "DIR", env = "RIOTBASE")]
    pub riotbase: Option<PathBuf>,

    /// Overwrite an existing output directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Directory overriding the built-in templates (<DIR>/<kind>/<file>.j2)
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl Command {
    pub fn kind(&self) -> Kind {
        match self {
            Command::Application { .. } => Kind::Application,
            Command::Board(_) => Kind::Board,
            Command::Driver(_) => Kind::Driver,
            Command::Example(_) => Kind::Example,
            Command::Module(_) => Kind::Module,
            Command::Pkg(_) => Kind::Pkg,
            Command::Test(_) => Kind::Test,
        }
    }

    pub fn shared(&self) -> &SharedArgs {
        match self {
            Command::Application { shared, .. } => shared,
            Command::Board(shared)
            | Command::Driver(shared)
            | Command::Example(shared)
            | Command::Module(shared)
            | Command::Pkg(shared)
            | Command::Test(shared) => shared,
        }
    }

    /// Builds the generator request described by the command line.
    pub fn request(&self) -> GenerateRequest {
        let shared = self.shared();
        let mut request = GenerateRequest::new(self.kind())
            .interactive(shared.interactive)
            .force(shared.force);
        request.config = shared.config.clone();
        request.riotbase = shared.riotbase.clone();
        if let Command::Application { output_dir, .. } = self {
            request.output_dir = output_dir.clone();
        }
        request
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1, after printing the help, if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let mut command = Args::command().help_template(
                    r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                );
                if let Err(err) = command.print_help() {
                    eprintln!("{err}");
                }
                std::process::exit(1);
            }
            _ => e.exit(),
        },
    }
}
