//! riotgen's command line entry point.

use riotgen::{
    cli::get_args,
    error::default_error_handler,
    generator::Outcome,
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match riotgen::run(args) {
        Ok(Outcome::Generated(generated)) => println!("{}", generated.summary()),
        Ok(Outcome::Aborted) => {
            eprintln!("Aborted!");
            std::process::exit(1);
        }
        Err(err) => default_error_handler(err),
    }
}
