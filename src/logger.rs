//! Logging setup for the command line.

/// Initializes logging on stderr: debug output when `verbose`, warnings otherwise.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}
