pub mod config;
pub mod detect;
pub mod navigator;
pub mod overlay;
pub mod replay;
pub mod session;

use tracing_subscriber::filter::LevelFilter;

/// Installs the process-wide subscriber. `log` records are bridged into it.
pub fn log_init(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}
