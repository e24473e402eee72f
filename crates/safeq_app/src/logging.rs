//! Terminal logging for the exporter binary.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Installs the terminal logger at Info. Later calls are no-ops.
pub fn initialize() {
    let _ = TermLogger::init(
        LevelFilter::Info,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
