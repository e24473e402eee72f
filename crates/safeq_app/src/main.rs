mod banner;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use safeq_engine::{ClientSettings, ExportClient, Runner};
use safeq_logging::FacadeSink;

use crate::config::{default_config_path, ConfigStore};

/// Export users from multiple servers.
#[derive(Parser)]
#[command(name = "safeq_exporter", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    banner::print_banner();
    let cli = Cli::parse();
    logging::initialize();

    let sink = FacadeSink::shared();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let records = match ConfigStore::new(sink.clone()).load(&config_path) {
        Ok(records) => records,
        Err(err) => {
            banner::wait_for_enter(&err.edit_prompt(&config_path));
            return Ok(ExitCode::FAILURE);
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let runner = Runner::new(sink.clone());
    runtime.block_on(runner.run(&records, |record| {
        ExportClient::new(&record.base_url, ClientSettings::default(), sink.clone())
    }));

    banner::countdown(banner::COUNTDOWN_SECS);
    Ok(ExitCode::SUCCESS)
}
