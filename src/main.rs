mod color;
mod config;
mod data;
mod error;
mod render;
mod report;

use std::path::Path;

use config::{ReportConfig, CONFIG_FILE};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ReportConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let written = report::run(&config)?;

    log::info!("Rendered {} charts", written.len());
    Ok(())
}
