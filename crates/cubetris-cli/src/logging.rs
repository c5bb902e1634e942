use std::{fs::File, path::PathBuf};

use anyhow::Context as _;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Debug, Clone, clap::Args)]
pub struct LogArg {
    /// Write log messages to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[clap(long, global = true, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

/// Installs the file logger.
///
/// The terminal belongs to the UI, so nothing is logged unless `--log-file`
/// is given.
pub fn init(arg: &LogArg) -> anyhow::Result<()> {
    let Some(path) = &arg.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(arg.log_level, config, file).context("Failed to install logger")?;
    log::info!("logging to {} at {}", path.display(), arg.log_level);
    Ok(())
}
