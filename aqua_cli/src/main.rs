mod chart;
mod menu;

use aqua_core::*;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::menu::{ChartMode, Settings};

#[derive(Parser)]
#[command(name = "aquatrack")]
#[command(about = "Personal water usage tracker", long_about = None)]
struct Cli {
    /// Override data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable spoken announcements
    #[arg(long)]
    mute: bool,
}

fn main() -> Result<()> {
    aqua_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_file = match &cli.data_dir {
        Some(dir) => dir.join(&config.data.file_name),
        None => config.data_file(),
    };

    let log = UsageLog::load(&data_file)?;
    tracing::info!("Loaded {} records from {:?}", log.len(), data_file);

    // The full-screen chart needs a real terminal on both ends
    let chart = if io::stdin().is_terminal() && io::stdout().is_terminal() {
        ChartMode::Interactive(config.chart.clone())
    } else {
        ChartMode::Text
    };
    let settings = Settings { data_file, chart };

    let input = io::stdin().lock();
    let output = io::stdout();

    if cli.mute || !config.voice.enabled {
        menu::run(log, settings, input, output, SilentAnnouncer)?;
    } else {
        let announcer = SpeechAnnouncer::new(config.voice.program.clone(), config.voice.rate);
        menu::run(log, settings, input, output, announcer)?;
    }

    Ok(())
}
