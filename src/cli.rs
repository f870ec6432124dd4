// Command line interface module
// Lets the maps folder and settings file be chosen at launch

use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::ConfigError;

/// dungeon-explorer - Browse battle maps and show them to your players
#[derive(Parser, Debug)]
#[command(name = "dungeon-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file to use instead of the default one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maps folder (overrides the settings file)
    #[arg(short, long, value_name = "DIR")]
    pub maps_dir: Option<PathBuf>,
}

impl Args {
    /// Resolve the settings: file first, then command line overrides
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::load()?,
        };

        if let Some(dir) = &self.maps_dir {
            settings.maps_dir = dir.clone();
        }

        Ok(settings)
    }
}
