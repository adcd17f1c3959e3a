use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

mod app;
mod config;
mod library;
mod logging;
mod page;
mod sound;
mod utils;

use crate::{app::App, config::Config};

/// Transcribe a sequence of files, one keystroke at a time
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding `settings.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the manifest and the exercise files
    #[arg(short, long)]
    exercises: Option<PathBuf>,

    /// File name of the manifest inside the exercises directory
    #[arg(short, long)]
    manifest: Option<String>,

    /// File to write the log to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Don't ring the bell when an exercise is completed
    #[arg(long)]
    mute: bool,
}

impl Args {
    /// Flags take precedence over the settings file
    fn apply(self, config: &mut Config) {
        let settings = &mut config.settings;

        if let Some(exercises) = self.exercises {
            settings.exercises_dir = Some(exercises);
        }
        if let Some(manifest) = self.manifest {
            settings.manifest = manifest;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = Some(log_file);
        }
        if self.mute {
            settings.sound = false;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = Args::parse();
    let mut config = Config::get(args.config.take())?;
    args.apply(&mut config);

    let _guard = logging::init(&config.log_file())?;

    let page: page::Page = match page::Exercise::open(&config) {
        Ok(page) => {
            info!(dir = %config.exercises_dir().display(), "exercises opened");
            page.into()
        }
        Err(err) => {
            error!(%err, "failed to open exercises");
            page::Error::from(err).into()
        }
    };

    App::new(config, page).run()?;

    Ok(())
}
