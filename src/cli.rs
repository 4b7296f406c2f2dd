use clap::Parser;
use galton_board::{BoardSettings, SettingsError};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "galton", about = "Buoyancy-biased Galton board animation")]
pub struct Args {
    /// JSON settings file; missing fields use the built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub particles: Option<usize>,

    /// Number of pin rows (binary choices per particle).
    #[arg(long)]
    pub rows: Option<usize>,

    /// Seed for reproducible paths.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Quit once the final hold is over.
    #[arg(long)]
    pub exit_when_done: bool,
}

impl Args {
    /// Settings file (or defaults) with command-line overrides applied.
    pub fn settings(&self) -> Result<BoardSettings, SettingsError> {
        let mut settings = match &self.config {
            Some(path) => BoardSettings::load(path)?,
            None => BoardSettings::default(),
        };

        if let Some(particles) = self.particles {
            settings.particle_count = particles;
        }
        if let Some(rows) = self.rows {
            settings.pin_rows = rows;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings.exit_when_done |= self.exit_when_done;

        Ok(settings)
    }
}
