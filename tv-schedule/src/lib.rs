//! tv-schedule - builds a weekly TV schedule with playable URLs from CSV tables

pub mod channels;
pub mod config;
pub mod display;
pub mod embed;
pub mod parser;
pub mod schedule;
pub mod web;

use std::path::PathBuf;

use tracing::info;

pub use channels::{ChannelEntry, ChannelTable};
pub use config::Config;
pub use embed::derive_embed_url;
pub use schedule::{build_schedule, Diagnostic, Schedule, ScheduleBuild};

/// Result type for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Fatal errors; anything recoverable is reported as a [`Diagnostic`] instead
#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("input file not found: {}", .path.display())]
    InputMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not write output {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

/// Loads both input tables and folds the raw schedule into a week.
///
/// Fails before any row is processed if either table is missing.
pub fn load_and_build(config: &Config) -> Result<(ChannelTable, ScheduleBuild)> {
    let channels = parser::load_channel_table(&config.input.channels)?;
    let records = parser::load_schedule_records(&config.input.schedule)?;
    let build = build_schedule(&channels, &records);
    Ok((channels, build))
}

/// Builds the schedule and writes it to the configured output file
pub fn run(config: &Config) -> Result<ScheduleBuild> {
    let (_, build) = load_and_build(config)?;
    display::write_schedule_to_file(&build.schedule, &config.output.path)?;
    info!("Wrote schedule to {}", config.output.path.display());
    Ok(build)
}
