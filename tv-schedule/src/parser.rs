use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::channels::{ChannelEntry, ChannelTable};
use crate::{Result, ScheduleError};

/// Both tables start with a header row and may have ragged rows
fn csv_reader<R: Read>(input: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| ScheduleError::InputMissing {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the channel reference table: channel name, live URL, optional embed URL
pub fn load_channel_table<P: AsRef<Path>>(csv_path: P) -> Result<ChannelTable> {
    let path = csv_path.as_ref();
    let file = open_input(path)?;
    let table = read_channel_table(file).map_err(|source| ScheduleError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded {} channels from {}", table.len(), path.display());
    Ok(table)
}

/// Reads a channel table from any CSV source
pub fn read_channel_table<R: Read>(input: R) -> csv::Result<ChannelTable> {
    let mut reader = csv_reader(input);
    let mut table = ChannelTable::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        if record.len() < 2 {
            warn!("Channel table line {}: expected at least 2 columns, skipping", line);
            continue;
        }

        match ChannelEntry::from_fields(&record[0], &record[1], record.get(2)) {
            Some(entry) => table.insert(entry),
            None => warn!("Channel table line {}: blank channel name, skipping", line),
        }
    }

    Ok(table)
}

/// Loads the data rows of the raw schedule table
pub fn load_schedule_records<P: AsRef<Path>>(csv_path: P) -> Result<Vec<StringRecord>> {
    let path = csv_path.as_ref();
    let file = open_input(path)?;
    let records = read_schedule_records(file).map_err(|source| ScheduleError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded {} schedule rows from {}", records.len(), path.display());
    Ok(records)
}

/// Reads raw schedule rows from any CSV source
pub fn read_schedule_records<R: Read>(input: R) -> csv::Result<Vec<StringRecord>> {
    csv_reader(input).records().collect()
}
