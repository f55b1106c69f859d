use std::fmt;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::channels::ChannelTable;
use super::day_category::DayCategory;
use super::slot_utils::{parse_time_key, split_channels};
use super::types::{ProgramSlotEntry, TimeKey, Weekday};

/// Columns of a raw schedule row, in file order
pub const RAW_ROW_FIELDS: usize = 4;

/// One record of the raw schedule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Line in the source file, for diagnostics
    pub line: u64,
    pub start_time: String,
    pub day_category: String,
    pub program_name: String,
    pub channels: String,
}

impl RawRow {
    /// Takes the first four fields of a record; shorter records are rejected
    pub fn from_record(record: &StringRecord, line: u64) -> Result<Self, Diagnostic> {
        if record.len() < RAW_ROW_FIELDS {
            return Err(Diagnostic::MalformedRow {
                line,
                fields: record.len(),
            });
        }

        Ok(RawRow {
            line,
            start_time: record[0].to_string(),
            day_category: record[1].to_string(),
            program_name: record[2].to_string(),
            channels: record[3].to_string(),
        })
    }
}

/// A row reduced to where it airs and what it contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub time_key: TimeKey,
    pub days: &'static [Weekday],
    /// Never empty
    pub entries: Vec<ProgramSlotEntry>,
}

/// Something wrong with one row or one channel; never aborts a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MalformedRow {
        line: u64,
        fields: usize,
    },
    MalformedTime {
        line: u64,
        start_time: String,
        program_name: String,
    },
    UnknownChannel {
        line: u64,
        channel: String,
        program_name: String,
    },
    UnrecognizedDayCategory {
        line: u64,
        label: String,
        program_name: String,
    },
}

impl Diagnostic {
    /// Unrecognized day labels are only reported at debug level
    pub fn is_silent(&self) -> bool {
        matches!(self, Diagnostic::UnrecognizedDayCategory { .. })
    }

    pub fn log(&self) {
        if self.is_silent() {
            debug!("{}", self);
        } else {
            warn!("{}", self);
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRow { line, fields } => write!(
                f,
                "line {}: skipping row with {} of {} columns",
                line, fields, RAW_ROW_FIELDS
            ),
            Diagnostic::MalformedTime { line, start_time, program_name } => write!(
                f,
                "line {}: skipping '{}' due to invalid time format '{}'",
                line, program_name, start_time
            ),
            Diagnostic::UnknownChannel { line, channel, program_name } => write!(
                f,
                "line {}: no URL for channel '{}' (program '{}')",
                line, channel, program_name
            ),
            Diagnostic::UnrecognizedDayCategory { line, label, program_name } => write!(
                f,
                "line {}: day category '{}' matches no days (program '{}')",
                line, label, program_name
            ),
        }
    }
}

/// Parses one raw row against the channel table.
///
/// Returns `None` when the row contributes nothing: its time is malformed,
/// none of its channels resolve, or its day category matches no days.
pub fn normalize_row(
    row: &RawRow,
    channels: &ChannelTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<NormalizedRow> {
    let program_name = row.program_name.trim();

    let Some(time_key) = parse_time_key(&row.start_time) else {
        push(diagnostics, Diagnostic::MalformedTime {
            line: row.line,
            start_time: row.start_time.clone(),
            program_name: program_name.to_string(),
        });
        return None;
    };

    let mut entries = Vec::new();
    for channel in split_channels(&row.channels) {
        match channels.resolve(&channel) {
            Some(info) => entries.push(ProgramSlotEntry {
                program_name: program_name.to_string(),
                channel,
                live_url: info.live_url.clone(),
                embed_url: info.embed_url.clone(),
            }),
            None => push(diagnostics, Diagnostic::UnknownChannel {
                line: row.line,
                channel,
                program_name: program_name.to_string(),
            }),
        }
    }

    if entries.is_empty() {
        return None;
    }

    let category = DayCategory::parse(&row.day_category);
    if let DayCategory::Unrecognized(label) = &category {
        push(diagnostics, Diagnostic::UnrecognizedDayCategory {
            line: row.line,
            label: label.clone(),
            program_name: program_name.to_string(),
        });
        return None;
    }

    Some(NormalizedRow {
        time_key,
        days: category.days(),
        entries,
    })
}

fn push(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    diagnostic.log();
    diagnostics.push(diagnostic);
}
