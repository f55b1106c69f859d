use csv::StringRecord;
use tracing::info;

use crate::channels::ChannelTable;
use super::normalize::{normalize_row, Diagnostic, RawRow};
use super::types::Schedule;

/// A finished schedule plus everything that was skipped on the way
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuild {
    pub schedule: Schedule,
    pub diagnostics: Vec<Diagnostic>,
    pub rows_read: usize,
    pub rows_scheduled: usize,
}

impl ScheduleBuild {
    /// Diagnostics worth surfacing as warnings
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_silent())
    }
}

/// Folds raw schedule records, in order, into a weekly schedule.
///
/// Records are the data rows of the raw table (header already skipped).
pub fn build_schedule(channels: &ChannelTable, records: &[StringRecord]) -> ScheduleBuild {
    let mut build = ScheduleBuild::default();

    for (index, record) in records.iter().enumerate() {
        // Line 1 is the header
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 2);
        build.rows_read += 1;

        let row = match RawRow::from_record(record, line) {
            Ok(row) => row,
            Err(diagnostic) => {
                diagnostic.log();
                build.diagnostics.push(diagnostic);
                continue;
            }
        };

        if let Some(normalized) = normalize_row(&row, channels, &mut build.diagnostics) {
            build
                .schedule
                .insert(normalized.days, normalized.time_key, &normalized.entries);
            build.rows_scheduled += 1;
        }
    }

    info!(
        "Scheduled {} of {} rows into {} slots ({} warnings)",
        build.rows_scheduled,
        build.rows_read,
        build.schedule.occupied_slots(),
        build.warnings().count()
    );

    build
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::ChannelEntry;
    use crate::schedule::{TimeKey, Weekday};

    fn table() -> ChannelTable {
        vec![
            ChannelEntry::from_fields("A", "https://www.youtube.com/live/aaa", None).unwrap(),
            ChannelEntry::from_fields("B", "https://example.tv/b", None).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_empty_input_gives_empty_grid() {
        let build = build_schedule(&table(), &[]);
        assert_eq!(build.schedule, Schedule::new());
        assert_eq!(build.rows_read, 0);
    }

    #[test]
    fn test_weekday_and_daily_rows_collide_on_monday() {
        let build = build_schedule(
            &table(),
            &[
                record(&["09:00", "平日", "Morning Show", "A"]),
                record(&["09:30", "每天", "Cartoons", "B"]),
            ],
        );

        let nine = TimeKey::from_hour(9).unwrap();
        let monday: Vec<&str> = build
            .schedule
            .slot(Weekday::Monday, nine)
            .unwrap()
            .iter()
            .map(|e| e.program_name.as_str())
            .collect();
        assert_eq!(monday, vec!["Morning Show", "Cartoons"]);

        let sunday = build.schedule.slot(Weekday::Sunday, nine).unwrap();
        assert_eq!(sunday.len(), 1);
        assert_eq!(sunday[0].program_name, "Cartoons");
        assert_eq!(build.rows_scheduled, 2);
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let build = build_schedule(
            &table(),
            &[
                record(&["N/A", "每天", "Mystery", "A"]),
                record(&["10:00", "每天"]),
                record(&["11:00", "週六", "Quiz", "A"]),
            ],
        );

        assert_eq!(build.rows_read, 3);
        assert_eq!(build.rows_scheduled, 1);
        assert_eq!(build.warnings().count(), 2);
        assert_eq!(build.schedule.occupied_slots(), 1);
        assert!(build
            .schedule
            .slot(Weekday::Saturday, TimeKey::from_hour(11).unwrap())
            .is_some());
    }

    #[test]
    fn test_line_numbers_count_header() {
        let build = build_schedule(&table(), &[record(&["x", "每天", "P", "A"])]);
        assert!(matches!(build.diagnostics[0], Diagnostic::MalformedTime { line: 2, .. }));
    }
}
