use super::types::{ProgramSlotEntry, Schedule, TimeKey, Weekday};

impl Schedule {
    /// Adds `entries` to the slot at `time` on each of `days`.
    ///
    /// An empty slot takes the entries as its list; an occupied slot has them
    /// appended, so colliding programs accumulate in processing order.
    pub fn insert(&mut self, days: &[Weekday], time: TimeKey, entries: &[ProgramSlotEntry]) {
        if entries.is_empty() {
            return;
        }

        for day in days {
            self.days[day.index()][time.hour() as usize]
                .get_or_insert_with(Vec::new)
                .extend_from_slice(entries);
        }
    }
}
