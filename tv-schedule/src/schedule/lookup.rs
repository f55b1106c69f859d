use serde::Serialize;

use super::types::{ProgramSlotEntry, Schedule, TimeKey, Weekday, HOURS_PER_DAY};

/// The next occupied slot after a given moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextProgram<'a> {
    pub day: Weekday,
    pub time: TimeKey,
    pub entries: &'a [ProgramSlotEntry],
}

impl Schedule {
    /// Programs airing during `hour` on `day`
    pub fn now_playing(&self, day: Weekday, hour: u8) -> Option<&[ProgramSlotEntry]> {
        self.slot(day, TimeKey::from_hour(hour)?)
    }

    /// Finds the first occupied slot after `hour` on `day`, looking through the
    /// rest of that day and then the following six days from midnight.
    pub fn find_next(&self, day: Weekday, hour: u8) -> Option<NextProgram<'_>> {
        let later_today = (hour.saturating_add(1)..HOURS_PER_DAY)
            .filter_map(TimeKey::from_hour)
            .map(|time| (day, time));
        let following_days = (1..Weekday::ALL.len())
            .map(|offset| day.plus(offset))
            .flat_map(|next_day| TimeKey::all().map(move |time| (next_day, time)));

        later_today
            .chain(following_days)
            .find_map(|(day, time)| {
                self.slot(day, time).map(|entries| NextProgram { day, time, entries })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(program: &str) -> ProgramSlotEntry {
        ProgramSlotEntry {
            program_name: program.to_string(),
            channel: "A".to_string(),
            live_url: None,
            embed_url: None,
        }
    }

    fn at(hour: u8) -> TimeKey {
        TimeKey::from_hour(hour).unwrap()
    }

    #[test]
    fn test_now_playing() {
        let mut schedule = Schedule::new();
        schedule.insert(&[Weekday::Friday], at(20), &[entry("Movie")]);

        assert_eq!(schedule.now_playing(Weekday::Friday, 20).unwrap()[0].program_name, "Movie");
        assert!(schedule.now_playing(Weekday::Friday, 21).is_none());
        assert!(schedule.now_playing(Weekday::Friday, 30).is_none());
    }

    #[test]
    fn test_next_later_same_day() {
        let mut schedule = Schedule::new();
        schedule.insert(&[Weekday::Monday], at(8), &[entry("Early")]);
        schedule.insert(&[Weekday::Monday], at(22), &[entry("Late")]);

        let next = schedule.find_next(Weekday::Monday, 8).unwrap();
        assert_eq!((next.day, next.time), (Weekday::Monday, at(22)));
        assert_eq!(next.entries[0].program_name, "Late");
    }

    #[test]
    fn test_next_wraps_to_following_week() {
        let mut schedule = Schedule::new();
        schedule.insert(&[Weekday::Monday], at(6), &[entry("Breakfast")]);

        let next = schedule.find_next(Weekday::Saturday, 23).unwrap();
        assert_eq!((next.day, next.time), (Weekday::Monday, at(6)));
    }

    #[test]
    fn test_current_slot_is_not_next() {
        let mut schedule = Schedule::new();
        schedule.insert(&[Weekday::Tuesday], at(12), &[entry("Lunch")]);

        assert!(schedule.find_next(Weekday::Tuesday, 12).is_none());
    }

    #[test]
    fn test_empty_week_has_no_next() {
        assert!(Schedule::new().find_next(Weekday::Wednesday, 0).is_none());
    }
}
