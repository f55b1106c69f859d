use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: u8 = 24;

/// Day keys of the weekly schedule, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The day `offset` days later, wrapping around the week
    pub fn plus(self, offset: usize) -> Weekday {
        Weekday::ALL[(self.index() + offset) % Weekday::ALL.len()]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Weekday::ALL
            .iter()
            .copied()
            .find(|day| day.name() == lower)
            .ok_or_else(|| format!("unknown weekday: {}", s))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// One of the 24 hourly slot keys, "00:00" through "23:00"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeKey(u8);

impl TimeKey {
    pub fn from_hour(hour: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY {
            Some(TimeKey(hour))
        } else {
            None
        }
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// All 24 keys in order
    pub fn all() -> impl Iterator<Item = TimeKey> {
        (0..HOURS_PER_DAY).map(TimeKey)
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl Serialize for TimeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A program airing on one channel, with that channel's URLs copied in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSlotEntry {
    pub program_name: String,
    pub channel: String,
    pub live_url: Option<String>,
    pub embed_url: Option<String>,
}

/// Programs in one slot; `None` when nothing airs, otherwise never empty
pub type Slot = Option<Vec<ProgramSlotEntry>>;

/// Week of 7 days x 24 hourly slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub(super) days: [[Slot; HOURS_PER_DAY as usize]; 7],
}

impl Schedule {
    /// All 168 slots empty
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, day: Weekday, time: TimeKey) -> Option<&[ProgramSlotEntry]> {
        self.days[day.index()][time.hour() as usize].as_deref()
    }

    /// Borrowed view of one day, serializable as its 24-key object
    pub fn day(&self, day: Weekday) -> DayView<'_> {
        DayView {
            slots: &self.days[day.index()],
        }
    }

    /// Number of occupied slots across the week
    pub fn occupied_slots(&self) -> usize {
        self.days
            .iter()
            .flat_map(|day| day.iter())
            .filter(|slot| slot.is_some())
            .count()
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Weekday::ALL.len()))?;
        for day in Weekday::ALL {
            map.serialize_entry(day.name(), &self.day(day))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DayView<'a> {
    slots: &'a [Slot; HOURS_PER_DAY as usize],
}

impl DayView<'_> {
    /// Occupied slots of the day in hour order
    pub fn occupied(&self) -> impl Iterator<Item = (TimeKey, &[ProgramSlotEntry])> + '_ {
        TimeKey::all().filter_map(move |time| {
            self.slots[time.hour() as usize]
                .as_deref()
                .map(|entries| (time, entries))
        })
    }
}

impl Serialize for DayView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HOURS_PER_DAY as usize))?;
        for time in TimeKey::all() {
            map.serialize_entry(&time, &self.slots[time.hour() as usize])?;
        }
        map.end()
    }
}
