use super::types::Weekday;

/// Day label from the raw schedule's second column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCategory {
    EveryDay,
    Weekday,
    Weekend,
    Saturday,
    Sunday,
    /// A label outside the vocabulary; schedules on no day
    Unrecognized(String),
}

impl DayCategory {
    /// Parses a label. Accepts the Chinese labels used by broadcasters and
    /// their English equivalents.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label {
            "每天" => DayCategory::EveryDay,
            "平日" => DayCategory::Weekday,
            "週末" => DayCategory::Weekend,
            "週六" => DayCategory::Saturday,
            "週日" => DayCategory::Sunday,
            _ => match label.to_lowercase().as_str() {
                "every day" | "everyday" | "daily" => DayCategory::EveryDay,
                "weekday" | "weekdays" => DayCategory::Weekday,
                "weekend" | "weekends" => DayCategory::Weekend,
                "saturday" => DayCategory::Saturday,
                "sunday" => DayCategory::Sunday,
                _ => DayCategory::Unrecognized(label.to_string()),
            },
        }
    }

    /// Days this category airs on
    pub fn days(&self) -> &'static [Weekday] {
        match self {
            DayCategory::EveryDay => &Weekday::ALL,
            DayCategory::Weekday => &WEEKDAYS,
            DayCategory::Weekend => &WEEKEND,
            DayCategory::Saturday => &[Weekday::Saturday],
            DayCategory::Sunday => &[Weekday::Sunday],
            DayCategory::Unrecognized(_) => &[],
        }
    }
}

const WEEKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

const WEEKEND: [Weekday; 2] = [Weekday::Saturday, Weekday::Sunday];
