use super::types::TimeKey;

const CJK_ENUMERATION_COMMA: char = '、';

/// Truncates a start time such as "08:30" to its hourly slot key.
///
/// The hour is everything before the first ':'; a missing separator, a
/// non-numeric hour or an hour past 23 yields `None`.
pub fn parse_time_key(time_str: &str) -> Option<TimeKey> {
    let (hour, _) = time_str.trim().split_once(':')?;
    let hour: u8 = hour.trim().parse().ok()?;
    TimeKey::from_hour(hour)
}

/// Splits a channel list on ',' or '、', trimming names and dropping blanks
pub fn split_channels(channels: &str) -> Vec<String> {
    channels
        .replace(CJK_ENUMERATION_COMMA, ",")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
