use chrono::{Duration, Local, NaiveDate, TimeDelta};
use anyhow::{anyhow, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The operator's current calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses `today`, `yesterday`, `tomorrow` (and their short forms), relative
/// offsets such as `-1d` or `+2w`, or a plain `YYYY-MM-DD` date.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" | "yest" => return Ok(today - Duration::days(1)),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nd, +Nw)
    if input.starts_with('+') || input.starts_with('-') {
        let offset = parse_offset(input)?;
        return today
            .checked_add_signed(offset)
            .ok_or_else(|| anyhow!("Relative date out of range: {}", input));
    }

    // 3. Standard format
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

fn parse_offset(input: &str) -> Result<Duration> {
    let (split, _) = input
        .char_indices()
        .last()
        .ok_or_else(|| anyhow!("Invalid relative date: {}", input))?;
    let (num_str, unit) = input.split_at(split);
    if num_str.len() < 2 {
        return Err(anyhow!("Invalid relative date: {}", input));
    }
    let count: i64 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative date: {}", input))?;

    let offset = match unit.to_lowercase().as_str() {
        "d" => TimeDelta::try_days(count),
        "w" => TimeDelta::try_weeks(count),
        _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
    };
    offset.ok_or_else(|| anyhow!("Relative date out of range: {}", input))
}

/// Moves a stored date string by whole days. Strings that are not dates are
/// returned unchanged.
pub fn shift_day(date: &str, days: i64) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(d) => TimeDelta::try_days(days)
            .and_then(|offset| d.checked_add_signed(offset))
            .map(format_day)
            .unwrap_or_else(|| date.to_string()),
        Err(_) => date.to_string(),
    }
}
