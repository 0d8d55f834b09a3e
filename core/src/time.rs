use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::FormError;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parses a due date typed by the user, relative to the local calendar day.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, FormError> {
    parse_due_date_from(input, Local::now().date_naive())
}

/// Same as [`parse_due_date`] with an explicit "today".
pub fn parse_due_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormError::MissingDueDate);
    }
    let invalid = || FormError::InvalidDueDate(input.to_string());

    // 1. Plain dates
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(input, format) {
            return Ok(d);
        }
    }

    // 2. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return today.succ_opt().ok_or_else(invalid),
        "eow" => {
            // End of week (Sunday)
            let days_to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
            return shift_days(today, days_to_sunday).ok_or_else(invalid);
        }
        "eom" => return last_day_of_month(today.year(), today.month()).ok_or_else(invalid),
        _ => {}
    }

    // 3. Relative format (+Nd, +Nw, +Nm)
    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() < 2 || !rest.is_char_boundary(rest.len() - 1) {
            return Err(invalid());
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: i64 = num_str.parse().map_err(|_| invalid())?;

        return match unit {
            "d" => shift_days(today, count).ok_or_else(invalid),
            "w" => Duration::try_weeks(count)
                .and_then(|delta| today.checked_add_signed(delta))
                .ok_or_else(invalid),
            "m" => add_months(today, count).ok_or_else(invalid),
            _ => Err(invalid()),
        };
    }

    // 4. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Some(target) = parse_weekday_str(day_str) {
            let mut days_needed: i64 = target.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            // count = 1 means the next one, count = 2 the one after that.
            return (count - 1)
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(days_needed))
                .and_then(|days| shift_days(today, days))
                .ok_or_else(invalid);
        }
    }

    Err(invalid())
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

fn add_months(date: NaiveDate, count: i64) -> Option<NaiveDate> {
    let months = date.year() as i64 * 12 + date.month0() as i64 + count;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = months.rem_euclid(12) as u32 + 1;
    // Jan 31 + 1m lands on the last day of February
    NaiveDate::from_ymd_opt(year, month, date.day()).or_else(|| last_day_of_month(year, month))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => count.parse::<i64>().ok().filter(|c| *c >= 1).map(|c| (c, day)),
        // Just "fri" means 1:fri
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
