// Booking total calculation
// The store never recomputes the total, so the value produced here is what gets frozen into the booking

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// Nights and total shown on the booking summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    // Raw night count, may be zero or negative. None if a date didn't parse.
    pub nights: Option<i64>,
    pub total: f64,
}

// Parse a date as entered in the booking form.
// Date-only values are midnight UTC; timestamps without an offset are read as UTC.
pub fn parse_booking_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.and_utc())
}

// Whole nights between two instants; any partial day counts as a full night
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let diff_ms = (check_out - check_in).num_milliseconds();
    // ceil for both signs: integer division truncates toward zero
    if diff_ms > 0 {
        (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    } else {
        diff_ms / MILLIS_PER_DAY
    }
}

// Night count for two form values, None when either is missing or unparseable
pub fn nights(check_in: &str, check_out: &str) -> Option<i64> {
    let check_in = parse_booking_date(check_in)?;
    let check_out = parse_booking_date(check_out)?;
    Some(nights_between(check_in, check_out))
}

// Total price for the stay, 0 whenever it can't be computed or the range is empty
pub fn calculate_total(check_in: &str, check_out: &str, price_per_night: f64) -> f64 {
    match nights(check_in, check_out) {
        Some(n) if n > 0 => n as f64 * price_per_night,
        _ => 0.0,
    }
}

// Summary quote, only produced once both dates have been entered
pub fn quote(check_in: &str, check_out: &str, price_per_night: f64) -> Option<Quote> {
    if check_in.trim().is_empty() || check_out.trim().is_empty() {
        return None;
    }

    Some(Quote {
        nights: nights(check_in, check_out),
        total: calculate_total(check_in, check_out, price_per_night),
    })
}
