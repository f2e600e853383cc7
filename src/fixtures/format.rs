// fixtures/format.rs - Date and time literals for fixture rows
//
// Row values are strings, so temporal values are rendered in the textual
// form databases accept for DATE, TIME and TIMESTAMP columns:
//   date       2024-01-05
//   time       13:45:07
//   timestamp  2024-01-05 13:45:07.000000000

use chrono::{Datelike, Timelike};

/// Calendar date as `YYYY-MM-DD`
pub fn format_date<D: Datelike>(value: &D) -> String {
    format!("{:04}-{:02}-{:02}", value.year(), value.month(), value.day())
}

/// Time of day as `HH:MM:SS` on a 24-hour clock
pub fn format_time<T: Timelike>(value: &T) -> String {
    let (second, _) = split_leap_second(value);
    format!("{:02}:{:02}:{:02}", value.hour(), value.minute(), second)
}

/// Date, time and nanosecond fraction as `YYYY-MM-DD HH:MM:SS.fffffffff`
pub fn format_timestamp<T: Datelike + Timelike>(value: &T) -> String {
    let (second, nanos) = split_leap_second(value);
    format!(
        "{} {:02}:{:02}:{:02}.{:09}",
        format_date(value),
        value.hour(),
        value.minute(),
        second,
        nanos
    )
}

// chrono encodes a leap second as second 59 with nanos >= 1_000_000_000
fn split_leap_second<T: Timelike>(value: &T) -> (u32, u32) {
    let nanos = value.nanosecond();
    if nanos >= 1_000_000_000 {
        (value.second() + 1, nanos - 1_000_000_000)
    } else {
        (value.second(), nanos)
    }
}
