//! Display formatting for schedules and prices.
//!
//! All output follows the Indonesian (`id-ID`) long-date convention and is
//! deterministic: no system locale or clock is consulted.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

/// Literal used when an event has no fixed end time.
pub const END_OF_EVENT: &str = "Selesai";

/// Shown when no time string is available.
pub const TIME_UNAVAILABLE: &str = "Informasi waktu tidak tersedia";

/// Shown when no date string is available.
pub const DATE_UNAVAILABLE: &str = "Tanggal tidak tersedia";

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

lazy_static! {
    static ref START_PREFIX: Regex = Regex::new(r"(?i)^Mulai\s+").unwrap();
    static ref TIMEZONE_TOKEN: Regex = Regex::new(r"(?i)\b(WIB|WITA|WIT)\b").unwrap();
    static ref TRAILING_NOTE: Regex = Regex::new(r"\s*\(([^)]+)\)\s*$").unwrap();
    static ref TIME_OF_DAY: Regex = Regex::new(r"\d{1,2}:\d{2}").unwrap();
    static ref RANGE_SEPARATOR: Regex = Regex::new(r"\s+-\s+").unwrap();
}

/// Normalizes a free-form event time string into `"<start> - <end>[ TZ][ (note)]"`.
///
/// The input may start with `"Mulai "`, may carry one of the `WIB`/`WITA`/`WIT`
/// zone tokens (which wins over `timezone`) and may end with a parenthetical
/// note. A single bare time becomes `"<time> - Selesai"`, and an end token that
/// is not a time becomes `Selesai`. Anything that cannot be read as a time is
/// returned unchanged.
pub fn format_event_time(time_display: Option<&str>, timezone: Option<&str>) -> String {
    let original = match time_display {
        Some(s) if !s.is_empty() => s,
        _ => return TIME_UNAVAILABLE.to_string(),
    };

    let mut text = START_PREFIX.replace(original, "").trim().to_string();

    let mut tz_suffix = timezone
        .filter(|tz| !tz.is_empty())
        .map(|tz| format!(" {}", tz.to_uppercase()))
        .unwrap_or_default();

    if let Some(token) = TIMEZONE_TOKEN.find(&text) {
        tz_suffix = format!(" {}", token.as_str().to_uppercase());
        text = TIMEZONE_TOKEN.replace(&text, "").trim().to_string();
    }

    let note = match TRAILING_NOTE.captures(&text) {
        Some(caps) => format!(" ({})", caps[1].trim()),
        None => String::new(),
    };
    if !note.is_empty() {
        text = TRAILING_NOTE.replace(&text, "").trim().to_string();
    }

    if text.contains(" - ") {
        let mut parts = RANGE_SEPARATOR.split(&text);
        let head = parts.next().unwrap_or_default();
        let tail = parts.next().map(str::trim).unwrap_or_default();

        if let Some(start) = TIME_OF_DAY.find(head) {
            let end = if TIME_OF_DAY.is_match(tail) {
                tail
            } else {
                END_OF_EVENT
            };
            return format!("{} - {}{}{}", start.as_str(), end, tz_suffix, note);
        }
    } else if let Some(single) = TIME_OF_DAY.find(&text) {
        if text.trim() == single.as_str() {
            return format!("{} - {}{}{}", single.as_str(), END_OF_EVENT, tz_suffix, note);
        }
    }

    original.to_string()
}

/// Formats a date or a `" - "` separated date range in Indonesian long form.
///
/// Accepts `YYYY/MM/DD` and `YYYY-MM-DD`. Ranges collapse the shared parts:
/// same month gives `"28 - 29 Juni 2025"`, same year gives
/// `"25 Agustus - 1 Desember 2025"`. Unparseable input is returned unchanged.
pub fn format_display_date(date_display: Option<&str>) -> String {
    let original = match date_display {
        Some(s) if !s.is_empty() => s,
        _ => return DATE_UNAVAILABLE.to_string(),
    };

    let parts: Vec<&str> = original.split(" - ").collect();
    match parts.as_slice() {
        [single] => parse_date_part(single)
            .map(long_date)
            .unwrap_or_else(|| original.to_string()),
        [start, end] => match (parse_date_part(start), parse_date_part(end)) {
            (Some(start), Some(end)) => format_date_range(start, end),
            _ => original.to_string(),
        },
        _ => original.to_string(),
    }
}

fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        format!("{} - {}", start.day(), long_date(end))
    } else if start.year() == end.year() {
        format!("{} - {}", day_and_month(start), long_date(end))
    } else {
        format!("{} - {}", long_date(start), long_date(end))
    }
}

/// Parses one side of a date display string. Each component is read like
/// `parseInt`: leading digits count, trailing garbage is ignored.
pub fn parse_date_part(part: &str) -> Option<NaiveDate> {
    let cleaned = part.replace('/', "-");
    let fields: Vec<&str> = cleaned.split('-').collect();
    if fields.len() != 3 {
        return None;
    }

    let year = i32::try_from(leading_int(fields[0])?).ok()?;
    let month = u32::try_from(leading_int(fields[1])?).ok()?;
    let day = u32::try_from(leading_int(fields[2])?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn leading_int(field: &str) -> Option<i64> {
    let trimmed = field.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `19 Juli 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_LONG[date.month0() as usize],
        date.year()
    )
}

fn day_and_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_LONG[date.month0() as usize])
}

/// `01 Des 2025`, used on compact dashboard cards.
pub fn short_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_SHORT[date.month0() as usize],
        date.year()
    )
}

/// Formats an amount of rupiah without minor units: `Rp 1.500.000`.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
