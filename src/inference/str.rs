use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::Scalar;

// ------- Date heuristic policy -------
//
// Deliberately permissive: anything a general-purpose date parser would
// accept is a DateTime, including short numeric forms such as "1.2" or
// "2.1.0". Tightening this changes output for existing inputs.

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%d %B %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
    "%a, %d %b %Y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];

/// Two or three short numeric components separated by `.`, `/` or `-`.
static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})[./-](\d{1,2})(?:[./-](\d{1,4}))?$").expect("numeric date pattern")
});

pub fn classify(s: &str) -> Scalar {
    if looks_like_datetime(s) { Scalar::DateTime } else { Scalar::String }
}

pub fn looks_like_datetime(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
        || DATETIME_FORMATS.iter().any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
        || DATE_FORMATS.iter().any(|f| NaiveDate::parse_from_str(s, f).is_ok())
        || TIME_FORMATS.iter().any(|f| NaiveTime::parse_from_str(s, f).is_ok())
        || looks_like_numeric_date(s)
}

/// `M.D`, `Y.M`, `M.D.Y`, `D.M.Y` or `Y.M.D` with calendar-plausible parts.
fn looks_like_numeric_date(s: &str) -> bool {
    let Some(caps) = NUMERIC_DATE.captures(s) else {
        return false;
    };
    let part = |i: usize| caps.get(i).map(|m| (m.as_str().len(), m.as_str().parse::<u32>().unwrap_or(0)));
    let (Some((a_len, a)), Some((_, b))) = (part(1), part(2)) else {
        return false;
    };
    let valid = |y: u32, m: u32, d: u32| NaiveDate::from_ymd_opt(expand_year(y) as i32, m, d).is_some();

    match part(3) {
        None if a_len == 4 => valid(a, b, 1),
        None => valid(2000, a, b),
        Some((_, c)) if a_len >= 3 => valid(a, b, c),
        Some((_, c)) => valid(c, a, b) || valid(c, b, a),
    }
}

// two-digit years land in 1930..=2029, the window general-purpose parsers use
fn expand_year(y: u32) -> u32 {
    match y {
        0..=29 => 2000 + y,
        30..=99 => 1900 + y,
        _ => y,
    }
}
