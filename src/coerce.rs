//! String coercion for discovery
//!
//! A textual sample may really be a number, a boolean, or a date in
//! disguise. Discovery tries a fixed, ordered list of fallible parsers and
//! recurses on the first value that parses; a parse failure is expected
//! control flow, never an error. When every parser declines, the value is
//! an opaque string.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::discover::SampleValue;

// Pre-screens for the date/time parsers. Matching a pattern does not
// guarantee a valid calendar value; chrono still validates the fields.
static DATETIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}[T ]\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$")
        .unwrap()
});

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}/\d{1,2}/\d{4})$").unwrap());

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?$").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Run the ordered coercion chain over a textual sample
///
/// Order matters: integer before float so `"42"` stays integral, the
/// boolean tokens before the date parser so `"true"` is never a date, and
/// the date/time parser last because it is the most permissive.
pub(crate) fn coerce_string(s: &str, parse_dates: bool) -> Option<SampleValue> {
    let s = s.trim();
    coerce_int(s)
        .or_else(|| coerce_float(s))
        .or_else(|| coerce_bool(s))
        .or_else(|| if parse_dates { coerce_temporal(s) } else { None })
}

fn coerce_int(s: &str) -> Option<SampleValue> {
    s.parse::<i64>().ok().map(SampleValue::Int)
}

fn coerce_float(s: &str) -> Option<SampleValue> {
    s.parse::<f64>().ok().map(SampleValue::Float)
}

fn coerce_bool(s: &str) -> Option<SampleValue> {
    match s {
        "True" | "true" => Some(SampleValue::Bool(true)),
        "False" | "false" => Some(SampleValue::Bool(false)),
        _ => None,
    }
}

/// Permissive date/time parsing, most specific class first
fn coerce_temporal(s: &str) -> Option<SampleValue> {
    if DATETIME_RE.is_match(s) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(SampleValue::DateTime(dt.naive_utc()));
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(SampleValue::DateTime(dt));
            }
        }
    }

    if DATE_RE.is_match(s) {
        for format in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(s, format) {
                return Some(SampleValue::Date(d));
            }
        }
    }

    if TIME_RE.is_match(s) {
        for format in TIME_FORMATS {
            if let Ok(t) = NaiveTime::parse_from_str(s, format) {
                return Some(SampleValue::Time(t));
            }
        }
    }

    None
}
