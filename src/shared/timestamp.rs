//! Normalization of heterogeneous report timestamps.
//!
//! Reports imported from the legacy document store carry timestamps in
//! several shapes: native instants, extended-JSON `{"$date": millis}`
//! values, ISO-8601 strings and a zone-less microsecond format. Everything
//! is converted to a UTC instant here. Parsing never fails loudly: callers
//! pick a [`ParseFallback`] that decides what an unparseable value means
//! for them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Zone-less formats tried after RFC 3339, in order. The first entry is the
/// `YYYY-MM-DDTHH:MM:SS.ffffff` format written by older clients.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A timestamp exactly as it was found in storage.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    Native(DateTime<Utc>),
    /// Extended-JSON `{"$date": <epoch millis>}`
    EpochMillis(f64),
    Text(String),
    /// Any shape the normalizer does not understand
    Other(Value),
}

/// What an unparseable (or absent) timestamp should mean to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFallback {
    /// Treat it as recent. Used by inclusion filters so a report with a
    /// broken timestamp is never silently hidden.
    AssumeRecent,
    /// Sort it before every real instant. Used for "most recent" selection.
    Earliest,
}

/// Result of normalization. Ordering is `Earliest < At(_) < Recent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NormalizedTime {
    Earliest,
    At(DateTime<Utc>),
    Recent,
}

impl NormalizedTime {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            NormalizedTime::At(t) => Some(*t),
            _ => None,
        }
    }

    /// True when the time is at or after `cutoff`; `Recent` always passes and
    /// `Earliest` never does.
    pub fn is_at_or_after(&self, cutoff: DateTime<Utc>) -> bool {
        *self >= NormalizedTime::At(cutoff)
    }
}

impl RawTimestamp {
    /// Interpret a stored JSON value. `null` means the field is absent.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(RawTimestamp::Text(s)),
            Value::Object(ref map) if map.contains_key("$date") => {
                Some(match &map["$date"] {
                    Value::Number(n) => n
                        .as_f64()
                        .map(RawTimestamp::EpochMillis)
                        .unwrap_or_else(|| RawTimestamp::Other(value.clone())),
                    Value::String(s) => RawTimestamp::Text(s.clone()),
                    Value::Object(inner) => match inner.get("$numberLong") {
                        Some(Value::String(s)) => s
                            .parse::<f64>()
                            .map(RawTimestamp::EpochMillis)
                            .unwrap_or_else(|_| RawTimestamp::Other(value.clone())),
                        _ => RawTimestamp::Other(value.clone()),
                    },
                    _ => RawTimestamp::Other(value.clone()),
                })
            }
            other => Some(RawTimestamp::Other(other)),
        }
    }

    /// Whether the stored value counts as "having a timestamp". Empty strings,
    /// zero, `false` and empty containers do not.
    pub fn is_present(&self) -> bool {
        match self {
            RawTimestamp::Native(_) | RawTimestamp::EpochMillis(_) => true,
            RawTimestamp::Text(s) => !s.is_empty(),
            RawTimestamp::Other(v) => match v {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(a) => !a.is_empty(),
                Value::Object(o) => !o.is_empty(),
            },
        }
    }

    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Native(t) => Some(*t),
            RawTimestamp::EpochMillis(ms) => from_epoch_millis(*ms),
            RawTimestamp::Text(s) => parse_text(s),
            RawTimestamp::Other(_) => None,
        }
    }
}

/// Normalize an optional stored timestamp, applying `fallback` when it is
/// absent or cannot be parsed.
pub fn normalize(raw: Option<&RawTimestamp>, fallback: ParseFallback) -> NormalizedTime {
    match raw.and_then(RawTimestamp::parse) {
        Some(t) => NormalizedTime::At(t),
        None => match fallback {
            ParseFallback::AssumeRecent => NormalizedTime::Recent,
            ParseFallback::Earliest => NormalizedTime::Earliest,
        },
    }
}

fn from_epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    let secs = (ms / 1000.0).floor();
    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return None;
    }
    let nanos = ((ms - secs * 1000.0) * 1_000_000.0).round() as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    // Surrounding whitespace is not stripped; such text takes the fallback.
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return None;
    }

    let iso = match s.strip_suffix('Z') {
        Some(head) => format!("{}+00:00", head),
        None => s.to_string(),
    };

    if let Ok(t) = DateTime::parse_from_rfc3339(&iso) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(&iso, "%Y-%m-%dT%H:%M%:z") {
        return Some(t.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
