//! A timezone-aware instant. Wrapping `chrono::DateTime<Utc>` directly would
//! let a naive datetime in anywhere by accident via `From`; `UtcDatetime`
//! only constructs from a value that already carries an offset.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDatetime(DateTime<Utc>);

impl UtcDatetime {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_utc(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    pub fn parse_rfc3339(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| format!("invalid RFC3339 datetime {raw}: {e}"))
    }

    pub fn inner(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn timestamp_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }
}

impl std::fmt::Display for UtcDatetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
