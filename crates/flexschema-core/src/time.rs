use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// An instant in UTC, rendered as RFC 3339.
///
/// Captured once per top-level mutation and handed down explicitly so that
/// nested objects prepared within the same payload share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn new(datetime: OffsetDateTime) -> Self {
        Self(datetime.to_offset(time::UtcOffset::UTC))
    }

    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn inner(&self) -> &OffsetDateTime {
        &self.0
    }

    /// JSON string form stored in documents.
    ///
    /// Fails for instants RFC 3339 cannot express (years outside 0..=9999).
    pub fn to_json(&self) -> Result<Value, time::error::Format> {
        self.0.format(&Rfc3339).map(Value::String)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(datetime: OffsetDateTime) -> Self {
        Self::new(datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_rfc3339_rendering() {
        let ts = Timestamp::new(datetime!(2024-03-01 12:30:00 UTC));
        assert_eq!(ts.to_string(), "2024-03-01T12:30:00Z");
        assert_eq!(
            ts.to_json().unwrap(),
            Value::String("2024-03-01T12:30:00Z".into())
        );
    }

    #[test]
    fn test_unrepresentable_year_fails() {
        let ts = Timestamp::new(OffsetDateTime::from_unix_timestamp(-100_000_000_000).unwrap());
        assert!(ts.to_json().is_err());
        assert!(serde_json::to_value(ts).is_err());
    }

    #[test]
    fn test_offset_normalized_to_utc() {
        let ts = Timestamp::new(datetime!(2024-03-01 14:30:00 +2));
        assert_eq!(ts.to_string(), "2024-03-01T12:30:00Z");
    }

    #[test]
    fn test_now_ordering() {
        let a = Timestamp::now();
        let b = Timestamp::now();
        assert!(a <= b);
    }
}
