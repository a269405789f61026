//! Watermark - the synchronization cursor.
//!
//! A watermark marks the point up to which a client's view is known
//! consistent with the server. It is opaque to the consumer, totally
//! ordered, and exchanged on the wire as an ISO-8601 UTC timestamp.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque, totally ordered sync cursor.
///
/// Invariant (enforced by the sync client, helped by [`Watermark::max`]):
/// once adopted, a watermark never moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watermark(DateTime<Utc>);

impl Watermark {
    /// The current wall-clock instant as a watermark.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse an ISO-8601 / RFC 3339 timestamp, e.g. `2025-12-10T15:05:00Z`.
    pub fn parse(input: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(input)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|source| Error::InvalidWatermark {
                input: input.to_string(),
                source,
            })
    }

    /// The later of two watermarks. Used when adopting a server-returned
    /// cursor so the adopted value can never regress.
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// The instant this watermark represents.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Watermark {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl FromStr for Watermark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip() {
        let mark = Watermark::parse("2025-12-10T15:05:00Z").unwrap();
        assert_eq!(mark.to_string(), "2025-12-10T15:05:00.000Z");
        assert_eq!(Watermark::parse(&mark.to_string()).unwrap(), mark);
    }

    #[test]
    fn parse_accepts_offset_form() {
        let zulu = Watermark::parse("2025-12-10T15:05:00Z").unwrap();
        let offset = Watermark::parse("2025-12-10T16:05:00+01:00").unwrap();
        assert_eq!(zulu, offset);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Watermark::parse("not-a-timestamp").unwrap_err();
        assert!(matches!(err, Error::InvalidWatermark { .. }));
        assert!(err.to_string().contains("not-a-timestamp"));
    }

    #[test]
    fn ordering_is_chronological() {
        let earlier = Watermark::parse("2025-12-10T15:05:00Z").unwrap();
        let later = Watermark::parse("2025-12-10T15:05:30Z").unwrap();

        assert!(earlier < later);
        assert_eq!(earlier.max(later), later);
        assert_eq!(later.max(earlier), later);
        assert_eq!(later.max(later), later);
    }

    #[test]
    fn serde_is_transparent() {
        let mark = Watermark::parse("2025-12-10T15:05:00Z").unwrap();
        let json = serde_json::to_string(&mark).unwrap();
        let parsed: Watermark = serde_json::from_str(&json).unwrap();
        assert_eq!(mark, parsed);
    }
}
