use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque record identifier.
///
/// New records get a v4 UUID. Stored documents written by older builds may
/// carry numeric timestamp ids, so integers are accepted on input and kept
/// as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used when listing records.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(s) if s.trim().is_empty() => {
                Err(serde::de::Error::custom("record id cannot be empty"))
            }
            RawId::Text(s) => Ok(Self(s)),
            RawId::Int(n) => Ok(Self(n.to_string())),
        }
    }
}

/// Parse a calendar date from either `YYYY-MM-DD` or a full RFC 3339
/// timestamp. Timestamps are reduced to their local calendar day.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    })
}

/// Serde adapter for optional calendar dates stored as `YYYY-MM-DD`.
/// Empty strings and `null` both read as `None`.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_date(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        id: RecordId,
        #[serde(default, with = "optional_date")]
        due: Option<NaiveDate>,
    }

    #[test]
    fn numeric_ids_are_read_as_strings() {
        let h: Holder = serde_json::from_str(r#"{"id": 1700000000000}"#).unwrap();
        assert_eq!(h.id.as_str(), "1700000000000");
        let out = serde_json::to_value(&h).unwrap();
        assert_eq!(out["id"], "1700000000000");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(serde_json::from_str::<Holder>(r#"{"id": "  "}"#).is_err());
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn short_id_is_a_prefix() {
        let id = RecordId::from("abcdef0123456789");
        assert_eq!(id.short(), "abcdef01");
        assert_eq!(RecordId::from("abc").short(), "abc");
    }

    #[test]
    fn dates_accept_plain_and_timestamp_forms() {
        let h: Holder = serde_json::from_str(r#"{"id": "a", "due": "2026-03-01"}"#).unwrap();
        assert_eq!(h.due, NaiveDate::from_ymd_opt(2026, 3, 1));

        let h: Holder = serde_json::from_str(r#"{"id": "a", "due": ""}"#).unwrap();
        assert_eq!(h.due, None);

        let h: Holder = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(h.due, None);

        assert!(parse_date("2026-03-01T12:00:00+00:00").is_some());
        assert!(parse_date("next tuesday").is_none());
    }

    #[test]
    fn dates_serialize_as_plain_days() {
        let h = Holder {
            id: RecordId::from("a"),
            due: NaiveDate::from_ymd_opt(2026, 3, 1),
        };
        assert_eq!(serde_json::to_value(&h).unwrap()["due"], "2026-03-01");
    }
}
