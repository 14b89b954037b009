use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::{RecordId, optional_date};

/// A person worth keeping in touch with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    /// Free-form, e.g. "colleague", "client", "friend".
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, with = "optional_date")]
    pub last_contact: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub next_follow_up: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            company: String::new(),
            relationship: String::new(),
            email: String::new(),
            phone: String::new(),
            last_contact: None,
            next_follow_up: None,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Derived, never stored.
    pub fn needs_follow_up(&self, today: NaiveDate) -> bool {
        self.next_follow_up.is_some_and(|d| d <= today)
    }

    pub fn days_since_contact(&self, today: NaiveDate) -> Option<i64> {
        self.last_contact.map(|d| (today - d).num_days())
    }
}
