use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Thought,
    Task,
    Idea,
    Link,
    Note,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thought => "thought",
            Self::Task => "task",
            Self::Idea => "idea",
            Self::Link => "link",
            Self::Note => "note",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboxStatus {
    #[default]
    New,
    Done,
}

/// A raw capture waiting to be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxItem {
    pub id: RecordId,
    pub text: String,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub status: InboxStatus,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl InboxItem {
    /// Returns `None` when the text is blank after trimming.
    pub fn capture(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: RecordId::generate(),
            text: text.to_string(),
            item_type: ItemType::Thought,
            status: InboxStatus::New,
            ai_summary: String::new(),
            created_at: Utc::now(),
        })
    }

    pub fn is_new(&self) -> bool {
        self.status == InboxStatus::New
    }

    pub fn mark_done(&mut self) {
        self.status = InboxStatus::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_trims_and_defaults() {
        let item = InboxItem::capture("  call the plumber \n").unwrap();
        assert_eq!(item.text, "call the plumber");
        assert_eq!(item.item_type, ItemType::Thought);
        assert!(item.is_new());
        assert!(item.ai_summary.is_empty());
    }

    #[test]
    fn capture_rejects_blank_text() {
        assert!(InboxItem::capture("   ").is_none());
        assert!(InboxItem::capture("").is_none());
    }

    #[test]
    fn wire_shape_uses_camel_case_and_type_key() {
        let item = InboxItem::capture("hello").unwrap();
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["type"], "thought");
        assert_eq!(v["status"], "new");
        assert!(v.get("aiSummary").is_some());
        assert!(v.get("createdAt").is_some());
    }

    #[test]
    fn legacy_item_with_missing_fields_loads() {
        let item: InboxItem =
            serde_json::from_str(r#"{"id": 1, "text": "old capture", "type": "link"}"#).unwrap();
        assert_eq!(item.item_type, ItemType::Link);
        assert_eq!(item.status, InboxStatus::New);
    }
}
