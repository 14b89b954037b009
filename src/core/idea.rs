use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::RecordId;

pub const DEFAULT_POTENTIAL: u8 = 2;
pub const MAX_POTENTIAL: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaStatus {
    #[default]
    New,
    Exploring,
    Implemented,
    Archived,
}

impl IdeaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Exploring => "exploring",
            Self::Implemented => "implemented",
            Self::Archived => "archived",
        }
    }
}

fn default_potential() -> u8 {
    DEFAULT_POTENTIAL
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: RecordId,
    pub text: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Rating from 1 to 5.
    #[serde(default = "default_potential")]
    pub potential: u8,
    #[serde(default)]
    pub status: IdeaStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Idea {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            text: text.into(),
            category: default_category(),
            potential: DEFAULT_POTENTIAL,
            status: IdeaStatus::New,
            created_at: Utc::now(),
        }
    }

    pub fn rate(&mut self, potential: i64) {
        self.potential = potential.clamp(1, MAX_POTENTIAL as i64) as u8;
    }

    pub fn stars(&self) -> String {
        let filled = self.potential.min(MAX_POTENTIAL) as usize;
        format!(
            "{}{}",
            "*".repeat(filled),
            ".".repeat(MAX_POTENTIAL as usize - filled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_idea_defaults() {
        let idea = Idea::new("Podcast about tools");
        assert_eq!(idea.category, "general");
        assert_eq!(idea.potential, 2);
        assert_eq!(idea.status, IdeaStatus::New);
    }

    #[test]
    fn rating_is_clamped() {
        let mut idea = Idea::new("x");
        idea.rate(9);
        assert_eq!(idea.potential, 5);
        idea.rate(0);
        assert_eq!(idea.potential, 1);
        assert_eq!(idea.stars(), "*....");
    }

    #[test]
    fn missing_potential_defaults_to_two() {
        let idea: Idea = serde_json::from_str(r#"{"id": "i1", "text": "x"}"#).unwrap();
        assert_eq!(idea.potential, 2);
        assert_eq!(idea.category, "general");
    }
}
