use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::RecordId;
use super::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "on-hold" | "onhold" | "hold" => Some(Self::OnHold),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A multi-step outcome. Tasks point at projects by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Percent complete, 0 to 100. Only changed by explicit updates.
    #[serde(default)]
    pub progress: u8,
    /// Number of tasks referencing this project by name.
    #[serde(default)]
    pub tasks: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            description: description.into(),
            status: ProjectStatus::Active,
            progress: 0,
            tasks: 0,
            created_at: Utc::now(),
        }
    }

    pub fn set_progress(&mut self, percent: i64) {
        self.progress = percent.clamp(0, 100) as u8;
    }

    pub fn count_tasks(&self, tasks: &[Task]) -> u32 {
        tasks.iter().filter(|t| t.belongs_to(&self.name)).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        let mut p = Project::new("Garden", "");
        p.set_progress(140);
        assert_eq!(p.progress, 100);
        p.set_progress(-5);
        assert_eq!(p.progress, 0);
        p.set_progress(40);
        assert_eq!(p.progress, 40);
        // Reaching 100 does not complete the project on its own.
        p.set_progress(100);
        assert_eq!(p.status, ProjectStatus::Active);
    }

    #[test]
    fn status_uses_kebab_case() {
        let v = serde_json::to_value(ProjectStatus::OnHold).unwrap();
        assert_eq!(v, "on-hold");
        assert_eq!(ProjectStatus::from_name("hold"), Some(ProjectStatus::OnHold));
    }

    #[test]
    fn counts_tasks_by_name() {
        let p = Project::new("Garden", "");
        let mut a = Task::new("Buy seeds");
        a.project = Some("Garden".into());
        let b = Task::new("Unrelated");
        assert_eq!(p.count_tasks(&[a, b]), 1);
    }
}
