use chrono::{DateTime, Local, NaiveDate};

use super::task::Task;

/// Urgency label derived from a due date. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    None,
    Today,
    Overdue,
}

impl DueStatus {
    /// Empty for `None`, matching the label shown next to a task.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Today => "today",
            Self::Overdue => "overdue",
        }
    }
}

/// Compare the due date's calendar day against `today`.
pub fn due_status(due: Option<NaiveDate>, today: NaiveDate) -> DueStatus {
    let Some(due) = due else {
        return DueStatus::None;
    };
    let days = (due - today).num_days();
    if days < 0 {
        DueStatus::Overdue
    } else if days == 0 {
        DueStatus::Today
    } else {
        DueStatus::None
    }
}

/// Same as [`due_status`] with "today" taken from a local timestamp; the
/// time of day is ignored.
pub fn due_status_at(due: Option<NaiveDate>, now: DateTime<Local>) -> DueStatus {
    due_status(due, now.date_naive())
}

/// Open tasks grouped by urgency.
pub struct DueBuckets<'a> {
    pub overdue: Vec<&'a Task>,
    pub today: Vec<&'a Task>,
}

impl<'a> DueBuckets<'a> {
    pub fn build(tasks: &'a [Task], today: NaiveDate) -> Self {
        let mut overdue = Vec::new();
        let mut due_today = Vec::new();

        for task in tasks {
            if task.completed {
                continue;
            }
            match due_status(task.due_date, today) {
                DueStatus::Overdue => overdue.push(task),
                DueStatus::Today => due_today.push(task),
                DueStatus::None => {}
            }
        }

        overdue.sort_by_key(|t| t.due_date);

        Self {
            overdue,
            today: due_today,
        }
    }

    pub fn total_count(&self) -> usize {
        self.overdue.len() + self.today.len()
    }
}
