use chrono::NaiveDate;

use crate::core::project::ProjectStatus;
use crate::core::temporal::DueBuckets;
use crate::store::RecordStore;

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub new_inbox: usize,
    pub open_tasks: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub active_projects: usize,
    pub ideas: usize,
    pub follow_ups: usize,
}

impl DashboardStats {
    pub fn collect(store: &RecordStore, today: NaiveDate) -> Self {
        let buckets = DueBuckets::build(&store.tasks, today);
        Self {
            new_inbox: store.inbox.iter().filter(|i| i.is_new()).count(),
            open_tasks: store.tasks.iter().filter(|t| !t.completed).count(),
            due_today: buckets.today.len(),
            overdue: buckets.overdue.len(),
            active_projects: store
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .count(),
            ideas: store.ideas.len(),
            follow_ups: store
                .contacts
                .iter()
                .filter(|c| c.needs_follow_up(today))
                .count(),
        }
    }
}

pub fn dashboard_view(store: &RecordStore, today: NaiveDate) -> String {
    let stats = DashboardStats::collect(store, today);
    let mut out = String::new();

    out.push_str(&format!("  {}\n", today.format("%A, %B %-d, %Y")));
    out.push_str(&format!("  Inbox:           {} new\n", stats.new_inbox));
    out.push_str(&format!(
        "  Tasks:           {} open ({} due today, {} overdue)\n",
        stats.open_tasks, stats.due_today, stats.overdue
    ));
    out.push_str(&format!("  Active projects: {}\n", stats.active_projects));
    out.push_str(&format!("  Ideas:           {}\n", stats.ideas));
    out.push_str(&format!("  Follow-ups due:  {}\n", stats.follow_ups));

    if store.is_empty() {
        out.push_str("\n  Nothing here yet. Start with `capture <text>`.\n");
        return out;
    }

    let buckets = DueBuckets::build(&store.tasks, today);
    if buckets.total_count() > 0 {
        out.push_str("\n  Needs attention:\n");
        for task in buckets.overdue.iter().chain(buckets.today.iter()) {
            out.push_str(&format!("    {}\n", super::tasks::task_line(task, today)));
        }
    }

    out
}
