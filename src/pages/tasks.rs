use chrono::NaiveDate;

use crate::core::task::Task;
use crate::core::temporal::{DueStatus, due_status};
use crate::store::RecordStore;

pub(crate) fn task_line(task: &Task, today: NaiveDate) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!(
        "[{}] {}  {:<6} {}",
        check,
        task.id.short(),
        task.priority.as_str(),
        task.text
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {}", due.format("%Y-%m-%d")));
        if !task.completed {
            let status = due_status(Some(due), today);
            if status != DueStatus::None {
                line.push_str(&format!(" ({})", status.label()));
            }
        }
    }
    if let Some(ref project) = task.project {
        line.push_str(&format!("  -> {}", project));
    }
    if !task.context.is_empty() {
        let ctx: Vec<&str> = task.context.iter().map(String::as_str).collect();
        line.push_str(&format!("  {}", ctx.join(" ")));
    }
    line
}

/// Open tasks sorted by priority then due date; completed tasks last.
pub fn tasks_view(store: &RecordStore, today: NaiveDate) -> String {
    if store.tasks.is_empty() {
        return super::empty_line("tasks");
    }

    let mut open: Vec<&Task> = store.tasks.iter().filter(|t| !t.completed).collect();
    open.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
    let done: Vec<&Task> = store.tasks.iter().filter(|t| t.completed).collect();

    let mut out = String::new();
    for task in &open {
        out.push_str(&format!("  {}\n", task_line(task, today)));
    }
    if !done.is_empty() {
        out.push_str(&format!("\n  Completed ({}):\n", done.len()));
        for task in &done {
            out.push_str(&format!("  {}\n", task_line(task, today)));
        }
    }
    out
}
