use crate::core::project::Project;
use crate::store::RecordStore;

const BAR_WIDTH: usize = 20;

fn progress_bar(progress: u8) -> String {
    let filled = (progress.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn project_block(project: &Project) -> String {
    let mut block = format!(
        "  {}  {} ({})\n    {} {:>3}%  {} task{}\n",
        project.id.short(),
        project.name,
        project.status.as_str(),
        progress_bar(project.progress),
        project.progress,
        project.tasks,
        if project.tasks == 1 { "" } else { "s" }
    );
    if !project.description.is_empty() {
        block.push_str(&format!("    {}\n", project.description));
    }
    block
}

pub fn projects_view(store: &RecordStore) -> String {
    if store.projects.is_empty() {
        return super::empty_line("projects");
    }
    store.projects.iter().map(project_block).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_with_progress() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn block_shows_status_and_description() {
        let mut store = RecordStore::default();
        let mut p = Project::new("Kitchen", "New cabinets");
        p.set_progress(30);
        store.projects.push(p);
        let view = projects_view(&store);
        assert!(view.contains("Kitchen (active)"));
        assert!(view.contains(" 30%"));
        assert!(view.contains("New cabinets"));
    }
}
