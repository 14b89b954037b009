use crate::store::RecordStore;

fn mask_key(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

pub fn settings_view(store: &RecordStore) -> String {
    let settings = &store.settings;
    let mut out = String::new();
    out.push_str(&format!(
        "  Dark mode: {}\n",
        if settings.dark_mode { "on" } else { "off" }
    ));
    out.push_str(&format!("  API key:   {}\n", mask_key(&settings.api_key)));
    out.push_str(&format!(
        "  Records:   {} inbox, {} tasks, {} projects, {} ideas, {} contacts\n",
        store.inbox.len(),
        store.tasks.len(),
        store.projects.len(),
        store.ideas.len(),
        store.contacts.len()
    ));
    out.push_str(
        "  Backup with `export [path]`, restore with `import <path>`, reset with `clear`.\n",
    );
    out
}
