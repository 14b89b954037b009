use crate::store::RecordStore;

pub fn assistant_view(store: &RecordStore) -> String {
    let mode = if store.settings.api_key.trim().is_empty() {
        "offline (no API key set; replies come from your local data)"
    } else {
        "online (falls back to offline replies if the request fails)"
    };
    format!(
        "  Mode: {}\n  Ask with `ask <question>`, e.g. `ask what should I focus on today?`\n",
        mode
    )
}
