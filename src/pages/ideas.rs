use crate::core::idea::Idea;
use crate::store::RecordStore;

/// Ideas grouped by category, best rated first within each group.
pub fn ideas_view(store: &RecordStore) -> String {
    if store.ideas.is_empty() {
        return super::empty_line("ideas");
    }

    let mut sorted: Vec<&Idea> = store.ideas.iter().collect();
    sorted.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| b.potential.cmp(&a.potential))
    });

    let mut out = String::new();
    let mut current: Option<&str> = None;
    for idea in sorted {
        if current != Some(idea.category.as_str()) {
            out.push_str(&format!("  # {}\n", idea.category));
            current = Some(idea.category.as_str());
        }
        out.push_str(&format!(
            "    {}  {}  {} ({})\n",
            idea.id.short(),
            idea.stars(),
            idea.text,
            idea.status.as_str()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_by_category_then_rating() {
        let mut store = RecordStore::default();
        let mut a = Idea::new("meh");
        a.rate(1);
        let mut b = Idea::new("great");
        b.rate(5);
        let mut c = Idea::new("side gig");
        c.category = "business".into();
        store.ideas = vec![a, b, c];

        let view = ideas_view(&store);
        assert!(view.find("# business").unwrap() < view.find("# general").unwrap());
        assert!(view.find("great").unwrap() < view.find("meh").unwrap());
    }
}
