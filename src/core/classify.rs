//! Rule-based classification of captured text.
//!
//! Three keyword groups are checked in order (task, idea, link) with a
//! case-insensitive substring match. The first group with any hit decides the
//! type. When nothing matches the caller keeps whatever type it had.

use super::inbox::{InboxItem, ItemType};

const TASK_MARKERS: &[&str] = &["task:", "todo:", "need to", "must", "should"];
const IDEA_MARKERS: &[&str] = &["idea:", "what if", "maybe", "could"];
const LINK_MARKERS: &[&str] = &["http://", "https://", ".com", ".org"];

const RULES: &[(&[&str], ItemType)] = &[
    (TASK_MARKERS, ItemType::Task),
    (IDEA_MARKERS, ItemType::Idea),
    (LINK_MARKERS, ItemType::Link),
];

/// Texts longer than this get a summary.
pub const SUMMARY_THRESHOLD: usize = 50;
const SUMMARY_PREFIX_CHARS: usize = 47;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// `None` when no keyword group matched.
    pub item_type: Option<ItemType>,
    /// Empty unless the text exceeds [`SUMMARY_THRESHOLD`] characters.
    pub summary: String,
}

pub fn classify(text: &str) -> Classification {
    Classification {
        item_type: detect_type(text),
        summary: summarize(text),
    }
}

pub fn detect_type(text: &str) -> Option<ItemType> {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lower.contains(m)))
        .map(|(_, item_type)| *item_type)
}

pub fn summarize(text: &str) -> String {
    if text.chars().count() <= SUMMARY_THRESHOLD {
        return String::new();
    }
    let mut summary: String = text.chars().take(SUMMARY_PREFIX_CHARS).collect();
    summary.push_str(ELLIPSIS);
    summary
}

/// Run the classifier over an inbox item in place.
///
/// Returns the type the item ends up with.
pub fn classify_item(item: &mut InboxItem) -> ItemType {
    let Classification { item_type, summary } = classify(&item.text);
    if let Some(t) = item_type {
        item.item_type = t;
    }
    item.ai_summary = summary;
    item.item_type
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_markers() {
        assert_eq!(detect_type("TODO: renew passport"), Some(ItemType::Task));
        assert_eq!(detect_type("I need to call mom"), Some(ItemType::Task));
        assert_eq!(detect_type("We should ship on Friday"), Some(ItemType::Task));
    }

    #[test]
    fn idea_markers() {
        assert_eq!(detect_type("What if the app had themes"), Some(ItemType::Idea));
        assert_eq!(detect_type("idea: weekly newsletter"), Some(ItemType::Idea));
    }

    #[test]
    fn link_markers() {
        assert_eq!(detect_type("https://rust-lang.org"), Some(ItemType::Link));
        assert_eq!(detect_type("check example.com later"), Some(ItemType::Link));
    }

    #[test]
    fn no_match_leaves_type_unset() {
        assert_eq!(detect_type("Nice weather today"), None);
    }

    #[test]
    fn task_group_wins_over_link_group() {
        let c = classify("need to check http://x.com");
        assert_eq!(c.item_type, Some(ItemType::Task));
    }

    #[test]
    fn task_group_wins_regardless_of_position() {
        assert_eq!(detect_type("maybe we must rethink this"), Some(ItemType::Task));
        assert_eq!(detect_type("https://a.org could be useful"), Some(ItemType::Idea));
    }

    #[test]
    fn summary_truncation_boundary() {
        let fifty = "a".repeat(50);
        assert!(summarize(&fifty).is_empty());

        let fifty_one = "b".repeat(51);
        let s = summarize(&fifty_one);
        assert_eq!(s.chars().count(), 50);
        assert!(s.starts_with(&"b".repeat(47)));
        assert!(s.ends_with("..."));
    }

    #[test]
    fn summary_counts_characters_not_bytes() {
        let text = "é".repeat(51);
        let s = summarize(&text);
        assert_eq!(s.chars().count(), 50);
    }

    #[test]
    fn reclassifying_an_item_is_stable() {
        let samples = [
            "need to check http://x.com",
            "what if we tried a shorter standup format for the whole team this quarter",
            "plain thought",
            "read https://example.org/post",
        ];
        for text in samples {
            let mut item = InboxItem::capture(text).unwrap();
            let first_type = classify_item(&mut item);
            let first_summary = item.ai_summary.clone();

            let second_type = classify_item(&mut item);
            assert_eq!(first_type, second_type, "{}", text);
            assert_eq!(item.item_type, first_type);
            assert_eq!(item.ai_summary, first_summary);
        }
    }
}
