//! Text views over the store, one per page.

pub mod assistant;
pub mod contacts;
pub mod dashboard;
pub mod ideas;
pub mod inbox;
pub mod projects;
pub mod settings;
pub mod tasks;

use chrono::NaiveDate;

use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Inbox,
    Tasks,
    Projects,
    Ideas,
    Contacts,
    Assistant,
    Settings,
}

impl Page {
    pub const ALL: &'static [Self] = &[
        Self::Dashboard,
        Self::Inbox,
        Self::Tasks,
        Self::Projects,
        Self::Ideas,
        Self::Contacts,
        Self::Assistant,
        Self::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Inbox => "Inbox",
            Self::Tasks => "Tasks",
            Self::Projects => "Projects",
            Self::Ideas => "Ideas",
            Self::Contacts => "Contacts",
            Self::Assistant => "AI Assistant",
            Self::Settings => "Settings",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Inbox => "inbox",
            Self::Tasks => "tasks",
            Self::Projects => "projects",
            Self::Ideas => "ideas",
            Self::Contacts => "contacts",
            Self::Assistant => "assistant",
            Self::Settings => "settings",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|p| p.slug() == s)
    }
}

/// Render a page to plain text.
pub fn render(page: Page, store: &RecordStore, today: NaiveDate) -> String {
    let body = match page {
        Page::Dashboard => dashboard::dashboard_view(store, today),
        Page::Inbox => inbox::inbox_view(store),
        Page::Tasks => tasks::tasks_view(store, today),
        Page::Projects => projects::projects_view(store),
        Page::Ideas => ideas::ideas_view(store),
        Page::Contacts => contacts::contacts_view(store, today),
        Page::Assistant => assistant::assistant_view(store),
        Page::Settings => settings::settings_view(store),
    };
    format!("== {} ==\n{}", page.title(), body)
}

/// Shared "nothing here" line.
pub(crate) fn empty_line(what: &str) -> String {
    format!("  (no {} yet)\n", what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(*page));
        }
        assert_eq!(Page::from_slug(" INBOX "), Some(Page::Inbox));
        assert_eq!(Page::from_slug("calendar"), None);
    }

    #[test]
    fn every_page_renders_an_empty_store() {
        let store = RecordStore::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        for page in Page::ALL {
            let out = render(*page, &store, today);
            assert!(out.starts_with(&format!("== {} ==", page.title())));
        }
    }
}
