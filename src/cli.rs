use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use second_brain::core::project::ProjectStatus;
use second_brain::core::record::parse_date;
use second_brain::core::task::Priority;
use second_brain::pages::Page;

#[derive(Debug, Parser)]
#[command(
    name = "second-brain",
    version,
    about = "Inbox, tasks, projects, ideas and contacts in one place",
    after_help = "Words that are not a command are captured to the inbox."
)]
pub struct Cli {
    /// Log debug detail to the journal.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Defaults to showing the dashboard.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Show a page.
    View {
        /// dashboard | inbox | tasks | projects | ideas | contacts | assistant | settings
        #[arg(value_parser = page_arg)]
        page: Option<Page>,
    },

    /// Add to the inbox (classified on capture).
    Capture {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Re-run the classifier on an inbox item.
    Classify { id: String },

    /// Move an inbox item into tasks.
    ToTask { id: String },

    /// Move an inbox item into ideas.
    ToIdea { id: String },

    /// Mark an inbox item processed.
    Done { id: String },

    /// Delete an inbox item.
    #[command(name = "drop")]
    Discard { id: String },

    /// Manage tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage ideas.
    Idea {
        #[command(subcommand)]
        action: IdeaAction,
    },

    /// Manage contacts.
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },

    /// Talk to the assistant.
    Ask {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },

    /// Switch the dark theme on or off.
    DarkMode {
        #[arg(value_enum)]
        switch: Switch,
    },

    /// Store the assistant API key.
    ApiKey { key: String },

    /// Write a JSON backup (defaults to a dated file name).
    Export { path: Option<PathBuf> },

    /// Replace everything with a JSON backup.
    Import { path: PathBuf },

    /// Delete everything, settings included.
    Clear {
        /// Required; nothing is deleted without it.
        #[arg(long)]
        yes: bool,
    },

    #[command(external_subcommand)]
    Text(Vec<String>),
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum TaskAction {
    /// Add a task.
    Add {
        #[arg(required = true)]
        text: Vec<String>,

        #[arg(long, value_parser = priority_arg, default_value = "medium")]
        priority: Priority,

        /// Due date, YYYY-MM-DD.
        #[arg(long, value_parser = date_arg)]
        due: Option<NaiveDate>,

        /// Project name.
        #[arg(long)]
        project: Option<String>,

        /// Context tag such as @phone. Repeatable.
        #[arg(long)]
        context: Vec<String>,
    },
    /// Complete or reopen a task.
    Toggle { id: String },
    /// Delete a task.
    #[command(name = "rm")]
    Remove { id: String },
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum ProjectAction {
    /// Add a project.
    Add {
        #[arg(required = true)]
        name: Vec<String>,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Set progress, 0-100.
    Progress {
        id: String,
        #[arg(value_parser = percent_arg, allow_negative_numbers = true)]
        percent: i64,
    },
    /// Set status: active | on-hold | completed.
    Status {
        id: String,
        #[arg(value_parser = status_arg)]
        status: ProjectStatus,
    },
    /// Delete a project.
    #[command(name = "rm")]
    Remove { id: String },
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum IdeaAction {
    /// Add an idea.
    Add {
        #[arg(required = true)]
        text: Vec<String>,

        #[arg(long)]
        category: Option<String>,
    },
    /// Rate potential, 1-5.
    Rate {
        id: String,
        #[arg(allow_negative_numbers = true)]
        potential: i64,
    },
    /// Delete an idea.
    #[command(name = "rm")]
    Remove { id: String },
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum ContactAction {
    /// Add a contact.
    Add {
        #[arg(required = true)]
        name: Vec<String>,

        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        relationship: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, value_parser = date_arg)]
        follow_up: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Record that you were in touch today.
    Touched { id: String },
    /// Set the next follow-up date, or `none` to clear it.
    FollowUp {
        id: String,
        #[arg(value_parser = follow_up_arg)]
        date: FollowUp,
    },
    /// Delete a contact.
    #[command(name = "rm")]
    Remove { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

/// A follow-up date argument; `none` clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp(pub Option<NaiveDate>);

fn page_arg(s: &str) -> Result<Page, String> {
    Page::from_slug(s).ok_or_else(|| format!("unknown page `{}`", s))
}

fn priority_arg(s: &str) -> Result<Priority, String> {
    Priority::from_name(s).ok_or_else(|| format!("invalid priority `{}`", s))
}

fn status_arg(s: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::from_name(s).ok_or_else(|| format!("invalid status `{}`", s))
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date `{}` (expected YYYY-MM-DD)", s))
}

fn follow_up_arg(s: &str) -> Result<FollowUp, String> {
    match s {
        "none" | "-" => Ok(FollowUp(None)),
        s => date_arg(s).map(|d| FollowUp(Some(d))),
    }
}

fn percent_arg(s: &str) -> Result<i64, String> {
    s.trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("invalid percentage `{}`", s))
}
