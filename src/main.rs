mod cli;

use std::process::ExitCode;

use clap::Parser;

use second_brain::application::{self, NewContact, NewTask, SecondBrain};
use second_brain::assistant::{Assistant, ReplySource};
use second_brain::config::BrainConfig;
use second_brain::pages::{self, Page};
use second_brain::store::{Collection, FileStorage, Persistence, backup_file_name};

use cli::{Cli, Command, ContactAction, IdeaAction, ProjectAction, TaskAction};

/// Log to the systemd user journal (`journalctl --user -t second-brain -f`).
/// Our own records pass at info (debug when enabled), everything else at warn.
fn init_logging() {
    struct FilteredJournal {
        inner: systemd_journal_logger::JournalLog,
    }

    impl log::Log for FilteredJournal {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            if metadata.target().starts_with("second_brain") {
                let max = if second_brain::debug_logging() {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                };
                metadata.level() <= max
            } else {
                metadata.level() <= log::LevelFilter::Warn
            }
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.inner.log(record);
            }
        }
        fn flush(&self) {
            self.inner.flush();
        }
    }

    let journal = match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => journal.with_syslog_identifier("second-brain".to_string()),
        Err(e) => {
            eprintln!("Journal unavailable, logging disabled: {}", e);
            return;
        }
    };

    if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
        // Global max must be Debug so our debug logs can pass when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }
}

fn not_found(what: &str, needle: &str) -> ExitCode {
    eprintln!("No {} matches `{}`", what, needle);
    ExitCode::FAILURE
}

async fn run(command: Command, brain: &mut SecondBrain, config: &BrainConfig) -> ExitCode {
    let today = application::today();

    // Resolve an id (or unique prefix) within a collection, or bail out.
    macro_rules! resolve {
        ($collection:expr, $needle:expr, $what:expr) => {
            match brain.resolve($collection, &$needle) {
                Some(id) => id,
                None => return not_found($what, &$needle),
            }
        };
    }

    match command {
        Command::View { page } => {
            let page = page.unwrap_or(Page::Dashboard);
            print!("{}", pages::render(page, brain.store(), today));
        }

        Command::Capture { text } | Command::Text(text) => {
            let text = text.join(" ");
            match brain.capture(&text) {
                Some(id) => {
                    let item = brain.store().inbox.iter().find(|i| i.id == id);
                    let kind = item.map(|i| i.item_type.as_str()).unwrap_or("thought");
                    println!("Captured {} as {}", id.short(), kind);
                }
                None => {
                    eprintln!("Nothing to capture");
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::Classify { id } => {
            let id = resolve!(Collection::Inbox, id, "inbox item");
            if let Some(kind) = brain.classify_inbox_item(&id) {
                println!("{} is now {}", id.short(), kind.as_str());
            }
        }
        Command::ToTask { id } => {
            let id = resolve!(Collection::Inbox, id, "inbox item");
            if let Some(task) = brain.convert_to_task(&id) {
                println!("Created task {}", task.short());
            }
        }
        Command::ToIdea { id } => {
            let id = resolve!(Collection::Inbox, id, "inbox item");
            if let Some(idea) = brain.convert_to_idea(&id) {
                println!("Created idea {}", idea.short());
            }
        }
        Command::Done { id } => {
            let id = resolve!(Collection::Inbox, id, "inbox item");
            brain.mark_inbox_done(&id);
        }
        Command::Discard { id } => {
            let id = resolve!(Collection::Inbox, id, "inbox item");
            brain.delete_inbox_item(&id);
        }

        Command::Task { action } => match action {
            TaskAction::Add {
                text,
                priority,
                due,
                project,
                context,
            } => {
                let fields = NewTask {
                    priority,
                    due_date: due,
                    project,
                    context,
                };
                if let Some(id) = brain.add_task(&text.join(" "), fields) {
                    println!("Added task {}", id.short());
                }
            }
            TaskAction::Toggle { id } => {
                let id = resolve!(Collection::Tasks, id, "task");
                match brain.toggle_task(&id) {
                    Some(true) => println!("Completed {}", id.short()),
                    Some(false) => println!("Reopened {}", id.short()),
                    None => {}
                }
            }
            TaskAction::Remove { id } => {
                let id = resolve!(Collection::Tasks, id, "task");
                brain.delete_task(&id);
            }
        },

        Command::Project { action } => match action {
            ProjectAction::Add { name, description } => {
                if let Some(id) = brain.add_project(&name.join(" "), &description) {
                    println!("Added project {}", id.short());
                }
            }
            ProjectAction::Progress { id, percent } => {
                let id = resolve!(Collection::Projects, id, "project");
                if let Some(progress) = brain.set_project_progress(&id, percent) {
                    println!("{} is {}% done", id.short(), progress);
                }
            }
            ProjectAction::Status { id, status } => {
                let id = resolve!(Collection::Projects, id, "project");
                brain.set_project_status(&id, status);
            }
            ProjectAction::Remove { id } => {
                let id = resolve!(Collection::Projects, id, "project");
                brain.delete_project(&id);
            }
        },

        Command::Idea { action } => match action {
            IdeaAction::Add { text, category } => {
                if let Some(id) = brain.add_idea(&text.join(" "), category.as_deref()) {
                    println!("Added idea {}", id.short());
                }
            }
            IdeaAction::Rate { id, potential } => {
                let id = resolve!(Collection::Ideas, id, "idea");
                if let Some(rating) = brain.rate_idea(&id, potential) {
                    println!("Rated {} {}/5", id.short(), rating);
                }
            }
            IdeaAction::Remove { id } => {
                let id = resolve!(Collection::Ideas, id, "idea");
                brain.delete_idea(&id);
            }
        },

        Command::Contact { action } => match action {
            ContactAction::Add {
                name,
                company,
                relationship,
                email,
                phone,
                follow_up,
                notes,
            } => {
                let fields = NewContact {
                    company,
                    relationship,
                    email,
                    phone,
                    next_follow_up: follow_up,
                    notes,
                };
                if let Some(id) = brain.add_contact(&name.join(" "), fields) {
                    println!("Added contact {}", id.short());
                }
            }
            ContactAction::Touched { id } => {
                let id = resolve!(Collection::Contacts, id, "contact");
                brain.log_contact(&id, today);
            }
            ContactAction::FollowUp { id, date } => {
                let id = resolve!(Collection::Contacts, id, "contact");
                brain.set_follow_up(&id, date.0);
            }
            ContactAction::Remove { id } => {
                let id = resolve!(Collection::Contacts, id, "contact");
                brain.delete_contact(&id);
            }
        },

        Command::Ask { question } => {
            let assistant = Assistant::new(config);
            let store = brain.store();
            let reply = assistant
                .ask(&store.settings.api_key, store, &question.join(" "), today)
                .await;
            println!("{}", reply.text);
            if reply.source == ReplySource::Offline {
                println!("(offline reply)");
            }
        }
        Command::DarkMode { switch } => brain.set_dark_mode(switch.enabled()),
        Command::ApiKey { key } => brain.set_api_key(&key),

        Command::Export { path } => {
            let path = path.unwrap_or_else(|| backup_file_name(today).into());
            let document = match brain.export_json() {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Export failed: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = std::fs::write(&path, document) {
                eprintln!("Export failed: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            println!("Exported to {}", path.display());
        }
        Command::Import { path } => {
            let document = match std::fs::read_to_string(&path) {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Import failed: {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = brain.import_json(&document) {
                eprintln!("Import failed, nothing was changed: {}", e);
                return ExitCode::FAILURE;
            }
            println!("Imported {}", path.display());
        }
        Command::Clear { yes } => {
            if !yes {
                eprintln!("This deletes everything. Run `clear --yes` to confirm.");
                return ExitCode::FAILURE;
            }
            brain.clear_all();
            println!("All data cleared");
        }
    }

    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();
    let config = BrainConfig::load(&BrainConfig::default_path());
    second_brain::set_debug_logging(config.debug_logging || cli.debug);

    log::debug!("Using store at {}", config.store_path().display());
    let mut brain = SecondBrain::open(Persistence::new(FileStorage::new(config.store_path())));

    let command = cli.command.unwrap_or(Command::View { page: None });
    run(command, &mut brain, &config).await
}
