//! Terminal front end: parses arguments into [`Command`]s and prints the list view.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lostfound_core::{Entity, Field, ItemId};
use lostfound_inventory::{ItemDraft, ItemStatus};

use crate::app::{App, CATEGORIES, Command};
use crate::config::StoreConfig;
use crate::store::{ItemStore, StoreResult};
use crate::types::{ItemCard, ItemListView, Outcome};

#[derive(Debug, Parser)]
#[command(name = "lostfound", version, about = "Track lost-and-found items")]
pub struct Cli {
    /// Database file (defaults to $LOSTFOUND_DB_PATH, then the app data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print listings as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Raw item fields. Anything omitted is treated as empty when adding.
#[derive(Debug, Default, Args)]
pub struct ItemFields {
    #[arg(long)]
    pub name: Option<String>,

    /// One of Electronics, Clothing, Books, Misc (other values are accepted)
    #[arg(long)]
    pub category: Option<String>,

    /// YYYY-MM-DD, not in the future
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Lost, Found or Claimed
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long = "contact")]
    pub contact_info: Option<String>,
}

impl ItemFields {
    fn into_pairs(self) -> [(Field, Option<String>); 6] {
        [
            (Field::Name, self.name),
            (Field::Category, self.category),
            (Field::Date, self.date),
            (Field::Location, self.location),
            (Field::Status, self.status),
            (Field::ContactInfo, self.contact_info),
        ]
    }

    pub fn into_draft(self) -> ItemDraft {
        let mut draft = ItemDraft::default();
        for (field, value) in self.into_pairs() {
            draft.set(field, value);
        }
        draft
    }

    /// Overwrite only the fields that were given.
    pub fn apply_to(self, draft: &mut ItemDraft) {
        for (field, value) in self.into_pairs() {
            if value.is_some() {
                draft.set(field, value);
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new item
    Add(ItemFields),
    /// List every item
    List,
    /// Change fields of a stored item
    Edit {
        id: ItemId,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Change only the status of a stored item
    SetStatus { id: ItemId, status: String },
    /// Delete one or more items
    Delete {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },
    /// Case-insensitive search in name, location and category
    Search {
        #[arg(default_value = "")]
        keyword: String,
    },
    /// Exact match on category and/or status
    Filter {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Show the suggested categories
    Categories,
}

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.log_json {
        lostfound_observability::init_json();
    } else {
        lostfound_observability::init();
    }

    let config = match cli.db {
        Some(path) => StoreConfig::at(path),
        None => StoreConfig::from_env()?,
    };
    let store = ItemStore::open(&config)
        .with_context(|| format!("failed to open item store at {:?}", config.db_path))?;
    let mut app = App::new(store);

    let (outcome, show_list) = match cli.command {
        Commands::Add(fields) => (app.dispatch(Command::Add(fields.into_draft()))?, false),
        Commands::List => (Outcome::ViewChanged, true),
        Commands::Edit { id, fields } => match app.store().get(id)? {
            Some(item) => {
                let mut draft = item.to_draft();
                fields.apply_to(&mut draft);
                (app.dispatch(Command::Edit(draft))?, false)
            }
            None => (Outcome::NotFound(Some(id)), false),
        },
        Commands::SetStatus { id, status } => match status.parse::<ItemStatus>() {
            Ok(status) => (app.dispatch(Command::SetStatus { id, status })?, false),
            Err(err) => (Outcome::Rejected(err), false),
        },
        Commands::Delete { ids } => {
            let (deleted, missing) = delete_ids(&mut app, ids)?;
            let code = report(&Outcome::Deleted(deleted))?;
            for id in &missing {
                report(&Outcome::NotFound(Some(*id)))?;
            }
            return Ok(if missing.is_empty() {
                code
            } else {
                ExitCode::FAILURE
            });
        }
        Commands::Search { keyword } => (app.dispatch(Command::Search(keyword))?, true),
        Commands::Filter { category, status } => {
            let status = match status.as_deref().map(str::parse::<ItemStatus>).transpose() {
                Ok(status) => status,
                Err(err) => return report(&Outcome::Rejected(err)),
            };
            app.dispatch(Command::FilterCategory(category))?;
            (app.dispatch(Command::FilterStatus(status))?, true)
        }
        Commands::Categories => {
            let mut out = std::io::stdout().lock();
            for category in CATEGORIES {
                writeln!(out, "{category}")?;
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    if show_list {
        print_view(&app.render()?, cli.json)?;
    }
    report(&outcome)
}

/// Delete each id once; returns how many were removed and the ids that were not stored.
fn delete_ids(app: &mut App, ids: Vec<ItemId>) -> StoreResult<(usize, Vec<ItemId>)> {
    let ids: BTreeSet<ItemId> = ids.into_iter().collect();
    let mut deleted = 0;
    let mut missing = Vec::new();
    for id in ids {
        match app.dispatch(Command::Delete(id))? {
            Outcome::Deleted(n) => deleted += n,
            _ => missing.push(id),
        }
    }
    Ok((deleted, missing))
}

/// Print the outcome's status line; failures go to stderr and exit non-zero.
fn report(outcome: &Outcome) -> anyhow::Result<ExitCode> {
    if let Some(message) = outcome.message() {
        if outcome.is_success() {
            writeln!(std::io::stdout().lock(), "{message}")?;
        } else {
            writeln!(std::io::stderr().lock(), "{message}")?;
        }
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_view(view: &ItemListView, json: bool) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, view).context("failed to serialize item list")?;
        writeln!(out)?;
        return Ok(());
    }

    for card in &view.cards {
        writeln!(out, "{}", format_card(card))?;
    }
    writeln!(out, "{} of {} items", view.visible(), view.total)?;
    Ok(())
}

/// One line per item; fields matching the search are wrapped in `*`.
fn format_card(card: &ItemCard) -> String {
    let mark = |text: &str, hit: bool| {
        if hit {
            format!("*{text}*")
        } else {
            text.to_string()
        }
    };
    let item = &card.item;

    format!(
        "{sel}{id:>4}  [{status}]  {name} | {category} | {date} | {location} | {contact}",
        sel = if card.selected { '>' } else { ' ' },
        id = item.id().map(|id| id.to_string()).unwrap_or_default(),
        status = item.status(),
        name = mark(item.name(), card.highlight.name),
        category = mark(item.category(), card.highlight.category),
        date = item.date_string(),
        location = mark(item.location(), card.highlight.location),
        contact = item.contact_info(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;
    use lostfound_inventory::{Item, KeywordMatch};
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_missing_fields() {
        let cli = Cli::try_parse_from(["lostfound", "add", "--name", "Keys", "--status", "Lost"])
            .unwrap();
        let Commands::Add(fields) = cli.command else {
            panic!("expected add");
        };
        let draft = fields.into_draft();
        assert_eq!(draft.name.as_deref(), Some("Keys"));
        assert_eq!(draft.category, None);
        assert_eq!(draft.status.as_deref(), Some("Lost"));
    }

    #[test]
    fn edit_fields_only_override_given_values() {
        let mut draft = ItemDraft::new("Keys", "Misc", "2025-10-01", "Library", "Lost", "ann");
        let fields = ItemFields {
            location: Some("Gym".to_string()),
            ..ItemFields::default()
        };
        fields.apply_to(&mut draft);
        assert_eq!(draft.location.as_deref(), Some("Gym"));
        assert_eq!(draft.name.as_deref(), Some("Keys"));
    }

    #[test]
    fn delete_requires_ids() {
        assert!(Cli::try_parse_from(["lostfound", "delete"]).is_err());
        let cli = Cli::try_parse_from(["lostfound", "delete", "3", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { ids } if ids == [ItemId::new(3), ItemId::new(5)]));
    }

    #[test]
    fn card_marks_highlighted_fields() {
        let item = Item::from_stored(
            ItemId::new(12),
            "Checkered Scarf".to_string(),
            "Clothing".to_string(),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            "Hall A".to_string(),
            ItemStatus::Lost,
            "desk@uni.ac.uk".to_string(),
        );
        let card = ItemCard {
            highlight: KeywordMatch::of(&item, "scarf"),
            selected: true,
            item,
        };

        assert_eq!(
            format_card(&card),
            ">  12  [Lost]  *Checkered Scarf* | Clothing | 2025-02-03 | Hall A | desk@uni.ac.uk"
        );
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lostfound").chain(args.iter().copied())).unwrap()
    }

    fn exits_with(code: ExitCode, expected: ExitCode) -> bool {
        format!("{code:?}") == format!("{expected:?}")
    }

    #[test]
    fn add_then_list_against_a_fresh_database() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("cli.db");
        let db = db.to_str().unwrap();

        let added = run(cli(&[
            "--db", db, "add", "--name", "Blue Umbrella", "--category", "Misc",
            "--date", "2025-03-14", "--location", "Bus Stop", "--status", "Found",
            "--contact", "front desk",
        ]))
        .unwrap();
        assert!(exits_with(added, ExitCode::SUCCESS));

        let rejected = run(cli(&["--db", db, "add", "--name", "Gloves", "--status", "Lost"])).unwrap();
        assert!(exits_with(rejected, ExitCode::FAILURE));

        let listed = run(cli(&["--db", db, "--json", "list"])).unwrap();
        assert!(exits_with(listed, ExitCode::SUCCESS));

        let store = ItemStore::open(&StoreConfig::at(db)).unwrap();
        let items = store.get_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "Blue Umbrella");
        assert_eq!(items[0].status(), ItemStatus::Found);
    }

    #[test]
    fn deleting_unknown_ids_is_reported_and_fails() {
        let dir = TempDir::new().unwrap();
        let store = ItemStore::open(&StoreConfig::at(dir.path().join("cli.db"))).unwrap();
        let mut app = App::new(store);
        let Outcome::Added(id) = app
            .dispatch(Command::Add(ItemDraft::new(
                "Keys", "Misc", "2025-10-01", "Library", "Lost", "ann",
            )))
            .unwrap()
        else {
            panic!("expected Added");
        };

        let (deleted, missing) =
            delete_ids(&mut app, vec![ItemId::new(9999), id, id]).unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(missing, [ItemId::new(9999)]);

        let db = dir.path().join("cli.db");
        let code = run(cli(&["--db", db.to_str().unwrap(), "delete", "9999"])).unwrap();
        assert!(exits_with(code, ExitCode::FAILURE));
    }

    #[test]
    fn rejection_exits_with_failure() {
        let outcome = Outcome::Rejected(lostfound_core::ValidationError::FutureDate);
        let code = report(&outcome).unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }
}
