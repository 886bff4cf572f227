//! HabitQuest CLI - dailies, todos, streaks and levels from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use habitquest_core::{
    titles_from_lines, Difficulty, ItemId, ItemKind, ItemUpdate, Label, LabelColor, LabelId,
    NewItem, TrackableItem,
};
use habitquest_engine::{EngineConfig, ProgressionEngine};
use habitquest_progress::ProgressSummary;
use habitquest_storage::{JsonSnapshotStore, SnapshotStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "habitquest")]
#[command(about = "Track dailies and todos, earn experience and gold", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the saved state
    #[arg(long, env = "HABITQUEST_DATA_DIR", default_value = ".habitquest")]
    data_dir: std::path::PathBuf,

    /// Dailies may not be trivial; todos keep no streak
    #[arg(long)]
    strict: bool,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one item per title (multi-line titles add one item per line)
    Add {
        /// daily or todo
        kind: ItemKind,
        /// Titles
        #[arg(required = true)]
        titles: Vec<String>,
        /// trivial, easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,
        /// Description applied to every added item
        #[arg(long)]
        description: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit an item
    Edit {
        /// Item ID
        id: ItemId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New difficulty
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// New description (empty to clear)
        #[arg(long)]
        description: Option<String>,
        /// Replacement tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },
    /// Complete or reopen an item
    Toggle {
        /// Item ID
        id: ItemId,
    },
    /// Delete an item
    Delete {
        /// Item ID
        id: ItemId,
    },
    /// List items
    List {
        /// Only this kind
        #[arg(long)]
        kind: Option<ItemKind>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Show level, experience, gold and completion stats
    Stats {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage labels
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },
    /// Show the label colour palette
    Palette,
}

#[derive(Subcommand)]
enum LabelCommands {
    /// Add a label
    Add {
        /// Label name
        name: String,
        /// Palette colour, by name or hex
        #[arg(short, long, default_value = "red")]
        color: LabelColor,
    },
    /// Rename or recolour a label
    Edit {
        /// Label ID
        id: LabelId,
        /// New name
        name: String,
        /// Palette colour, by name or hex
        #[arg(short, long, default_value = "red")]
        color: LabelColor,
    },
    /// Delete a label
    Delete {
        /// Label ID
        id: LabelId,
    },
    /// List labels
    List,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut store = JsonSnapshotStore::new(&cli.data_dir)
        .await
        .with_context(|| format!("opening data directory {}", cli.data_dir.display()))?;

    let config = if cli.strict { EngineConfig::strict() } else { EngineConfig::default() };
    let engine = match store.load().await? {
        Some(snapshot) => ProgressionEngine::restore(snapshot)?,
        None => {
            debug!("No saved state, starting fresh");
            ProgressionEngine::new()
        }
    };
    let mut engine = engine.with_config(config);

    if run(&mut engine, cli.command)? {
        store.save(&engine.snapshot()).await?;
    }

    Ok(())
}

/// Execute one command. Returns whether the state changed.
fn run(engine: &mut ProgressionEngine, command: Commands) -> Result<bool> {
    match command {
        Commands::Add { kind, titles, difficulty, description, tags } => {
            let titles: Vec<String> = titles.iter().flat_map(|t| titles_from_lines(t)).collect();
            if titles.is_empty() {
                anyhow::bail!("nothing to add: every title was blank");
            }
            for title in titles {
                let mut request = NewItem::new(kind, title)
                    .with_difficulty(difficulty)
                    .with_tags(tags.clone());
                request.description = description.clone();
                let item = engine.create_item(request)?;
                println!("Added {}: {} - {}", item.kind, item.id, item.title);
            }
            Ok(true)
        }
        Commands::Edit { id, title, difficulty, description, tags, clear_tags } => {
            let update = ItemUpdate {
                title,
                difficulty,
                description,
                tags: if clear_tags {
                    Some(Vec::new())
                } else if tags.is_empty() {
                    None
                } else {
                    Some(tags)
                },
            };
            if update.is_empty() {
                println!("Nothing to change");
                return Ok(false);
            }
            let item = engine.update_item(id, update)?;
            print_item(&item);
            Ok(true)
        }
        Commands::Toggle { id } => {
            let outcome = engine.toggle_completion(id)?;
            let item = &outcome.item;
            if item.completed {
                let reward = item.reward();
                println!(
                    "Completed: {} (+{} exp, +{} gold, streak {})",
                    item.title, reward.experience, reward.gold, item.streak
                );
            } else {
                println!("Reopened: {}", item.title);
            }
            if outcome.levels_gained > 0 {
                info!("Level up to {}", outcome.stats.level);
                println!("Level up! You are now level {}", outcome.stats.level);
            }
            Ok(true)
        }
        Commands::Delete { id } => match engine.delete_item(id) {
            Some(item) => {
                println!("Deleted: {}", item.title);
                Ok(true)
            }
            None => {
                println!("Item not found");
                Ok(false)
            }
        },
        Commands::List { kind, json } => {
            let items = engine.list_items(kind);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
                return Ok(false);
            }
            println!("Items ({})", items.len());
            for item in &items {
                println!(
                    "  {} | {} | {} | {:<7} | streak {} - {}",
                    item.id,
                    format_check(item.completed),
                    format_kind(item.kind),
                    item.difficulty,
                    item.streak,
                    item.title,
                );
            }
            Ok(false)
        }
        Commands::Stats { json } => {
            let summary = ProgressSummary::from_source(&*engine);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(false);
            }
            println!("Your Progress");
            println!("  Level: {}", summary.level);
            println!("  Experience: {}/{}", summary.experience, habitquest_core::EXPERIENCE_PER_LEVEL);
            println!("  Gold: {}", summary.gold);
            println!("  Health: {}", summary.health);
            println!("  Total streaks: {}", summary.total_streak);
            println!(
                "  Completed: {} of {} ({:.1}%)",
                summary.completed_items, summary.total_items, summary.completion_rate
            );
            for row in &summary.breakdown {
                println!("  {}: {} ({} completed)", format_kind(row.kind), row.total, row.completed);
            }
            Ok(false)
        }
        Commands::Label { command } => run_label(engine, command),
        Commands::Palette => {
            for color in LabelColor::ALL {
                println!("  {} {}", color.hex(), color.name());
            }
            Ok(false)
        }
    }
}

fn run_label(engine: &mut ProgressionEngine, command: LabelCommands) -> Result<bool> {
    match command {
        LabelCommands::Add { name, color } => {
            let label = engine.add_label(&name, color)?;
            print_label(&label);
            Ok(true)
        }
        LabelCommands::Edit { id, name, color } => {
            let label = engine.update_label(id, &name, color)?;
            print_label(&label);
            Ok(true)
        }
        LabelCommands::Delete { id } => Ok(engine.delete_label(id).is_some()),
        LabelCommands::List => {
            let labels = engine.labels().list();
            println!("Labels ({})", labels.len());
            for label in labels {
                print_label(label);
            }
            Ok(false)
        }
    }
}

fn print_item(item: &TrackableItem) {
    println!("Item: {}", item.id);
    println!("  Title: {}", item.title);
    if let Some(description) = &item.description {
        println!("  Description: {}", description);
    }
    println!("  Kind: {}", format_kind(item.kind));
    println!("  Difficulty: {}", item.difficulty);
    println!("  Completed: {}", item.completed);
    println!("  Streak: {}", item.streak);
    if !item.tags.is_empty() {
        println!("  Tags: {}", item.tags.join(", "));
    }
    println!("  Created: {}", item.created_at);
}

fn print_label(label: &Label) {
    println!("  {} | {} {} | {}", label.id, label.color.hex(), label.color, label.name);
}

fn format_kind(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Daily => "DAILY",
        ItemKind::Todo => "TODO",
    }
}

fn format_check(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("habitquest").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn add_splits_multi_line_titles() {
        let mut engine = ProgressionEngine::new();
        let cli = parse(&["add", "daily", "Drink water\n\nStretch", "Read", "-d", "easy"]);
        assert!(run(&mut engine, cli.command).unwrap());

        let titles: Vec<_> = engine.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Drink water", "Stretch", "Read"]);
        assert!(engine.items().iter().all(|i| i.difficulty == Difficulty::Easy));
    }

    #[test]
    fn add_with_only_blank_titles_fails() {
        let mut engine = ProgressionEngine::new();
        let cli = parse(&["add", "todo", "  \n "]);
        assert!(run(&mut engine, cli.command).is_err());
        assert!(engine.items().is_empty());
    }

    #[test]
    fn toggle_and_list_do_not_mark_state_dirty_when_read_only() {
        let mut engine = ProgressionEngine::new();
        let item = engine.create_item(NewItem::todo("x")).unwrap();

        let toggle = parse(&["toggle", &item.id.to_string()]);
        assert!(run(&mut engine, toggle.command).unwrap());
        assert!(engine.get_item(item.id).unwrap().completed);

        let list = parse(&["list", "--kind", "todo"]);
        assert!(!run(&mut engine, list.command).unwrap());
    }

    #[test]
    fn label_colour_accepts_names() {
        let mut engine = ProgressionEngine::new();
        let cli = parse(&["label", "add", "health", "--color", "light_green"]);
        assert!(run(&mut engine, cli.command).unwrap());
        assert_eq!(engine.labels().list()[0].color, LabelColor::LightGreen);
    }

    #[test]
    fn edit_clear_tags_empties_tags() {
        let mut engine = ProgressionEngine::new();
        let item = engine
            .create_item(NewItem::todo("x").with_tags(vec!["home".into(), "chores".into()]))
            .unwrap();

        let cli = parse(&["edit", &item.id.to_string(), "--clear-tags"]);
        assert!(run(&mut engine, cli.command).unwrap());

        let edited = engine.get_item(item.id).unwrap();
        assert!(edited.tags.is_empty());
        assert_eq!(edited.title, "x");
    }

    #[test]
    fn edit_without_flags_changes_nothing() {
        let mut engine = ProgressionEngine::new();
        let item = engine.create_item(NewItem::daily("Read")).unwrap();

        let cli = parse(&["edit", &item.id.to_string()]);
        assert!(!run(&mut engine, cli.command).unwrap());
        assert_eq!(engine.get_item(item.id), Some(&item));
    }

    #[test]
    fn clear_tags_conflicts_with_tag() {
        let args = ["habitquest", "edit", "01ARZ3NDEKTSV4RRFFQ69G5FAV", "--tag", "a", "--clear-tags"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let mut engine = ProgressionEngine::new();
        let item = engine.create_item(NewItem::todo("x")).unwrap();

        let delete = parse(&["delete", &item.id.to_string()]);
        assert!(run(&mut engine, delete.command).unwrap());
        assert!(engine.items().is_empty());

        let again = parse(&["delete", &item.id.to_string()]);
        assert!(!run(&mut engine, again.command).unwrap());
    }

    #[test]
    fn label_edit_and_delete() {
        let mut engine = ProgressionEngine::new();
        let label = engine.add_label("work", LabelColor::Blue).unwrap();
        let id = label.id.to_string();

        let edit = parse(&["label", "edit", &id, "focus", "-c", "amber"]);
        assert!(run(&mut engine, edit.command).unwrap());
        let edited = engine.labels().get(label.id).unwrap();
        assert_eq!(edited.name, "focus");
        assert_eq!(edited.color, LabelColor::Amber);

        let delete = parse(&["label", "delete", &id]);
        assert!(run(&mut engine, delete.command).unwrap());
        assert!(engine.labels().is_empty());

        let again = parse(&["label", "delete", &id]);
        assert!(!run(&mut engine, again.command).unwrap());
    }

    #[test]
    fn label_edit_unknown_id_fails() {
        let mut engine = ProgressionEngine::new();
        let cli = parse(&["label", "edit", &LabelId::new().to_string(), "x"]);
        assert!(run(&mut engine, cli.command).is_err());
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let args = ["habitquest", "add", "weekly", "x"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
