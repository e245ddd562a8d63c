use std::{error::Error, io::IsTerminal};

use clap::{Args, Parser, Subcommand};
use engine::{Currency, Engine, EntryDraft, EntryKind, RenameOutcome};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

use crate::error::Result;

mod error;
mod report;

#[derive(Parser, Debug)]
#[command(name = "tally_cli")]
#[command(about = "Inspect and edit a Tally ledger from the terminal")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./tally.db?mode=rwc")]
    database_url: String,

    /// Currency label used when printing amounts.
    #[arg(long, env = "TALLY_CURRENCY", default_value = "EUR", value_parser = parse_currency)]
    currency: Currency,

    /// Log filter level for the CLI and the engine.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ledger, the totals and the category breakdowns.
    Report(ReportArgs),
    /// Record an expense or an income.
    Add(AddArgs),
    /// Remove an entry by id.
    Delete(DeleteArgs),
    Category(Category),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Only show the breakdown of this kind.
    #[arg(long, value_parser = parse_kind)]
    kind: Option<EntryKind>,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(value_parser = parse_kind)]
    kind: EntryKind,
    /// ISO date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    category: String,
    #[arg(long, allow_hyphen_values = true)]
    amount: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    #[arg(value_parser = parse_kind)]
    kind: EntryKind,
    id: i64,
}

#[derive(Args, Debug)]
struct Category {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    List {
        #[arg(value_parser = parse_kind)]
        kind: EntryKind,
    },
    Add {
        #[arg(value_parser = parse_kind)]
        kind: EntryKind,
        name: String,
    },
    Rename {
        #[arg(value_parser = parse_kind)]
        kind: EntryKind,
        old: String,
        new: String,
    },
    Delete {
        #[arg(value_parser = parse_kind)]
        kind: EntryKind,
        name: String,
    },
}

fn parse_currency(raw: &str) -> std::result::Result<Currency, String> {
    raw.parse::<Currency>().map_err(|err| err.to_string())
}

fn parse_kind(raw: &str) -> std::result::Result<EntryKind, String> {
    raw.parse().map_err(|_| format!("expected 'expense' or 'income', got '{raw}'"))
}

fn unchanged_message(kind: EntryKind, old: &str, new: &str) -> String {
    if old.split_whitespace().eq(new.split_whitespace()) {
        format!("nothing to rename: '{old}' and '{new}' are the same name")
    } else {
        format!("nothing to rename: '{new}' is already among the {kind} categories")
    }
}

async fn connect_db(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn execute(engine: &Engine, command: Command, currency: Currency) -> Result<()> {
    match command {
        Command::Report(args) => {
            let view = engine.view().await?;
            let lines = report::render(&view, currency, args.kind);
            let mut stdout = std::io::stdout();
            let color = stdout.is_terminal();
            report::print(&lines, &mut stdout, color)?;
        }
        Command::Add(args) => {
            let draft = EntryDraft {
                date: args
                    .date
                    .unwrap_or_else(|| chrono::Local::now().date_naive().to_string()),
                category: args.category,
                amount: args.amount,
            };
            let entry = engine.create_entry(args.kind, &draft).await?;
            println!(
                "added {} {}: {} {} {}",
                args.kind,
                entry.id,
                entry.date,
                entry.category,
                entry.amount.format(currency)
            );
        }
        Command::Delete(args) => {
            engine.delete_entry(args.kind, args.id).await?;
            println!("deleted {} {}", args.kind, args.id);
        }
        Command::Category(Category { command }) => match command {
            CategoryCommand::List { kind } => {
                for name in engine.categories(kind).await? {
                    println!("{name}");
                }
            }
            CategoryCommand::Add { kind, name } => {
                let name = engine.add_category(kind, &name).await?;
                println!("added {kind} category: {name}");
            }
            CategoryCommand::Rename { kind, old, new } => {
                match engine.rename_category(kind, &old, &new).await? {
                    RenameOutcome::Renamed { entries_rewritten } => {
                        println!("renamed {old} -> {new} ({entries_rewritten} entries updated)");
                    }
                    RenameOutcome::Unchanged => println!("{}", unchanged_message(kind, &old, &new)),
                }
            }
            CategoryCommand::Delete { kind, name } => {
                engine.delete_category(kind, &name).await?;
                println!("deleted {kind} category: {name}");
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "tally_cli={level},engine={level}",
            level = cli.log_level
        ))
        .init();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    if let Err(err) = execute(&engine, cli.command, cli.currency).await {
        tracing::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    Ok(())
}
