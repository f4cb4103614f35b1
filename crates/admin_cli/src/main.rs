use std::{error::Error, io::Write};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Currency, Engine, MoneyCents, Trip, TripCmd, parse_uuid};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "itinera_admin")]
#[command(about = "Admin utilities for Itinera (trips, default trip, cost totals)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./itinera.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Trip(TripArgs),
    /// Rebuild stored trip totals from expenses, stays and routes.
    Recompute(RecomputeArgs),
}

#[derive(Args, Debug)]
struct TripArgs {
    #[command(subcommand)]
    command: TripCommand,
}

#[derive(Subcommand, Debug)]
enum TripCommand {
    List,
    Create(TripCreateArgs),
    SetDefault(TripIdArgs),
    Summary(TripIdArgs),
    Delete(TripDeleteArgs),
}

#[derive(Args, Debug)]
struct TripCreateArgs {
    #[arg(long)]
    name: String,
    /// Start date, `YYYY-MM-DD`.
    #[arg(long)]
    start: NaiveDate,
    #[arg(long)]
    end: Option<NaiveDate>,
    #[arg(long, default_value = "EUR")]
    currency: String,
    /// Budget in major units, e.g. `1500.00`.
    #[arg(long)]
    budget: Option<String>,
    #[arg(long)]
    default: bool,
}

#[derive(Args, Debug)]
struct TripIdArgs {
    #[arg(long)]
    id: String,
}

#[derive(Args, Debug)]
struct TripDeleteArgs {
    #[arg(long)]
    id: String,
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct RecomputeArgs {
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    all: bool,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Ask a yes/no question; only `y` confirms.
fn confirm(prompt: &str) -> Result<bool, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(format!("{prompt} [y/N] "))
    )?;
    out.flush()?;

    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        let answer = match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char('y' | 'Y') => true,
            KeyCode::Char(_) | KeyCode::Enter | KeyCode::Esc => false,
            _ => continue,
        };
        execute!(out, Print(if answer { "y\r\n" } else { "n\r\n" }))?;
        out.flush()?;
        return Ok(answer);
    }
}

fn print_trip(trip: &Trip) {
    let marker = if trip.is_default { "*" } else { " " };
    let budget = trip
        .planned_cost
        .map(|planned| format!(" / {planned}"))
        .unwrap_or_default();
    println!(
        "{marker} {} {} ({}) {}{budget} {}",
        trip.id, trip.name, trip.start_date, trip.total_cost, trip.currency
    );
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Trip(TripArgs { command }) => match command {
            TripCommand::List => {
                for trip in engine.trips().await? {
                    print_trip(&trip);
                }
            }
            TripCommand::Create(args) => {
                let currency = match Currency::try_from(args.currency.as_str()) {
                    Ok(v) => v,
                    Err(err) => {
                        eprintln!("{err}");
                        std::process::exit(2);
                    }
                };
                let mut cmd = TripCmd::new(args.name, args.start)
                    .currency(currency)
                    .default_trip(args.default);
                if let Some(end) = args.end {
                    cmd = cmd.end_date(end);
                }
                if let Some(budget) = args.budget {
                    cmd = cmd.planned_cost(budget.parse::<MoneyCents>()?);
                }
                let trip = engine.new_trip(cmd).await?;
                println!("created trip: {} ({})", trip.name, trip.id);
            }
            TripCommand::SetDefault(args) => {
                let trip_id = parse_uuid(&args.id, "trip")?;
                engine.set_default_trip(trip_id).await?;
                println!("default trip: {trip_id}");
            }
            TripCommand::Summary(args) => {
                let trip_id = parse_uuid(&args.id, "trip")?;
                let trip = engine.trip(trip_id).await?;
                let summary = engine.expense_summary(trip_id).await?;
                print_trip(&trip);
                for (category, total) in &summary.by_category {
                    println!("  {category:<16} {total}");
                }
                println!("  {:<16} {}", "expenses", summary.total);
            }
            TripCommand::Delete(args) => {
                let trip_id = parse_uuid(&args.id, "trip")?;
                let trip = engine.trip(trip_id).await?;
                let prompt = format!("delete trip '{}' and all its data?", trip.name);
                if !args.yes && !confirm(&prompt)? {
                    println!("aborted");
                    return Ok(());
                }
                if engine.delete_trip(trip_id).await? {
                    println!("deleted trip: {trip_id}");
                }
            }
        },
        Command::Recompute(args) => {
            if let Some(id) = args.id {
                let trip_id = parse_uuid(&id, "trip")?;
                let total = engine.recalculate_trip_total_cost(trip_id).await?;
                println!("{trip_id} {total}");
            } else if args.all {
                for (trip_id, total) in engine.recompute_all_totals().await? {
                    println!("{trip_id} {total}");
                }
            }
        }
    }

    Ok(())
}
