mod display;
mod import;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use comfy_table::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::display::{
    display_draws, display_frequencies, display_gaps, display_hot_cold, display_import_summary,
    display_predictions,
};
use ssq_analysis::{AnalysisConfig, Analyzer};
use ssq_db::db::{count_draws, db_path, fetch_all_draws, fetch_last_draws, insert_draw, migrate, open_db};
use ssq_db::loader::load_history_or_sample;
use ssq_db::models::{validate_draw, validate_issue, validate_numbers, DrawRecord, Pool};
use ssq_db::rusqlite::Connection;

#[derive(Parser)]
#[command(name = "ssq", about = "Shuangseqiu draw history analyzer")]
struct Cli {
    /// Analyze this JSON history file instead of the database (sample data if unreadable)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// JSON file overriding the analysis settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import draws from a JSON history file into the database
    Import {
        /// Path to the JSON history
        #[arg(short, long = "from", default_value = "data/ssq-history.json")]
        from: PathBuf,
    },

    /// Print the database path
    DbPath,

    /// List the latest draws
    List {
        /// Number of draws to show
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Front and back number frequencies over the whole history
    Stats,

    /// Most frequent numbers of the recent draws
    Hot {
        /// Window in draws (default from the analysis settings)
        #[arg(short, long)]
        periods: Option<usize>,
    },

    /// Least frequent numbers of the whole history
    Cold,

    /// Gap statistics between sorted front numbers
    Gaps,

    /// Suggest numbers for the next draw
    Predict {
        /// Number of suggestions
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Seed for reproducible suggestions
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the identifier of the next draw
    NextIssue,

    /// Add a draw by hand
    Add,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { from } => cmd_import(&conn, &from),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Add => cmd_add(&conn),
        Command::Stats => with_analyzer(&conn, cli.file.as_deref(), config, cmd_stats),
        Command::Hot { periods } => with_analyzer(&conn, cli.file.as_deref(), config, |a| cmd_hot(a, periods)),
        Command::Cold => with_analyzer(&conn, cli.file.as_deref(), config, cmd_cold),
        Command::Gaps => with_analyzer(&conn, cli.file.as_deref(), config, cmd_gaps),
        Command::Predict { count, seed } => {
            with_analyzer(&conn, cli.file.as_deref(), config, |a| cmd_predict(a, count, seed))
        }
        Command::NextIssue => with_analyzer(&conn, cli.file.as_deref(), config, |a| {
            println!("{}", a.next_issue()?);
            Ok(())
        }),
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read settings {:?}", path))?;
    let config: AnalysisConfig = serde_json::from_str(&json)
        .with_context(|| format!("invalid settings {:?}", path))?;
    Ok(config)
}

/// Runs `f` on the history file when one was given, otherwise on the database.
fn with_analyzer<F>(conn: &Connection, file: Option<&Path>, config: AnalysisConfig, f: F) -> Result<()>
where
    F: FnOnce(&Analyzer) -> Result<()>,
{
    let draws = match file {
        Some(file) => {
            let (draws, source) = load_history_or_sample(file);
            info!(%source, records = draws.len(), "analyzing history file");
            draws
        }
        None => {
            if count_draws(conn)? == 0 {
                println!("Empty database. Run first: ssq import");
                return Ok(());
            }
            fetch_all_draws(conn)?
        }
    };
    let analyzer = Analyzer::with_config(draws, config)?;
    f(&analyzer)
}

fn cmd_import(conn: &Connection, file: &Path) -> Result<()> {
    let result = import::import_json(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Empty database. Run first: ssq import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(analyzer: &Analyzer) -> Result<()> {
    let front = analyzer.front_frequency()?;
    let back = analyzer.back_frequency()?;
    display_frequencies(&front, &back, analyzer.len());
    Ok(())
}

fn cmd_hot(analyzer: &Analyzer, periods: Option<usize>) -> Result<()> {
    let periods = periods.unwrap_or(analyzer.config().hot_window);
    let hot = analyzer.hot_numbers(periods)?;
    display_hot_cold(&format!("🔥 Hot numbers of the last {} draws", periods), &hot, Color::Red);
    Ok(())
}

fn cmd_cold(analyzer: &Analyzer) -> Result<()> {
    let cold = analyzer.cold_numbers()?;
    display_hot_cold("❄ Cold numbers of the whole history", &cold, Color::Cyan);
    Ok(())
}

fn cmd_gaps(analyzer: &Analyzer) -> Result<()> {
    let gaps = analyzer.analyze_gaps()?;
    display_gaps(&gaps);
    Ok(())
}

fn cmd_predict(analyzer: &Analyzer, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let predictions = (0..count.max(1))
        .map(|_| analyzer.predict_next_with(&mut rng))
        .collect::<Result<Vec<_>, _>>()?;
    display_predictions(&analyzer.next_issue()?, &predictions);
    Ok(())
}

fn cmd_add(conn: &Connection) -> Result<()> {
    println!("Add a draw by hand\n");

    let issue = prompt("Issue (e.g. 2025060): ")?;
    validate_issue(&issue)?;
    let raw_date = prompt("Date (YYYY-MM-DD): ")?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}'", raw_date))?;

    let front = prompt_front()?;
    let back = prompt_back()?;

    validate_draw(&issue, &front, back)?;

    let draw = DrawRecord {
        open_time: date.format("%Y-%m-%d").to_string(),
        week: week_label(date),
        ..DrawRecord::new(issue, front, back)
    };

    println!("\nDraw to insert:");
    display_draws(std::slice::from_ref(&draw));

    let confirm = prompt("\nConfirm insertion? (y/n): ")?;
    if confirm.trim().to_lowercase() == "y" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Draw inserted.");
        } else {
            println!("This issue already exists (duplicate ignored).");
        }
    } else {
        println!("Insertion cancelled.");
    }

    Ok(())
}

/// Upper-case short weekday, as published (`TUE`).
fn week_label(date: NaiveDate) -> String {
    date.weekday().to_string().to_uppercase()
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read error")?;
    if read == 0 {
        bail!("input closed before an answer was given");
    }
    Ok(line.trim().to_string())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

fn prompt_front() -> Result<[u8; 6]> {
    loop {
        let input = prompt("6 front numbers (space separated, 1-33): ")?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == Pool::Front.pick_count() => {
                let arr = [v[0], v[1], v[2], v[3], v[4], v[5]];
                if validate_numbers("", &arr, 1).is_ok() {
                    return Ok(arr);
                }
                println!("Invalid numbers (1-33, no duplicates). Try again.");
            }
            _ => println!("Enter exactly 6 numbers. Try again."),
        }
    }
}

fn prompt_back() -> Result<u8> {
    loop {
        let input = prompt("Back number (1-16): ")?;
        match input.parse::<u8>() {
            Ok(n) if Pool::Back.contains(n) => return Ok(n),
            _ => println!("Enter one number between 1 and 16. Try again."),
        }
    }
}
