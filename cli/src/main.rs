mod error_formatter;
mod formatter;
#[cfg(feature = "play")]
mod interactive;
mod server;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use formatter::Formatter;
use reckon::{
    evaluate, is_complete, parse, Element, Limits, Puzzle, PuzzleConfig, Session,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "reckon")]
#[command(about = "Reach the target with + - × ÷.")]
#[command(
    long_about = "Reckon is a daily numbers puzzle: combine a handful of numbers with + - × ÷ until something equals the target.\nThe CLI shows the daily puzzle, evaluates and checks expressions, lets you play in the terminal, or serves the puzzle over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which generated puzzle to use
#[derive(Args, Debug, Clone)]
struct DayArgs {
    /// Puzzle of this day (format: YYYY-MM-DD, default: today)
    #[arg(long, conflicts_with = "seed")]
    date: Option<NaiveDate>,
    /// Generate the puzzle from a raw seed instead of a date
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file with generator settings (large_numbers, small_numbers, ...)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the puzzle of the day
    ///
    /// Every player gets the same numbers and target on the same day.
    Puzzle {
        #[command(flatten)]
        day: DayArgs,
        /// Print the puzzle as a `{numbers, target}` JSON record
        #[arg(long)]
        json: bool,
    },
    /// Evaluate an expression with the usual precedence
    ///
    /// Examples:
    ///   reckon eval "2 + 3 × 4"        - prints 14
    ///   reckon eval "(4 × 6) + 2"      - groups are finished sub-expressions
    ///   reckon eval "5 ÷ 0"            - prints undefined
    Eval {
        /// Expression text, e.g. "4 × 6 + 2" (ASCII * and / work too)
        expression: String,
        #[arg(long)]
        json: bool,
    },
    /// Check an expression against a puzzle, move by move
    ///
    /// The expression is replayed with the game rules: each number is used
    /// at most once, and moves that would give a fraction or make no
    /// progress are rejected.
    Check {
        /// Expression text, e.g. "(4 × 6) + 2"
        expression: String,
        /// Puzzle record as a JSON file: {"numbers": [...], "target": n}
        #[arg(long, value_name = "FILE", conflicts_with_all = ["numbers", "target"])]
        puzzle: Option<PathBuf>,
        /// Puzzle numbers, comma separated (e.g. 4,6,2)
        #[arg(long, value_delimiter = ',', requires = "target")]
        numbers: Option<Vec<i64>>,
        /// Target value for --numbers
        #[arg(long, requires = "numbers")]
        target: Option<i64>,
        #[command(flatten)]
        day: DayArgs,
        #[arg(long)]
        json: bool,
    },
    /// Play a puzzle in the terminal
    Play {
        #[command(flatten)]
        day: DayArgs,
    },
    /// Start HTTP server (default: localhost:3000)
    ///
    /// API: GET /daily_puzzle, POST /evaluate with {expression},
    /// POST /check with {expression, puzzle?}
    Server {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// JSON file with generator settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Puzzle { day, json } => puzzle_command(day, *json),
        Commands::Eval { expression, json } => eval_command(expression, *json),
        Commands::Check {
            expression,
            puzzle,
            numbers,
            target,
            day,
            json,
        } => {
            let source = PuzzleSource {
                file: puzzle.as_deref(),
                numbers: numbers.as_deref(),
                target: *target,
                day,
            };
            check_command(expression, &source, *json)
        }
        Commands::Play { day } => play_command(day),
        Commands::Server { host, port, config } => server_command(host, *port, config.as_deref()),
    };

    if let Err(e) = result {
        if let Some(reckon_err) = e.downcast_ref::<reckon::ReckonError>() {
            eprintln!("{}", error_formatter::format_error(reckon_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn puzzle_command(day: &DayArgs, json: bool) -> Result<()> {
    let (puzzle, label) = generated_puzzle(day)?;
    if json {
        println!("{}", serde_json::to_string(&puzzle)?);
    } else {
        print!("{}", Formatter::default().format_puzzle(&puzzle, &label));
    }
    Ok(())
}

fn eval_command(text: &str, json: bool) -> Result<()> {
    let elements = parse(text, Some("expression".to_string()), &Limits::default())?;
    let complete = is_complete(&elements);

    // A trailing operator is allowed in text; evaluate what comes before it
    let evaluable = match elements.last() {
        Some(Element::Operator(_)) => &elements[..elements.len() - 1],
        _ => &elements[..],
    };
    let value = evaluate(evaluable)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "expression": elements,
                "value": value,
                "complete": complete,
            })
        );
    } else {
        print!(
            "{}",
            Formatter::default().format_evaluation(&elements, &value, complete)
        );
    }
    Ok(())
}

struct PuzzleSource<'a> {
    file: Option<&'a Path>,
    numbers: Option<&'a [i64]>,
    target: Option<i64>,
    day: &'a DayArgs,
}

fn check_command(text: &str, source: &PuzzleSource, json: bool) -> Result<()> {
    let puzzle = resolve_puzzle(source)?;
    let elements = parse(text, Some("expression".to_string()), &Limits::default())?;

    let mut session = Session::new(puzzle)?;
    let replay = session.replay(&elements);
    let submission = session.submit();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "puzzle": session.puzzle(),
                "steps": replay.steps,
                "accepted": replay.is_accepted(),
                "submission": submission,
            })
        );
    } else {
        print!(
            "{}",
            Formatter::default().format_check(session.puzzle(), &replay, &submission)
        );
    }
    Ok(())
}

fn play_command(day: &DayArgs) -> Result<()> {
    #[cfg(feature = "play")]
    {
        let (puzzle, label) = generated_puzzle(day)?;
        interactive::play(puzzle, &label)?;
    }

    #[cfg(not(feature = "play"))]
    {
        let _ = day;
        eprintln!("Error: Play feature not enabled");
        eprintln!("Recompile with: cargo build --features play");
        std::process::exit(1);
    }

    Ok(())
}

fn server_command(host: &str, port: u16, config: Option<&Path>) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let config = load_config(config)?;
        let rt = Runtime::new()?;
        rt.block_on(server::http::start_server(config, host, port))?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (host, port, config);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// The puzzle to check against: a record file, explicit numbers, or a
/// generated puzzle
fn resolve_puzzle(source: &PuzzleSource) -> Result<Puzzle> {
    if let Some(path) = source.file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read puzzle file {}", path.display()))?;
        let puzzle: Puzzle = serde_json::from_str(&text)
            .with_context(|| format!("Invalid puzzle record in {}", path.display()))?;
        puzzle.validate()?;
        return Ok(puzzle);
    }
    if let (Some(numbers), Some(target)) = (source.numbers, source.target) {
        let puzzle = Puzzle::new(numbers.to_vec(), target);
        puzzle.validate()?;
        return Ok(puzzle);
    }
    generated_puzzle(source.day).map(|(puzzle, _)| puzzle)
}

/// Generate the puzzle selected by `--seed` or `--date` (default today),
/// with a label describing where it came from
fn generated_puzzle(day: &DayArgs) -> Result<(Puzzle, String)> {
    let config = load_config(day.config.as_deref())?;
    if let Some(seed) = day.seed {
        return Ok((Puzzle::generate(seed, &config)?, format!("seed {}", seed)));
    }
    let date = day.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    Ok((Puzzle::daily(date, &config)?, date.format("%Y-%m-%d").to_string()))
}

fn load_config(path: Option<&Path>) -> Result<PuzzleConfig> {
    let Some(path) = path else {
        return Ok(PuzzleConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: PuzzleConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid generator config in {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
