use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;

use farely::booking::{Advance, Wizard};
use farely::catalog::Catalog;
use farely::error::SearchError;
use farely::model::{Flight, FlightSearchParams, TripType};
use farely::session::{SearchOptions, Sequencer};
use farely::table;

#[derive(Parser)]
#[command(
    name = "farely",
    about = "Simulated flight search and travel assistant for the terminal",
    version,
    after_help = "\
Examples:
  farely search -f JFK -t LAX -d 2026-05-01
  farely search -f ORD -t MIA -d 2026-05-01 --direct --json --pretty
  farely search -f JFK -t LHR -d 2026-05-01 --return-date 2026-05-15
  farely ask \"find the cheapest flight from Chicago to Miami on May 15\"
  farely chat

Reproducible output:
  farely search -f JFK -t LAX -d 2026-05-01 --seed 42 --latency 0 --compact"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Search for flights",
        long_about = "Search for flights between airports on a specific date.\n\
            Results are synthesized from static route data — this is a simulation, \
            not live inventory. Use --seed for reproducible output.",
        after_help = "\
Examples:
  One-way:      farely search -f JFK -t LAX -d 2026-05-01
  Round-trip:   farely search -f JFK -t LHR -d 2026-05-01 --return-date 2026-05-15
  Direct only:  farely search -f ORD -t MIA -d 2026-05-01 --direct
  JSON output:  farely search -f JFK -t LAX -d 2026-05-01 --json --pretty
  Scripted:     farely search -f JFK -t LAX -d 2026-05-01 --seed 42 --latency 0 --compact"
    )]
    Search(SearchArgs),
    #[command(about = "Ask the travel assistant a free-text question")]
    Ask(AskArgs),
    #[command(about = "Interactive assistant session with flight booking")]
    Chat(ChatArgs),
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(
        short, long,
        value_name = "IATA",
        help = "Departure airport code",
        long_help = "Departure airport IATA code (3 letters, e.g. JFK, ORD, LAX)."
    )]
    from: String,

    #[arg(
        short, long,
        value_name = "IATA",
        help = "Arrival airport code",
        long_help = "Arrival airport IATA code (3 letters, e.g. LHR, MIA, SFO)."
    )]
    to: String,

    #[arg(
        short, long,
        value_name = "YYYY-MM-DD",
        help = "Departure date"
    )]
    date: Option<String>,

    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Return date (auto-sets round-trip)"
    )]
    return_date: Option<String>,

    #[arg(
        long,
        default_value = "one-way",
        value_name = "TYPE",
        help = "Trip type [one-way, round-trip, multi-city]"
    )]
    trip: String,

    #[arg(long, help = "Only show direct (nonstop) flights")]
    direct: bool,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of passengers (1-9)")]
    passengers: u32,

    #[arg(long, value_name = "N", help = "Show only the N cheapest results")]
    top: Option<usize>,

    #[arg(long, value_name = "SEED", help = "RNG seed for reproducible results")]
    seed: Option<u64>,

    #[arg(
        long,
        default_value = "800",
        value_name = "MS",
        help = "Simulated search latency in milliseconds"
    )]
    latency: u64,

    #[arg(long, help = "One-line-per-flight output (for scripts)")]
    compact: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct AskArgs {
    #[arg(value_name = "QUERY", help = "Free-text query, e.g. \"flight from Chicago to Miami on May 15\"")]
    query: String,

    #[arg(long, value_name = "SEED", help = "RNG seed for reproducible results")]
    seed: Option<u64>,

    #[arg(
        long,
        default_value = "800",
        value_name = "MS",
        help = "Simulated search latency in milliseconds"
    )]
    latency: u64,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct ChatArgs {
    #[arg(long, value_name = "SEED", help = "RNG seed for reproducible results")]
    seed: Option<u64>,

    #[arg(
        long,
        default_value = "800",
        value_name = "MS",
        help = "Simulated search latency in milliseconds"
    )]
    latency: u64,
}

fn error_code(err: &SearchError) -> i32 {
    match err {
        SearchError::MissingField(_)
        | SearchError::InvalidAirport(_)
        | SearchError::InvalidDate(_)
        | SearchError::Validation(_) => 2,
        SearchError::Unknown => 5,
    }
}

fn error_kind(err: &SearchError) -> &'static str {
    match err {
        SearchError::MissingField(_) => "missing_field",
        SearchError::InvalidAirport(_) => "invalid_airport",
        SearchError::InvalidDate(_) => "invalid_date",
        SearchError::Validation(_) => "validation_error",
        SearchError::Unknown => "unknown_error",
    }
}

fn die(err: &SearchError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{}", serde_json::to_string(&json).unwrap());
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn parse_date(date: &str) -> Result<chrono::NaiveDate, SearchError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| SearchError::InvalidDate(date.to_string()))
}

fn build_params(args: &SearchArgs, catalog: &Catalog) -> Result<FlightSearchParams, SearchError> {
    let departure_date = args.date.as_deref().map(parse_date).transpose()?;
    let return_date = args.return_date.as_deref().map(parse_date).transpose()?;

    let trip = if return_date.is_some() {
        TripType::RoundTrip
    } else {
        TripType::from_str_loose(&args.trip)?
    };

    Ok(FlightSearchParams {
        departure_airport: catalog.describe_airport(&args.from.to_uppercase()),
        destination_airport: catalog.describe_airport(&args.to.to_uppercase()),
        departure_date,
        return_date,
        direct_flights_only: args.direct,
        passengers: args.passengers,
        trip,
    })
}

fn print_compact(flights: &[Flight]) {
    for flight in flights {
        let stops = match flight.stops {
            0 => "nonstop".to_string(),
            n => format!("{n} stop"),
        };
        println!(
            "{} | {}>{} | {} | {} | {} {} | {}>{}",
            table::format_price(flight.price, &flight.currency),
            flight.departure_airport_code,
            flight.arrival_airport_code,
            flight.duration,
            stops,
            flight.airline,
            flight.flight_number,
            flight.departure_time,
            flight.arrival_time,
        );
    }
}

fn print_flights(flights: &[Flight], compact: bool, json: bool, pretty: bool) {
    if compact {
        if flights.is_empty() {
            println!("No flights found.");
            return;
        }
        print_compact(flights);
    } else if json || pretty {
        let output = if pretty {
            serde_json::to_string_pretty(flights).unwrap()
        } else {
            serde_json::to_string(flights).unwrap()
        };
        println!("{output}");
    } else {
        if flights.is_empty() {
            println!("No flights found.");
            return;
        }
        println!("{}", table::render(flights));
    }
}

async fn run_search(args: SearchArgs) {
    let json_mode = args.json || args.pretty;
    let catalog = Catalog::builtin();

    let params = match build_params(&args, &catalog) {
        Ok(p) => p,
        Err(e) => die(&e, json_mode),
    };

    let options = SearchOptions {
        latency_ms: args.latency,
        seed: args.seed,
    };

    match farely::search(&catalog, &params, &options).await {
        Ok(mut flights) => {
            if let Some(n) = args.top {
                flights.sort_by_key(|f| f.price);
                flights.truncate(n);
            }
            print_flights(&flights, args.compact, args.json, args.pretty);
        }
        Err(e) => die(&e, json_mode),
    }
}

async fn run_ask(args: AskArgs) {
    let catalog = Catalog::builtin();
    let options = SearchOptions {
        latency_ms: args.latency,
        seed: args.seed,
    };

    let reply = farely::ask(&catalog, &args.query, &options).await;

    if args.json || args.pretty {
        let output = if args.pretty {
            serde_json::to_string_pretty(&reply).unwrap()
        } else {
            serde_json::to_string(&reply).unwrap()
        };
        println!("{output}");
    } else {
        println!("{}", reply.message);
        if !reply.flights.is_empty() {
            println!("{}", table::render(&reply.flights));
        }
    }
}

async fn run_chat(args: ChatArgs) {
    let catalog = Catalog::builtin();
    let sequencer = Sequencer::new();
    let mut wizard = match args.seed {
        Some(seed) => Wizard::seeded(seed),
        None => Wizard::new(),
    };
    let mut last_results: Vec<Flight> = Vec::new();
    let mut turn: u64 = 0;

    println!("Travel assistant ready.");
    println!("Ask about flights (e.g. \"find a flight from Chicago to Miami\"),");
    println!("type \"book N\" to book result N, or \"quit\" to exit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        if wizard.in_progress() {
            match wizard.submit(line) {
                Ok(Advance::Prompt(prompt)) => println!("{prompt}"),
                Ok(Advance::Completed(_, message)) => println!("{message}"),
                Err(e) => println!("{e}"),
            }
            continue;
        }

        if let Some(rest) = line
            .strip_prefix("book ")
            .or_else(|| line.strip_prefix("Book "))
        {
            match rest.trim().parse::<usize>() {
                Ok(n) if n >= 1 && n <= last_results.len() => {
                    match wizard.begin(last_results[n - 1].clone()) {
                        Ok(prompt) => println!("{prompt}"),
                        Err(e) => println!("{e}"),
                    }
                }
                _ => println!(
                    "Search first, then use \"book N\" with N between 1 and the number of results."
                ),
            }
            continue;
        }

        turn += 1;
        let options = SearchOptions {
            latency_ms: args.latency,
            seed: args.seed.map(|s| s.wrapping_add(turn)),
        };

        // This loop answers one query at a time, so the ticket is always
        // current when the await resolves. The guard states the contract any
        // front end with overlapping searches must follow: issue before the
        // await, check after, drop stale replies.
        let ticket = sequencer.issue();
        let reply = farely::ask(&catalog, line, &options).await;
        if !sequencer.is_current(ticket) {
            continue;
        }

        println!("{}", reply.message);
        if !reply.flights.is_empty() {
            println!("{}", table::render(&reply.flights));
            println!("Type \"book N\" to start booking one of these flights.");
        }
        last_results = reply.flights;
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => farely::mcp::run().await,
        Commands::Search(args) => run_search(args).await,
        Commands::Ask(args) => run_ask(args).await,
        Commands::Chat(args) => run_chat(args).await,
    }
}
