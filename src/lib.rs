pub mod assistant;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod estimate;
pub mod generate;
pub mod mcp;
pub mod model;
pub mod nlq;
pub mod session;
pub mod table;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use catalog::Catalog;
use error::SearchError;
use model::{AssistantReply, Flight, FlightSearchParams};
use session::SearchOptions;

fn rng_from(options: &SearchOptions) -> StdRng {
    match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run a structured flight search. The await stands in for network latency;
/// everything after it is in-process synthesis.
pub async fn search(
    catalog: &Catalog,
    params: &FlightSearchParams,
    options: &SearchOptions,
) -> Result<Vec<Flight>, SearchError> {
    params.validate()?;
    tokio::time::sleep(Duration::from_millis(options.latency_ms)).await;
    let mut rng = rng_from(options);
    Ok(generate::generate(catalog, params, &mut rng))
}

/// Answer a free-text travel query through the assistant path.
pub async fn ask(
    catalog: &Catalog,
    query: &str,
    options: &SearchOptions,
) -> AssistantReply {
    tokio::time::sleep(Duration::from_millis(options.latency_ms)).await;
    let today = chrono::Local::now().date_naive();
    let mut rng = rng_from(options);
    assistant::respond(catalog, query, today, &mut rng)
}
