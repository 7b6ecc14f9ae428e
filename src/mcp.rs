use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::SearchError;
use crate::model::{FlightSearchParams, TripType};
use crate::session::SearchOptions;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SearchArgs {
    #[schemars(
        description = "Departure airport IATA code, exactly 3 uppercase letters. Example: JFK, LAX, ORD"
    )]
    from: String,
    #[schemars(
        description = "Arrival airport IATA code, exactly 3 uppercase letters. Example: LHR, MIA, SFO"
    )]
    to: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Example: 2026-05-01")]
    date: Option<String>,
    #[schemars(
        description = "Return date in YYYY-MM-DD for round-trip. Auto-sets trip type to round-trip"
    )]
    return_date: Option<String>,
    #[schemars(description = "Only return nonstop flights. Default: false")]
    direct: Option<bool>,
    #[schemars(description = "Number of passengers (1-9). Default: 1")]
    passengers: Option<u32>,
    #[schemars(description = "Return only the N cheapest results")]
    top: Option<usize>,
    #[schemars(description = "RNG seed for reproducible results")]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AskArgs {
    #[schemars(
        description = "Free-text travel query, e.g. \"find the cheapest flight from Chicago to Miami on May 15\""
    )]
    query: String,
    #[schemars(description = "RNG seed for reproducible results")]
    seed: Option<u64>,
}

fn parse_date(date: &str) -> Result<chrono::NaiveDate, SearchError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| SearchError::InvalidDate(date.to_string()))
}

fn build_params(
    from: &str,
    to: &str,
    date: Option<&str>,
    return_date: Option<&str>,
    direct: bool,
    passengers: u32,
    catalog: &Catalog,
) -> Result<FlightSearchParams, SearchError> {
    let departure_date = date.map(parse_date).transpose()?;
    let return_date = return_date.map(parse_date).transpose()?;
    let trip = if return_date.is_some() {
        TripType::RoundTrip
    } else {
        TripType::OneWay
    };

    let params = FlightSearchParams {
        departure_airport: catalog.describe_airport(&from.to_uppercase()),
        destination_airport: catalog.describe_airport(&to.to_uppercase()),
        departure_date,
        return_date,
        direct_flights_only: direct,
        passengers,
        trip,
    };
    params.validate()?;
    Ok(params)
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

#[derive(Debug, Clone)]
struct FarelyMcp {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FarelyMcp {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search for flights and return results as JSON. Synthesizes flight options between airports with prices, airlines, duration, stops, and schedule. This is a simulation: results are generated, not live inventory. Pass a seed for reproducible output."
    )]
    async fn search_flights(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let catalog = Catalog::builtin();

        let params = match build_params(
            &args.from,
            &args.to,
            args.date.as_deref(),
            args.return_date.as_deref(),
            args.direct.unwrap_or(false),
            args.passengers.unwrap_or(1),
            &catalog,
        ) {
            Ok(p) => p,
            Err(e) => return tool_error(e.to_string()),
        };

        let options = SearchOptions {
            latency_ms: 0,
            seed: args.seed,
        };

        match crate::search(&catalog, &params, &options).await {
            Ok(mut flights) => {
                if let Some(n) = args.top {
                    flights.sort_by_key(|f| f.price);
                    flights.truncate(n);
                }
                let json = serde_json::to_string_pretty(&flights)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Ask the travel assistant a free-text question like \"find a flight from New York to Paris on June 3\". Returns matching flights and a conversational summary as JSON. Unrecognized fields are defaulted and disclosed in the summary."
    )]
    async fn ask_assistant(
        &self,
        Parameters(args): Parameters<AskArgs>,
    ) -> Result<CallToolResult, McpError> {
        let catalog = Catalog::builtin();
        let options = SearchOptions {
            latency_ms: 0,
            seed: args.seed,
        };

        let reply = crate::ask(&catalog, &args.query, &options).await;
        let json = serde_json::to_string_pretty(&reply)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for FarelyMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "farely".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Simulated flight search. Use search_flights for structured queries \
                 (IATA codes and dates) and ask_assistant for natural-language queries. \
                 All results are synthesized; pass a seed for reproducible output."
                    .into(),
            ),
        }
    }
}

pub async fn run() {
    let service = FarelyMcp::new()
        .serve(rmcp::transport::stdio())
        .await
        .expect("failed to start MCP server");
    service.waiting().await.expect("MCP server error");
}
