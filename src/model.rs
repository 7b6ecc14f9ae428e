use serde::Serialize;

use crate::error::SearchError;

/// One synthesized flight offer. Created by the generator, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    /// Localized 12-hour clock strings, e.g. "3:05 PM".
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub duration_minutes: u32,
    pub price: u32,
    pub currency: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub stops: u32,
}

#[derive(Debug, Clone)]
pub enum TripType {
    OneWay,
    RoundTrip,
    MultiCity,
}

impl TripType {
    pub fn from_str_loose(s: &str) -> Result<Self, SearchError> {
        match s {
            "one-way" => Ok(Self::OneWay),
            "round-trip" => Ok(Self::RoundTrip),
            "multi-city" => Ok(Self::MultiCity),
            _ => Err(SearchError::Validation(format!("invalid trip type: {s}"))),
        }
    }
}

/// Search form input. Airport fields hold display descriptors
/// ("JFK - New York (…)") or bare codes; the leading three letters are the
/// IATA code either way. Immutable once handed to the generator.
#[derive(Debug, Clone)]
pub struct FlightSearchParams {
    pub departure_airport: String,
    pub destination_airport: String,
    pub departure_date: Option<chrono::NaiveDate>,
    pub return_date: Option<chrono::NaiveDate>,
    pub direct_flights_only: bool,
    pub passengers: u32,
    pub trip: TripType,
}

/// Leading 3-letter IATA code of an airport descriptor string.
pub fn extract_airport_code(descriptor: &str) -> Option<String> {
    let code: String = descriptor.chars().take(3).collect();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Some(code)
    } else {
        None
    }
}

impl FlightSearchParams {
    pub fn origin_code(&self) -> Result<String, SearchError> {
        extract_airport_code(&self.departure_airport)
            .ok_or_else(|| SearchError::InvalidAirport(self.departure_airport.clone()))
    }

    pub fn destination_code(&self) -> Result<String, SearchError> {
        extract_airport_code(&self.destination_airport)
            .ok_or_else(|| SearchError::InvalidAirport(self.destination_airport.clone()))
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.departure_airport.trim().is_empty() {
            return Err(SearchError::MissingField("departure airport"));
        }
        if self.destination_airport.trim().is_empty() {
            return Err(SearchError::MissingField("destination airport"));
        }
        self.origin_code()?;
        self.destination_code()?;

        if self.passengers == 0 {
            return Err(SearchError::Validation(
                "at least one passenger required".into(),
            ));
        }
        if self.passengers > 9 {
            return Err(SearchError::Validation(format!(
                "total passengers ({}) exceeds maximum of 9",
                self.passengers
            )));
        }

        if matches!(self.trip, TripType::RoundTrip) && self.return_date.is_none() {
            return Err(SearchError::MissingField("return date"));
        }

        Ok(())
    }
}

/// Named itinerary group in the shape of the simulated third-party API
/// response ("Best", "Cheapest", "Fastest", "Alternative").
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub name: String,
    pub items: Vec<Flight>,
}

/// Flatten buckets back to a plain list, preserving bucket order.
pub fn flatten_buckets(buckets: Vec<Bucket>) -> Vec<Flight> {
    buckets.into_iter().flat_map(|b| b.items).collect()
}

/// What the assistant hands back for a natural-language query.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub flights: Vec<Flight>,
    pub message: String,
}
