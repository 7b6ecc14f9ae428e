//! Randomized itinerary synthesis.
//!
//! Given search parameters, produces a small batch of plausible flights:
//! random airline, distance-biased stop count, estimated duration, a price
//! derived from the duration band, and departure/arrival clock times. The
//! caller supplies the RNG, so seeded runs are fully reproducible.

use rand::Rng;

use crate::catalog::Catalog;
use crate::estimate;
use crate::model::{Flight, FlightSearchParams};

pub const MIN_RESULTS: u32 = 3;
pub const MAX_RESULTS: u32 = 7;

/// Base fare in USD before duration and seasonal factors.
const BASE_FARE: f64 = 120.0;

/// Routes longer than this bias toward having a stop.
const LONG_HAUL_KM: f64 = 3000.0;

/// Departures are drawn uniformly from this business-hours window.
const EARLIEST_DEPARTURE_MINUTE: u32 = 6 * 60;
const LATEST_DEPARTURE_MINUTE: u32 = 21 * 60;

const CURRENCY: &str = "USD";

/// Multiplier for the fare by duration band.
fn duration_fare_factor(minutes: u32) -> f64 {
    match minutes {
        0..=179 => 1.0,
        180..=359 => 2.0,
        360..=599 => 3.0,
        _ => 4.0,
    }
}

fn pick_stops<R: Rng>(km: f64, rng: &mut R) -> u32 {
    let roll: f64 = rng.gen();
    if km > LONG_HAUL_KM {
        if roll < 0.4 {
            0
        } else if roll < 0.85 {
            1
        } else {
            2
        }
    } else if roll < 0.8 {
        0
    } else {
        1
    }
}

/// Minutes-past-midnight to a 12-hour clock string, e.g. 915 -> "3:15 PM".
pub fn format_clock_12h(minutes_past_midnight: u32) -> String {
    let h24 = (minutes_past_midnight / 60) % 24;
    let m = minutes_past_midnight % 60;
    let ampm = if h24 >= 12 { "PM" } else { "AM" };
    let h12 = match h24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12}:{m:02} {ampm}")
}

/// Synthesize a sorted batch of flights for the given search.
///
/// Always generates between [`MIN_RESULTS`] and [`MAX_RESULTS`] flights,
/// sorted by stop count then price ascending. The direct-only filter runs
/// after the sort, so relative order is preserved.
pub fn generate<R: Rng>(
    catalog: &Catalog,
    params: &FlightSearchParams,
    rng: &mut R,
) -> Vec<Flight> {
    let origin_code = match params.origin_code() {
        Ok(code) => code,
        Err(_) => return Vec::new(),
    };
    let destination_code = match params.destination_code() {
        Ok(code) => code,
        Err(_) => return Vec::new(),
    };

    let km = catalog.distance_km(&origin_code, &destination_code);
    let count = rng.gen_range(MIN_RESULTS..=MAX_RESULTS);

    let mut flights = Vec::with_capacity(count as usize);
    for i in 0..count {
        let airline = &catalog.airlines()[rng.gen_range(0..catalog.airlines().len())];
        let stops = pick_stops(km, rng);
        let minutes =
            estimate::estimate_minutes(catalog, &origin_code, &destination_code, &airline.name, stops);

        let seasonal: f64 = rng.gen_range(0.8..1.2);
        let price =
            ((BASE_FARE * duration_fare_factor(minutes) * seasonal / 5.0).round() * 5.0) as u32;

        let departure =
            rng.gen_range(EARLIEST_DEPARTURE_MINUTE..=LATEST_DEPARTURE_MINUTE);
        let arrival = (departure + minutes) % (24 * 60);

        flights.push(Flight {
            id: format!("flight{}", i + 1),
            airline: airline.name.clone(),
            flight_number: format!("{}{}", airline.prefix, rng.gen_range(1000..10000)),
            departure_time: format_clock_12h(departure),
            arrival_time: format_clock_12h(arrival),
            duration: estimate::format_duration(minutes),
            duration_minutes: minutes,
            price,
            currency: CURRENCY.to_string(),
            departure_airport: catalog.describe_airport(&origin_code),
            arrival_airport: catalog.describe_airport(&destination_code),
            departure_airport_code: origin_code.clone(),
            arrival_airport_code: destination_code.clone(),
            stops,
        });
    }

    flights.sort_by(|a, b| a.stops.cmp(&b.stops).then(a.price.cmp(&b.price)));

    if params.direct_flights_only {
        flights.retain(|f| f.stops == 0);
    }

    flights
}
