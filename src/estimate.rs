//! Flight duration estimation from great-circle distance.
//!
//! Deterministic: the same route, airline, and stop count always produce the
//! same figure. Unknown airports and airlines fall back to defaults instead
//! of erroring; the subsystem is explicitly a simulation.

use crate::catalog::Catalog;

/// Average cruise speed used to convert distance into flight time.
pub const CRUISE_SPEED_KMH: f64 = 800.0;

/// Fixed takeoff/landing overhead added to every flight.
pub const GROUND_OPS_MINUTES: i64 = 30;

/// Each stop stretches total time by this fraction to model layovers.
pub const STOP_PENALTY_FACTOR: f64 = 0.25;

/// Estimated total minutes for a route with a given airline and stop count.
pub fn estimate_minutes(
    catalog: &Catalog,
    origin: &str,
    destination: &str,
    airline: &str,
    stops: u32,
) -> u32 {
    let km = catalog.distance_km(origin, destination);
    let base = (km / CRUISE_SPEED_KMH * 60.0).round() as i64 + GROUND_OPS_MINUTES;
    let adjusted = base + catalog.jitter_minutes(airline);
    let total = if stops > 0 {
        (adjusted as f64 * (1.0 + stops as f64 * STOP_PENALTY_FACTOR)).round() as i64
    } else {
        adjusted
    };
    total.max(0) as u32
}

/// "{hours}h {minutes}m"
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Convenience wrapper returning the formatted string directly.
pub fn estimate_duration(
    catalog: &Catalog,
    origin: &str,
    destination: &str,
    airline: &str,
    stops: u32,
) -> String {
    format_duration(estimate_minutes(catalog, origin, destination, airline, stops))
}
