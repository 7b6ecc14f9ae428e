use std::collections::HashMap;

/// Static airport reference entry. Loaded once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone)]
pub struct Airline {
    pub name: String,
    /// Two-letter IATA prefix used for flight numbers.
    pub prefix: String,
}

/// A city name resolved to a concrete airport.
#[derive(Debug, Clone)]
pub struct ResolvedPlace {
    pub code: String,
    pub city: String,
    pub name: String,
}

/// Immutable lookup data for the simulation: airports with coordinates,
/// a bidirectional great-circle distance table, and the airline roster
/// with per-airline timing adjustments.
///
/// Built once (usually via [`Catalog::builtin`]) and passed by reference,
/// so tests can substitute their own tables.
pub struct Catalog {
    airports: Vec<Airport>,
    airlines: Vec<Airline>,
    distances: HashMap<(String, String), f64>,
    airline_jitter: HashMap<String, i64>,
}

/// Used when neither the distance table nor the coordinate table knows
/// a route endpoint.
pub const FALLBACK_DISTANCE_KM: f64 = 2000.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl Catalog {
    pub fn new(
        airports: Vec<Airport>,
        airlines: Vec<Airline>,
        distances: Vec<(&str, &str, f64)>,
        jitter: Vec<(&str, i64)>,
    ) -> Self {
        let distances = distances
            .into_iter()
            .map(|(a, b, km)| (pair_key(a, b), km))
            .collect();
        let airline_jitter = jitter
            .into_iter()
            .map(|(name, minutes)| (name.to_string(), minutes))
            .collect();
        Self {
            airports,
            airlines,
            distances,
            airline_jitter,
        }
    }

    /// The fixed dataset shipped with the simulation.
    pub fn builtin() -> Self {
        let airports = BUILTIN_AIRPORTS
            .iter()
            .map(|&(code, name, city, country, lat, lon)| Airport {
                code: code.to_string(),
                name: name.to_string(),
                city: city.to_string(),
                country: country.to_string(),
                lat,
                lon,
            })
            .collect();

        let airlines = BUILTIN_AIRLINES
            .iter()
            .map(|&(name, prefix)| Airline {
                name: name.to_string(),
                prefix: prefix.to_string(),
            })
            .collect();

        Self::new(
            airports,
            airlines,
            BUILTIN_DISTANCES.to_vec(),
            BUILTIN_JITTER.to_vec(),
        )
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    /// "JFK - New York (John F. Kennedy International Airport)", or the bare
    /// code when the airport is not in the table.
    pub fn describe_airport(&self, code: &str) -> String {
        match self.airport(code) {
            Some(a) => format!("{} - {} ({})", a.code, a.city, a.name),
            None => code.to_uppercase(),
        }
    }

    /// Great-circle distance between two airports: the static table first,
    /// then Haversine over the coordinate table, then a fixed fallback.
    /// Unknown inputs never error; this is simulation policy.
    pub fn distance_km(&self, from: &str, to: &str) -> f64 {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if let Some(&km) = self.distances.get(&pair_key(&from, &to)) {
            return km;
        }
        match (self.airport(&from), self.airport(&to)) {
            (Some(a), Some(b)) => haversine_km(a.lat, a.lon, b.lat, b.lon),
            _ => FALLBACK_DISTANCE_KM,
        }
    }

    /// Additive timing adjustment for an airline. Airlines without an entry
    /// get zero.
    pub fn jitter_minutes(&self, airline: &str) -> i64 {
        self.airline_jitter.get(airline).copied().unwrap_or(0)
    }

    /// Resolve free-text place name to an airport. Matches city names and
    /// bare IATA codes from the airport table; anything else falls back to a
    /// synthetic airport named after the query.
    pub fn resolve_city(&self, text: &str) -> ResolvedPlace {
        let lower = text.to_lowercase();
        for airport in &self.airports {
            if lower.contains(&airport.city.to_lowercase())
                || lower.contains(&airport.code.to_lowercase())
            {
                return ResolvedPlace {
                    code: airport.code.clone(),
                    city: airport.city.clone(),
                    name: airport.name.clone(),
                };
            }
        }

        let code: String = text
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .take(3)
            .collect::<String>()
            .to_uppercase();
        let city = capitalize(text.trim());
        ResolvedPlace {
            code,
            name: format!("{city} Airport"),
            city,
        }
    }
}

fn capitalize(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[rustfmt::skip]
const BUILTIN_AIRPORTS: &[(&str, &str, &str, &str, f64, f64)] = &[
    ("JFK", "John F. Kennedy International Airport", "New York", "USA", 40.6413, -73.7781),
    ("LGA", "LaGuardia Airport", "New York", "USA", 40.7769, -73.8740),
    ("EWR", "Newark Liberty International Airport", "Newark", "USA", 40.6895, -74.1745),
    ("LAX", "Los Angeles International Airport", "Los Angeles", "USA", 33.9416, -118.4085),
    ("SFO", "San Francisco International Airport", "San Francisco", "USA", 37.6213, -122.3790),
    ("ORD", "O'Hare International Airport", "Chicago", "USA", 41.9742, -87.9073),
    ("ATL", "Hartsfield-Jackson Atlanta International Airport", "Atlanta", "USA", 33.6407, -84.4277),
    ("DFW", "Dallas/Fort Worth International Airport", "Dallas", "USA", 32.8998, -97.0403),
    ("MIA", "Miami International Airport", "Miami", "USA", 25.7959, -80.2870),
    ("LHR", "London Heathrow Airport", "London", "UK", 51.4700, -0.4543),
    ("CDG", "Charles de Gaulle Airport", "Paris", "France", 49.0097, 2.5479),
    ("FRA", "Frankfurt Airport", "Frankfurt", "Germany", 50.0379, 8.5622),
    ("AMS", "Amsterdam Airport Schiphol", "Amsterdam", "Netherlands", 52.3105, 4.7683),
    ("MAD", "Adolfo Suárez Madrid-Barajas Airport", "Madrid", "Spain", 40.4983, -3.5676),
    ("BCN", "Barcelona-El Prat Airport", "Barcelona", "Spain", 41.2974, 2.0833),
    ("FCO", "Leonardo da Vinci-Fiumicino Airport", "Rome", "Italy", 41.8003, 12.2389),
    ("DXB", "Dubai International Airport", "Dubai", "UAE", 25.2532, 55.3657),
    ("SIN", "Singapore Changi Airport", "Singapore", "Singapore", 1.3644, 103.9915),
    ("HND", "Tokyo Haneda Airport", "Tokyo", "Japan", 35.5494, 139.7798),
    ("SYD", "Sydney Airport", "Sydney", "Australia", -33.9399, 151.1753),
    ("HKG", "Hong Kong International Airport", "Hong Kong", "China", 22.3080, 113.9185),
];

const BUILTIN_AIRLINES: &[(&str, &str)] = &[
    ("Delta Airlines", "DL"),
    ("American Airlines", "AA"),
    ("United Airlines", "UA"),
    ("JetBlue", "B6"),
    ("Emirates", "EK"),
    ("Singapore Airlines", "SQ"),
];

// Emirates deliberately has no entry: airlines outside the table get zero.
const BUILTIN_JITTER: &[(&str, i64)] = &[
    ("Delta Airlines", -5),
    ("American Airlines", 10),
    ("United Airlines", 5),
    ("JetBlue", -10),
    ("Singapore Airlines", -15),
];

#[rustfmt::skip]
const BUILTIN_DISTANCES: &[(&str, &str, f64)] = &[
    ("JFK", "LAX", 3983.0),
    ("JFK", "SFO", 4152.0),
    ("JFK", "ORD", 1188.0),
    ("JFK", "ATL", 1222.0),
    ("JFK", "MIA", 1757.0),
    ("JFK", "LHR", 5541.0),
    ("JFK", "CDG", 5834.0),
    ("LAX", "SFO", 543.0),
    ("LAX", "ORD", 2805.0),
    ("LAX", "HND", 8813.0),
    ("ORD", "MIA", 1913.0),
    ("LHR", "CDG", 348.0),
    ("LHR", "AMS", 371.0),
    ("LHR", "FRA", 654.0),
    ("LHR", "DXB", 5493.0),
    ("CDG", "FCO", 1105.0),
    ("MAD", "BCN", 483.0),
    ("DXB", "SIN", 5846.0),
    ("SIN", "HND", 5325.0),
    ("SIN", "SYD", 6301.0),
    ("HKG", "HND", 2893.0),
];
