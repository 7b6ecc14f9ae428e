//! The chat-facing search path: free text in, flights plus a conversational
//! reply out. Results pass through the bucket shape of the simulated
//! third-party API before being flattened back to a plain list.

use chrono::NaiveDate;
use rand::Rng;

use crate::catalog::Catalog;
use crate::generate;
use crate::model::{flatten_buckets, AssistantReply, Bucket, Flight, FlightSearchParams, TripType};
use crate::nlq;

/// Group flights into the canned bucket names. Each flight lands in exactly
/// one bucket; flattening in bucket order yields every flight once.
pub fn bucketize(flights: Vec<Flight>) -> Vec<Bucket> {
    let Some(cheapest) = flights
        .iter()
        .enumerate()
        .min_by_key(|(_, f)| f.price)
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };

    let fastest = flights
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != cheapest)
        .min_by_key(|(_, f)| f.duration_minutes)
        .map(|(i, _)| i);

    let mut best = Vec::new();
    let mut cheapest_items = Vec::new();
    let mut fastest_items = Vec::new();
    let mut alternative = Vec::new();

    for (i, flight) in flights.into_iter().enumerate() {
        if i == cheapest {
            cheapest_items.push(flight);
        } else if Some(i) == fastest {
            fastest_items.push(flight);
        } else if flight.stops > 0 {
            alternative.push(flight);
        } else {
            best.push(flight);
        }
    }

    [
        ("Best", best),
        ("Cheapest", cheapest_items),
        ("Fastest", fastest_items),
        ("Alternative", alternative),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(name, items)| Bucket {
        name: name.to_string(),
        items,
    })
    .collect()
}

/// Answer a natural-language flight query.
pub fn respond<R: Rng>(
    catalog: &Catalog,
    query: &str,
    today: NaiveDate,
    rng: &mut R,
) -> AssistantReply {
    let details = nlq::extract(query, today);
    let origin = catalog.resolve_city(&details.origin);
    let destination = catalog.resolve_city(&details.destination);

    if origin.code.len() < 3 || destination.code.len() < 3 {
        let unmatched = if origin.code.len() < 3 {
            &details.origin
        } else {
            &details.destination
        };
        return AssistantReply {
            flights: Vec::new(),
            message: format!(
                "I couldn't find an airport for \"{unmatched}\". Please try a different city name."
            ),
        };
    }

    let params = FlightSearchParams {
        departure_airport: format!("{} - {}", origin.code, origin.name),
        destination_airport: format!("{} - {}", destination.code, destination.name),
        departure_date: Some(details.date),
        return_date: None,
        direct_flights_only: false,
        passengers: 1,
        trip: TripType::OneWay,
    };

    let flights = flatten_buckets(bucketize(generate::generate(catalog, &params, rng)));

    let date_str = details.date.format("%a, %b %-d").to_string();
    let mut message = format!(
        "I found {} flights from {} to {} on {}. ",
        flights.len(),
        origin.city,
        destination.city,
        date_str,
    );

    if let Some(cheapest) = flights.iter().min_by_key(|f| f.price) {
        message.push_str(&format!(
            "The cheapest option is ${} with {}. ",
            cheapest.price, cheapest.airline
        ));
    }

    let direct = flights.iter().filter(|f| f.stops == 0).count();
    if direct == 1 {
        message.push_str("There is 1 direct flight available. ");
    } else if direct > 1 {
        message.push_str(&format!("There are {direct} direct flights available. "));
    }

    let mut assumed = Vec::new();
    if details.origin_assumed {
        assumed.push(format!("departing from {}", origin.city));
    }
    if details.destination_assumed {
        assumed.push(format!("flying to {}", destination.city));
    }
    if details.date_assumed {
        assumed.push(format!("traveling on {date_str}"));
    }
    if !assumed.is_empty() {
        message.push_str(&format!(
            "I couldn't read every detail of your request, so I assumed {}. ",
            assumed.join(" and ")
        ));
    }

    message.push_str("Here are the available options:");

    AssistantReply { flights, message }
}
