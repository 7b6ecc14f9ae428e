use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::model::Flight;

pub fn format_price(price: u32, currency: &str) -> String {
    match currency {
        "USD" => format!("${price}"),
        "EUR" => format!("€{price}"),
        "GBP" => format!("£{price}"),
        "JPY" | "CNY" => format!("¥{price}"),
        _ => format!("{price} {currency}"),
    }
}

pub fn render(flights: &[Flight]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Airline", "Flight", "Route", "Depart", "Arrive", "Duration", "Stops", "Price",
        ]);

    for flight in flights {
        let route = format!(
            "{} → {}",
            flight.departure_airport_code, flight.arrival_airport_code
        );

        let stops = match flight.stops {
            0 => "Nonstop".to_string(),
            n => n.to_string(),
        };

        table.add_row(vec![
            &flight.airline,
            &flight.flight_number,
            &route,
            &flight.departure_time,
            &flight.arrival_time,
            &flight.duration,
            &stops,
            &format_price(flight.price, &flight.currency),
        ]);
    }

    table.to_string()
}
