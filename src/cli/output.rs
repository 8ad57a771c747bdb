use anyhow::Result;
use serde_json::json;
use skyjourney::SearchOutcome;
use skyjourney::booking::{Airport, TripType, passenger_label};

/// Print a plain-text representation of the session outcome.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
    let Some(snapshot) = &outcome.submitted else {
        println!("No search submitted");
        return;
    };

    let query = snapshot.query();
    println!("Route: {}", snapshot.route());
    match query.trip_type {
        TripType::RoundTrip => {
            println!("Dates: {} to {}", query.departure_date, query.return_date);
        }
        TripType::OneWay => println!("Dates: {} (one way)", query.departure_date),
    }
    println!(
        "Travellers: {}, {}",
        passenger_label(query.passengers),
        query.cabin.label()
    );
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
    let search = match &outcome.submitted {
        Some(snapshot) => {
            let query = snapshot.query();
            let return_date = if query.return_date.is_empty() {
                serde_json::Value::Null
            } else {
                json!(query.return_date)
            };
            json!({
                "tripType": query.trip_type.as_str(),
                "origin": query.origin.as_ref().map(airport_json),
                "destination": query.destination.as_ref().map(airport_json),
                "departureDate": query.departure_date,
                "returnDate": return_date,
                "passengers": query.passengers,
                "cabinClass": query.cabin.as_str(),
            })
        }
        None => serde_json::Value::Null,
    };

    let payload = json!({
        "submitted": outcome.submitted.is_some(),
        "search": search,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

fn airport_json(airport: &Airport) -> serde_json::Value {
    json!({
        "municipality": airport.municipality,
        "name": airport.name,
        "iata_code": airport.iata_code,
    })
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
