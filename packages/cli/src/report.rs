//! Interactive report submission flow.

use dialoguer::{Input, Select};
use sauti_client::ApiClient;
use sauti_geocoder::ip_lookup::IpLookupProvider;
use sauti_geocoder::service_registry;
use sauti_geocoder::{LocationRequest, LocationResolver, nominatim};
use sauti_record_models::{Record, RecordType, UrgencyLevel};
use sauti_store::{DraftForm, LocationUpdate};
use sauti_validate::DraftField;

use crate::render;

/// Walks the user through drafting, locating, validating, and
/// submitting a report. Authenticated users create an owned record;
/// everyone else submits anonymously.
pub async fn run(client: &ApiClient) -> Result<Option<Record>, Box<dyn std::error::Error>> {
    let mut form = DraftForm::new();

    let title: String = Input::new().with_prompt("Title").allow_empty(true).interact_text()?;
    form.set_title(title);

    let description: String = Input::new()
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;
    form.set_description(description);

    let types = RecordType::all();
    let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();
    let picked = Select::new()
        .with_prompt("Type")
        .items(&labels)
        .default(0)
        .interact()?;
    form.set_record_type(types[picked]);

    let urgencies = UrgencyLevel::all();
    let labels: Vec<String> = urgencies.iter().map(ToString::to_string).collect();
    let picked = Select::new()
        .with_prompt("Urgency")
        .items(&labels)
        .default(1)
        .interact()?;
    form.set_urgency(urgencies[picked]);

    pick_location(&mut form).await?;

    let image_url: String = Input::new()
        .with_prompt("Image URL (optional)")
        .allow_empty(true)
        .interact_text()?;
    form.set_image_url(image_url);

    let video_url: String = Input::new()
        .with_prompt("Video URL (optional)")
        .allow_empty(true)
        .interact_text()?;
    form.set_video_url(video_url);

    // Submission is blocked until the field errors are fixed.
    while !form.validate() {
        for (field, message) in form.errors() {
            eprintln!("  {field}: {message}");
        }
        refill_invalid_fields(&mut form)?;
    }

    let submitted = if client.token().is_some() {
        client.create_record(form.draft()).await
    } else {
        client.submit_report(form.draft()).await
    };

    match submitted {
        Ok(record) => {
            println!("Report #{} submitted.", record.id);
            Ok(Some(record))
        }
        Err(e) => {
            render::print_error(&e);
            Ok(None)
        }
    }
}

/// Location selection menu: device fix, manual entry, map coordinates,
/// or none. Every path writes through the form's single merge method.
async fn pick_location(form: &mut DraftForm) -> Result<(), Box<dyn std::error::Error>> {
    let choices = [
        "Use current location",
        "Enter coordinates manually",
        "Pick on map (paste map coordinates)",
        "Skip",
    ];
    let picked = Select::new()
        .with_prompt("Location (optional)")
        .items(&choices)
        .default(3)
        .interact()?;

    let http = reqwest_client();

    match picked {
        0 => {
            let resolver = service_registry::ip_lookup_endpoint().map_or_else(
                LocationResolver::unavailable,
                |endpoint| LocationResolver::new(IpLookupProvider::new(http.clone(), &endpoint)),
            );
            match resolver.resolve(&LocationRequest::default()).await {
                Ok(fix) => {
                    form.apply_location(LocationUpdate::Position {
                        latitude: fix.latitude,
                        longitude: fix.longitude,
                    });
                    resolve_address(form, &http, fix.latitude, fix.longitude).await;
                }
                Err(e) => eprintln!("Failed to get current location: {e}"),
            }
        }
        1 => {
            let latitude: String = Input::new()
                .with_prompt("Latitude")
                .allow_empty(true)
                .interact_text()?;
            form.apply_location(LocationUpdate::Latitude(latitude));

            let longitude: String = Input::new()
                .with_prompt("Longitude")
                .allow_empty(true)
                .interact_text()?;
            form.apply_location(LocationUpdate::Longitude(longitude));
        }
        2 => {
            let pasted: String = Input::new()
                .with_prompt("Map coordinates (lat, lng)")
                .interact_text()?;
            if let Some((latitude, longitude)) = parse_coordinate_pair(&pasted) {
                form.apply_location(LocationUpdate::Position {
                    latitude,
                    longitude,
                });
                resolve_address(form, &http, latitude, longitude).await;
            } else {
                eprintln!("Could not parse '{pasted}' as a coordinate pair.");
            }
        }
        _ => {}
    }

    let location = form.location();
    if let (Some(latitude), Some(longitude)) = (location.latitude, location.longitude) {
        println!("Selected: {latitude:.6}, {longitude:.6}");
        if let Some(address) = form.address() {
            println!("Address:  {address}");
        }
    }

    Ok(())
}

/// Reverse-geocodes into the form. Decorative: failure leaves the
/// address empty and is not reported.
async fn resolve_address(
    form: &mut DraftForm,
    http: &reqwest::Client,
    latitude: f64,
    longitude: f64,
) {
    if let Some(endpoint) = service_registry::reverse_endpoint() {
        let address = nominatim::reverse_geocode(http, &endpoint, latitude, longitude).await;
        form.apply_location(LocationUpdate::Address(address));
    }
}

/// Re-prompts only the fields that failed validation.
fn refill_invalid_fields(form: &mut DraftForm) -> Result<(), Box<dyn std::error::Error>> {
    if form.errors().contains_key(&DraftField::Title) {
        let title: String = Input::new().with_prompt("Title").interact_text()?;
        form.set_title(title);
    }
    if form.errors().contains_key(&DraftField::Description) {
        let description: String = Input::new().with_prompt("Description").interact_text()?;
        form.set_description(description);
    }
    if form.errors().contains_key(&DraftField::Coordinates) {
        let latitude: String = Input::new()
            .with_prompt("Latitude")
            .allow_empty(true)
            .interact_text()?;
        form.apply_location(LocationUpdate::Latitude(latitude));
        let longitude: String = Input::new()
            .with_prompt("Longitude")
            .allow_empty(true)
            .interact_text()?;
        form.apply_location(LocationUpdate::Longitude(longitude));
    }
    Ok(())
}

/// Parses `"lat, lng"` / `"lat lng"` map paste formats.
fn parse_coordinate_pair(text: &str) -> Option<(f64, f64)> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let latitude = parts.next()?.parse().ok()?;
    let longitude = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((latitude, longitude))
}

/// A plain HTTP client for the geocoding endpoints, separate from the
/// API client so geocoder traffic never carries the bearer token.
fn reqwest_client() -> reqwest::Client {
    reqwest::Client::new()
}
