//! Terminal rendering for records, stats, and errors.

use console::style;
use sauti_cli_utils::{TRUNCATE_LEN, format_date, styled_status, truncate};
use sauti_record_models::{Pagination, Record};
use sauti_store::StatusCounts;

/// Prints one line per record.
pub fn print_record_list(records: &[Record]) {
    if records.is_empty() {
        println!("No reports found. Try adjusting your search or filters.");
        return;
    }

    for record in records {
        let record_type = record
            .record_type
            .map_or("general", |t| t.label());
        println!(
            "#{:<5} {}  {}  [{}]  {} votes",
            record.id,
            styled_status(record.status),
            style(&record.title).bold(),
            record_type,
            record.vote_count,
        );
        if !record.description.is_empty() {
            println!("       {}", truncate(&record.description, TRUNCATE_LEN));
        }
    }
}

/// Prints the pagination footer under a list.
pub fn print_pagination(pagination: &Pagination) {
    println!(
        "\nPage {} of {} ({} total)",
        pagination.page, pagination.total_pages, pagination.total
    );
}

/// Prints the full detail view for one record.
pub fn print_record_details(record: &Record, address: Option<&str>) {
    println!("{}", style(&record.title).bold());
    println!("Status:   {}", styled_status(record.status));
    if let Some(record_type) = record.record_type {
        println!("Type:     {}", record_type.label());
    }
    if let Some(urgency) = record.urgency {
        println!("Urgency:  {urgency}");
    }
    println!("Votes:    {}", record.vote_count);
    println!(
        "Reporter: {}",
        record.creator_name.as_deref().unwrap_or("Anonymous")
    );
    println!("Created:  {}", format_date(&record.created_at));

    let location = record.location();
    if let (Some(latitude), Some(longitude)) = (location.latitude, location.longitude) {
        println!("Location: {latitude:.4}, {longitude:.4}");
        if let Some(address) = address {
            println!("          {address}");
        }
    }

    if let Some(url) = record.image_url.as_deref() {
        println!("Image:    {url}");
    }
    if let Some(url) = record.video_url.as_deref() {
        println!("Video:    {url}");
    }

    if !record.description.is_empty() {
        println!("\n{}", record.description);
    }
}

/// Prints the admin per-status summary row.
pub fn print_status_counts(counts: &StatusCounts) {
    println!(
        "{} total | {} draft | {} under investigation | {} resolved | {} rejected",
        counts.total,
        counts.draft,
        style(counts.investigating).blue(),
        style(counts.resolved).green(),
        style(counts.rejected).red(),
    );
}

/// Prints an operation failure with its remediation, without exiting.
pub fn print_error(error: &sauti_client::ApiError) {
    eprintln!("{} {error}", style("error:").red().bold());
}
