#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line client for the sauti reporting platform.
//!
//! Citizens browse and vote on public reports and submit new ones;
//! administrators triage and change report status. The session token is
//! read from `SAUTI_TOKEN` (this tool holds it in memory only) and the
//! API endpoint from `SAUTI_API_URL` or `--api-url`.

mod browse;
mod render;
mod report;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use sauti_client::query::ListQuery;
use sauti_client::{ApiClient, ApiConfig, SignupRequest};
use sauti_geocoder::{nominatim, service_registry};
use sauti_record_models::{
    Filter, Record, RecordStatus, RecordType, UrgencyLevel, VoteType,
};
use sauti_store::{AdminStore, allowed_transitions};

#[derive(Parser)]
#[command(name = "sauti", about = "Citizen incident reporting client")]
struct Cli {
    /// Base URL of the reporting API (overrides `SAUTI_API_URL`)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List public reports
    List {
        /// Filter by status (e.g. "resolved", "under investigation")
        #[arg(long)]
        status: Option<RecordStatus>,
        /// Filter by report type (e.g. "red-flag")
        #[arg(long = "type")]
        record_type: Option<RecordType>,
        /// Filter by urgency level
        #[arg(long)]
        urgency: Option<UrgencyLevel>,
        /// Free-text search term
        #[arg(long)]
        search: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one public report
    Show {
        /// Record identifier
        id: i64,
    },
    /// Browse public reports interactively
    Browse,
    /// Draft and submit a report interactively
    Report,
    /// Vote on a report
    Vote {
        /// Record identifier
        id: i64,
        /// Vote type: "support" or "urgent"
        #[arg(long, default_value = "support")]
        vote_type: VoteType,
    },
    /// Withdraw your vote on a report
    Unvote {
        /// Record identifier
        id: i64,
    },
    /// List your own reports
    Mine,
    /// Show the change history of one of your reports
    History {
        /// Record identifier
        id: i64,
    },
    /// Sign in and print the session token
    Login,
    /// Create an account and print the session token
    Signup,
    /// Show the signed-in user
    Whoami,
    /// Administrator tools
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List all records for triage
    Records {
        /// Narrow the view to one status
        #[arg(long)]
        status: Option<RecordStatus>,
    },
    /// Show aggregate platform statistics
    Stats,
    /// Change a record's status
    SetStatus {
        /// Record identifier
        id: i64,
        /// Target status; omitted → pick from the permitted transitions
        #[arg(long)]
        status: Option<RecordStatus>,
        /// Reason recorded in the record's history
        #[arg(long)]
        reason: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    sauti_cli_utils::init_logger();

    let cli = Cli::parse();

    let mut config = ApiConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    let client = Arc::new(ApiClient::new(&config)?);

    if let Ok(token) = std::env::var("SAUTI_TOKEN")
        && !token.is_empty()
    {
        client.set_token(&token);
    }

    match cli.command {
        Commands::List {
            status,
            record_type,
            urgency,
            search,
            page,
        } => {
            let query = ListQuery {
                status: status.map_or(Filter::All, Filter::Only),
                record_type: record_type.map_or(Filter::All, Filter::Only),
                urgency: urgency.map_or(Filter::All, Filter::Only),
                search: search.unwrap_or_default(),
                page: Some(page),
            };
            let page = client.public_records(&query).await?;
            render::print_record_list(&page.records);
            render::print_pagination(&page.pagination);
        }
        Commands::Show { id } => {
            let record = client.public_record(id).await?;
            let address = resolve_address(&record).await;
            render::print_record_details(&record, address.as_deref());
        }
        Commands::Browse => browse::run(Arc::clone(&client)).await?,
        Commands::Report => {
            report::run(&client).await?;
        }
        Commands::Vote { id, vote_type } => {
            let response = client.vote(id, vote_type).await?;
            println!("Vote recorded ({} votes).", response.vote_count);
        }
        Commands::Unvote { id } => {
            client.remove_vote(id).await?;
            println!("Vote withdrawn.");
        }
        Commands::Mine => {
            let page = client.my_records(&ListQuery::default()).await?;
            render::print_record_list(&page.records);
        }
        Commands::History { id } => {
            let history = client.record_history(id).await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Commands::Login => {
            let email: String = Input::new().with_prompt("Email").interact_text()?;
            let password = Password::new().with_prompt("Password").interact()?;
            let session = client.login(&email, &password).await?;
            if let Some(user) = &session.user {
                println!("Signed in as {}.", user.name);
            }
            print_token_hint(&session.token);
        }
        Commands::Signup => {
            let name: String = Input::new().with_prompt("Name").interact_text()?;
            let email: String = Input::new().with_prompt("Email").interact_text()?;
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()?;
            let session = client
                .signup(&SignupRequest {
                    name,
                    email,
                    password,
                })
                .await?;
            print_token_hint(&session.token);
        }
        Commands::Whoami => {
            let user = client.current_user().await?;
            let role = if user.is_admin { "admin" } else { "citizen" };
            println!("{} <{}> ({role})", user.name, user.email);
        }
        Commands::Admin { command } => match command {
            AdminCommands::Records { status } => {
                admin_overview(&client, status).await?;
            }
            AdminCommands::Stats => {
                let stats = client.admin_stats().await?;
                if let Some(total) = stats.total_records {
                    println!("Total records: {total}");
                }
                if let Some(total) = stats.total_users {
                    println!("Total users:   {total}");
                }
                for (key, value) in &stats.extra {
                    println!("{key}: {value}");
                }
            }
            AdminCommands::SetStatus { id, status, reason } => {
                set_status(&client, id, status, reason).await?;
            }
        },
    }

    Ok(())
}

/// Loads the triage view: records and stats fetched concurrently, then
/// filtered locally.
async fn admin_overview(
    client: &ApiClient,
    status: Option<RecordStatus>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = AdminStore::new();
    let seq = store.begin_load();

    let query = ListQuery::default();
    let (records, stats) = tokio::join!(
        client.admin_records(&query),
        client.admin_stats()
    );

    match (records, stats) {
        (Ok(page), Ok(stats)) => {
            store.apply_loaded(seq, page.records, stats);
        }
        (Err(e), _) | (_, Err(e)) => {
            store.apply_failed(seq, e.to_string());
            return Err(e.into());
        }
    }

    store.set_filter(status.map_or(Filter::All, Filter::Only));

    render::print_status_counts(&store.status_counts());
    println!();
    let filtered: Vec<Record> = store.filtered_records().into_iter().cloned().collect();
    render::print_record_list(&filtered);

    Ok(())
}

/// Changes a record's status, offering only the transitions permitted
/// from its current status. The local view is never patched before the
/// server confirms; on failure the command exits and the admin retries.
async fn set_status(
    client: &ApiClient,
    id: i64,
    status: Option<RecordStatus>,
    reason: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = client.public_record(id).await?;
    let transitions = allowed_transitions(record.status);

    if transitions.is_empty() {
        println!(
            "#{id} is {}; no further transitions are permitted.",
            record.status
        );
        return Ok(());
    }

    let target = match status {
        Some(target) => {
            if !transitions.contains(&target) {
                return Err(format!(
                    "cannot move #{id} from '{}' to '{target}'; permitted: {}",
                    record.status,
                    transitions
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
                .into());
            }
            target
        }
        None => {
            let labels: Vec<String> =
                transitions.iter().map(ToString::to_string).collect();
            let picked = Select::new()
                .with_prompt(format!("New status for #{id} (currently {})", record.status))
                .items(&labels)
                .default(0)
                .interact()?;
            transitions[picked]
        }
    };

    let reason = match reason {
        Some(reason) => reason,
        None => Input::new()
            .with_prompt("Reason (optional)")
            .allow_empty(true)
            .interact_text()?,
    };

    let updated = client
        .update_record_status(id, target, Some(&reason))
        .await?;
    println!("#{} is now {}.", updated.id, updated.status);

    Ok(())
}

/// Decorative reverse geocoding for the detail view.
async fn resolve_address(record: &Record) -> Option<String> {
    let location = record.location();
    let (latitude, longitude) = (location.latitude?, location.longitude?);
    let endpoint = service_registry::reverse_endpoint()?;
    nominatim::reverse_geocode(&reqwest::Client::new(), &endpoint, latitude, longitude).await
}

fn print_token_hint(token: &str) {
    println!("Token: {token}");
    println!("Export it for subsequent commands: export SAUTI_TOKEN={token}");
}
