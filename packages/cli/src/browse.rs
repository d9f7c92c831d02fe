//! Interactive public-records browser driven by [`RecordsStore`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dialoguer::{Input, Select};
use sauti_client::ApiClient;
use sauti_record_models::{
    Filter, FilterUpdate, RecordStatus, RecordType, UrgencyLevel, VoteType,
};
use sauti_store::{Debouncer, RecordsStore, SEARCH_DEBOUNCE};

use crate::render;

/// Runs the browse loop until the user quits.
pub async fn run(client: Arc<ApiClient>) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(Mutex::new(RecordsStore::new()));
    let mut debouncer = Debouncer::new();

    fetch(Arc::clone(&client), Arc::clone(&store)).await;
    render_list(&store);

    let actions = [
        "Next page",
        "Previous page",
        "Filter by status",
        "Filter by type",
        "Filter by urgency",
        "Search",
        "Open record",
        "Vote on a record",
        "Refresh",
        "Quit",
    ];

    loop {
        let action = Select::new()
            .with_prompt("Browse")
            .items(&actions)
            .default(8)
            .interact()?;

        match action {
            0 => {
                let next = {
                    let guard = lock(&store);
                    let pagination = guard.pagination();
                    pagination.page.saturating_add(1).min(pagination.total_pages)
                };
                lock(&store).set_page(next);
                fetch(Arc::clone(&client), Arc::clone(&store)).await;
            }
            1 => {
                let previous = lock(&store).pagination().page.saturating_sub(1);
                lock(&store).set_page(previous);
                fetch(Arc::clone(&client), Arc::clone(&store)).await;
            }
            2 => {
                let update = FilterUpdate::status(pick_filter(
                    "Status",
                    RecordStatus::all(),
                )?);
                lock(&store).update_filters(update);
                fetch(Arc::clone(&client), Arc::clone(&store)).await;
            }
            3 => {
                let update = FilterUpdate::record_type(pick_filter(
                    "Type",
                    RecordType::all(),
                )?);
                lock(&store).update_filters(update);
                fetch(Arc::clone(&client), Arc::clone(&store)).await;
            }
            4 => {
                let update = FilterUpdate::urgency(pick_filter(
                    "Urgency",
                    UrgencyLevel::all(),
                )?);
                lock(&store).update_filters(update);
                fetch(Arc::clone(&client), Arc::clone(&store)).await;
            }
            5 => {
                let term: String = Input::new()
                    .with_prompt("Search reports")
                    .allow_empty(true)
                    .interact_text()?;
                lock(&store).update_filters(FilterUpdate::search(term));

                // The fetch fires only after the debounce window; a
                // quicker follow-up search would cancel this one.
                let task_client = Arc::clone(&client);
                let task_store = Arc::clone(&store);
                debouncer.schedule(SEARCH_DEBOUNCE, async move {
                    fetch(task_client, task_store).await;
                });

                // Wait the window out so the refreshed list is on
                // screen before the next prompt.
                tokio::time::sleep(SEARCH_DEBOUNCE + Duration::from_millis(250)).await;
            }
            6 => {
                let id: i64 = Input::new().with_prompt("Record id").interact_text()?;
                match client.public_record(id).await {
                    Ok(record) => {
                        render::print_record_details(&record, None);
                        lock(&store).select(Some(record));
                    }
                    Err(e) => render::print_error(&e),
                }
            }
            7 => {
                vote(&client, &store).await?;
            }
            8 => {
                fetch(Arc::clone(&client), Arc::clone(&store)).await;
            }
            _ => break,
        }

        render_list(&store);
    }

    Ok(())
}

/// Issues a fetch for the store's current query and applies the result.
/// The sequence number makes a superseded response a discarded no-op.
async fn fetch(client: Arc<ApiClient>, store: Arc<Mutex<RecordsStore>>) {
    let (seq, query) = {
        let mut guard = lock(&store);
        let seq = guard.begin_fetch();
        (seq, guard.current_query())
    };

    match client.public_records(&query).await {
        Ok(page) => {
            lock(&store).apply_loaded(seq, page);
        }
        Err(e) => {
            lock(&store).apply_failed(seq, e.to_string());
        }
    }
}

/// Voting requires a signed-in session; the server reconciles the count.
async fn vote(
    client: &Arc<ApiClient>,
    store: &Arc<Mutex<RecordsStore>>,
) -> Result<(), Box<dyn std::error::Error>> {
    if client.token().is_none() {
        println!("Sign in first (sauti login) to vote.");
        return Ok(());
    }

    let id: i64 = Input::new().with_prompt("Record id").interact_text()?;
    let labels: Vec<String> = VoteType::all().iter().map(ToString::to_string).collect();
    let picked = Select::new()
        .with_prompt("Vote type")
        .items(&labels)
        .default(0)
        .interact()?;

    match client.vote(id, VoteType::all()[picked]).await {
        Ok(response) => {
            lock(store).apply_vote(id, response.vote_count);
            println!("Vote recorded ({} votes).", response.vote_count);
        }
        Err(e) => render::print_error(&e),
    }

    Ok(())
}

/// Select menu over "All" plus each narrowing value.
fn pick_filter<T: Copy + std::fmt::Display>(
    prompt: &str,
    values: &[T],
) -> Result<Filter<T>, Box<dyn std::error::Error>> {
    let mut labels = vec!["All".to_owned()];
    labels.extend(values.iter().map(ToString::to_string));
    let picked = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(if picked == 0 {
        Filter::All
    } else {
        Filter::Only(values[picked - 1])
    })
}

fn render_list(store: &Arc<Mutex<RecordsStore>>) {
    let guard = lock(store);
    if let Some(error) = guard.error() {
        eprintln!("{error}");
    }
    render::print_record_list(guard.records());
    render::print_pagination(guard.pagination());
}

fn lock(store: &Arc<Mutex<RecordsStore>>) -> MutexGuard<'_, RecordsStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
