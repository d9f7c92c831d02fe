//! Public records browsing state.

use sauti_client::query::ListQuery;
use sauti_record_models::{
    FilterUpdate, Pagination, Record, RecordFilters, RecordPage,
};

/// Lifecycle of the record list with respect to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// No fetch in flight; current list may be stale or empty.
    #[default]
    Idle,
    /// A fetch has been issued and not yet applied.
    Loading,
    /// The list reflects the last-issued fetch.
    Loaded,
    /// The last-issued fetch failed; the list is unchanged.
    Error,
}

/// Sequence number identifying one issued fetch.
///
/// Responses are applied only if their sequence number is the highest
/// issued so far, so the final state always matches the last-*issued*
/// request rather than the last-*resolved* response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchSeq(u64);

/// State for the public records browsing session.
///
/// Owns the fetched list, the selection, the active filters, and the
/// pagination cursor for the lifetime of the session. All mutation goes
/// through the transition methods below.
#[derive(Debug, Default)]
pub struct RecordsStore {
    records: Vec<Record>,
    selected: Option<Record>,
    filters: RecordFilters,
    pagination: Pagination,
    phase: FetchPhase,
    error: Option<String>,
    issued: u64,
}

impl RecordsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current record list.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The selected record, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    /// The active filters.
    #[must_use]
    pub const fn filters(&self) -> &RecordFilters {
        &self.filters
    }

    /// The pagination cursor.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The fetch lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// The last fetch failure message, if the phase is `Error`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The list query matching the current filters and page.
    #[must_use]
    pub fn current_query(&self) -> ListQuery {
        ListQuery::from_filters(&self.filters, self.pagination.page)
    }

    /// Marks a fetch as issued and returns its sequence number.
    ///
    /// The returned number must accompany the eventual
    /// [`apply_loaded`](Self::apply_loaded) or
    /// [`apply_failed`](Self::apply_failed) call.
    pub fn begin_fetch(&mut self) -> FetchSeq {
        self.issued += 1;
        self.phase = FetchPhase::Loading;
        self.error = None;
        FetchSeq(self.issued)
    }

    /// Applies a successful fetch, replacing records and pagination
    /// wholesale.
    ///
    /// Returns `false` (and changes nothing) when a later fetch has been
    /// issued since — the response is stale and discarded.
    pub fn apply_loaded(&mut self, seq: FetchSeq, page: RecordPage) -> bool {
        if seq.0 != self.issued {
            log::debug!("discarding stale fetch result (seq {} < {})", seq.0, self.issued);
            return false;
        }
        self.records = page.records;
        self.pagination = page.pagination;
        self.phase = FetchPhase::Loaded;
        self.error = None;
        true
    }

    /// Applies a failed fetch. Records are left unchanged; the error
    /// message is surfaced.
    ///
    /// Returns `false` (and changes nothing) when the failure is stale.
    pub fn apply_failed(&mut self, seq: FetchSeq, message: impl Into<String>) -> bool {
        if seq.0 != self.issued {
            log::debug!("discarding stale fetch failure (seq {} < {})", seq.0, self.issued);
            return false;
        }
        self.phase = FetchPhase::Error;
        self.error = Some(message.into());
        true
    }

    /// Merge-patches the filters and resets pagination to page 1.
    ///
    /// Does not itself trigger a fetch; issuing one is a separate,
    /// explicit caller action.
    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.apply(update);
        self.pagination.page = 1;
        self.phase = FetchPhase::Idle;
    }

    /// Requests a specific page on the next fetch.
    pub fn set_page(&mut self, page: u32) {
        self.pagination.page = page.max(1);
    }

    /// Selects a record for detail display (or clears the selection).
    pub fn select(&mut self, record: Option<Record>) {
        self.selected = record;
    }

    /// Applies a confirmed vote response: the matching record's count is
    /// replaced with the server's. A record no longer in the list is a
    /// no-op — a vote response never inserts.
    pub fn apply_vote(&mut self, record_id: i64, vote_count: u64) {
        if let Some(record) = self.records.iter_mut().find(|r| r.id == record_id) {
            record.vote_count = vote_count;
        }
        if let Some(selected) = self.selected.as_mut()
            && selected.id == record_id
        {
            selected.vote_count = vote_count;
        }
    }

    /// Clears a surfaced error without changing the list.
    pub fn clear_error(&mut self) {
        self.error = None;
        if self.phase == FetchPhase::Error {
            self.phase = FetchPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sauti_record_models::{Filter, RecordStatus};

    use super::*;

    fn record(id: i64, title: &str) -> Record {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "status": "draft",
            "created_at": Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap().to_rfc3339(),
        }))
        .unwrap()
    }

    fn page(ids: &[i64], page_no: u32) -> RecordPage {
        RecordPage {
            records: ids.iter().map(|id| record(*id, "r")).collect(),
            pagination: Pagination {
                page: page_no,
                total_pages: 10,
                total: 100,
            },
        }
    }

    #[test]
    fn fetch_success_replaces_wholesale() {
        let mut store = RecordsStore::new();
        let seq = store.begin_fetch();
        assert_eq!(store.phase(), FetchPhase::Loading);

        assert!(store.apply_loaded(seq, page(&[1, 2], 1)));
        assert_eq!(store.phase(), FetchPhase::Loaded);
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.pagination().total, 100);
    }

    #[test]
    fn fetch_failure_keeps_records() {
        let mut store = RecordsStore::new();
        let seq = store.begin_fetch();
        store.apply_loaded(seq, page(&[1], 1));

        let seq = store.begin_fetch();
        assert!(store.apply_failed(seq, "boom"));
        assert_eq!(store.phase(), FetchPhase::Error);
        assert_eq!(store.error(), Some("boom"));
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn later_issued_fetch_wins_even_if_it_resolves_first() {
        let mut store = RecordsStore::new();

        // Page 2 requested first, then page 1; page 2's response arrives
        // last but must lose.
        let seq_page2 = store.begin_fetch();
        let seq_page1 = store.begin_fetch();

        assert!(store.apply_loaded(seq_page1, page(&[1], 1)));
        assert!(!store.apply_loaded(seq_page2, page(&[2], 2)));

        assert_eq!(store.pagination().page, 1);
        assert_eq!(store.records()[0].id, 1);
        assert_eq!(store.phase(), FetchPhase::Loaded);
    }

    #[test]
    fn stale_failure_does_not_clobber_fresh_result() {
        let mut store = RecordsStore::new();

        let seq_old = store.begin_fetch();
        let seq_new = store.begin_fetch();

        assert!(store.apply_loaded(seq_new, page(&[7], 1)));
        assert!(!store.apply_failed(seq_old, "slow request finally failed"));

        assert_eq!(store.phase(), FetchPhase::Loaded);
        assert!(store.error().is_none());
    }

    #[test]
    fn filter_update_resets_page_to_one() {
        let mut store = RecordsStore::new();
        let seq = store.begin_fetch();
        store.apply_loaded(seq, page(&[1], 5));
        assert_eq!(store.pagination().page, 5);

        store.update_filters(FilterUpdate::status(Filter::Only(RecordStatus::Resolved)));

        assert_eq!(store.pagination().page, 1);
        assert_eq!(store.phase(), FetchPhase::Idle);
        assert_eq!(
            store.filters().status,
            Filter::Only(RecordStatus::Resolved)
        );
    }

    #[test]
    fn vote_for_absent_record_is_a_no_op() {
        let mut store = RecordsStore::new();
        let seq = store.begin_fetch();
        store.apply_loaded(seq, page(&[1, 2], 1));

        store.apply_vote(99, 14);

        assert_eq!(store.records().len(), 2);
        assert!(store.records().iter().all(|r| r.vote_count == 0));
    }

    #[test]
    fn vote_patches_list_and_selection() {
        let mut store = RecordsStore::new();
        let seq = store.begin_fetch();
        store.apply_loaded(seq, page(&[1, 2], 1));
        store.select(Some(store.records()[0].clone()));

        store.apply_vote(1, 5);

        assert_eq!(store.records()[0].vote_count, 5);
        assert_eq!(store.selected().unwrap().vote_count, 5);
        assert_eq!(store.records()[1].vote_count, 0);
    }

    #[test]
    fn current_query_tracks_filters_and_page() {
        let mut store = RecordsStore::new();
        store.update_filters(FilterUpdate::search("clinic".to_owned()));
        store.set_page(4);

        let params = store.current_query().params();
        assert!(params.contains(&("search", "clinic".to_owned())));
        assert!(params.contains(&("page", "4".to_owned())));
    }
}
