//! Admin triage state and the status transition workflow.

use sauti_record_models::{AdminStats, Filter, Record, RecordStatus};

/// The transitions an administrator may offer for a record in the given
/// status.
///
/// The workflow is restricted: a draft is either taken under
/// investigation or rejected outright; an investigation ends resolved or
/// rejected; resolved and rejected are terminal. The returned slice
/// never contains the current status, so the UI cannot offer a no-op
/// transition.
#[must_use]
pub const fn allowed_transitions(status: RecordStatus) -> &'static [RecordStatus] {
    match status {
        RecordStatus::Draft => &[RecordStatus::UnderInvestigation, RecordStatus::Rejected],
        RecordStatus::UnderInvestigation => {
            &[RecordStatus::Resolved, RecordStatus::Rejected]
        }
        RecordStatus::Resolved | RecordStatus::Rejected => &[],
    }
}

/// Per-status record counts over the loaded triage list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// All loaded records.
    pub total: usize,
    /// Records in `draft`.
    pub draft: usize,
    /// Records in `under investigation`.
    pub investigating: usize,
    /// Records in `resolved`.
    pub resolved: usize,
    /// Records in `rejected`.
    pub rejected: usize,
}

/// State for the admin triage view: the full record list, aggregate
/// stats, and a local status filter.
///
/// Status changes are never applied speculatively — the local copy is
/// patched only via [`apply_status_updated`](Self::apply_status_updated)
/// after the server confirms; on failure the list is untouched and the
/// caller retries manually.
#[derive(Debug, Default)]
pub struct AdminStore {
    records: Vec<Record>,
    stats: Option<AdminStats>,
    filter: Filter<RecordStatus>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

/// Sequence number identifying one issued admin load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadSeq(u64);

impl AdminStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded triage list, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The loaded aggregate stats, if any.
    #[must_use]
    pub const fn stats(&self) -> Option<&AdminStats> {
        self.stats.as_ref()
    }

    /// The local status filter.
    #[must_use]
    pub const fn filter(&self) -> Filter<RecordStatus> {
        self.filter
    }

    /// Whether a load is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// The last load failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a load as issued.
    pub fn begin_load(&mut self) -> LoadSeq {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        LoadSeq(self.issued)
    }

    /// Applies a successful load of records and stats.
    ///
    /// Returns `false` when a later load has been issued since.
    pub fn apply_loaded(
        &mut self,
        seq: LoadSeq,
        records: Vec<Record>,
        stats: AdminStats,
    ) -> bool {
        if seq.0 != self.issued {
            return false;
        }
        self.records = records;
        self.stats = Some(stats);
        self.loading = false;
        self.error = None;
        true
    }

    /// Applies a failed load. The list is unchanged.
    ///
    /// Returns `false` when the failure is stale.
    pub fn apply_failed(&mut self, seq: LoadSeq, message: impl Into<String>) -> bool {
        if seq.0 != self.issued {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    /// Sets the local status filter. Unlike the public list this filters
    /// the already-loaded records, so no page reset or refetch applies.
    pub fn set_filter(&mut self, filter: Filter<RecordStatus>) {
        self.filter = filter;
    }

    /// Records matching the local status filter.
    #[must_use]
    pub fn filtered_records(&self) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| match self.filter {
                Filter::All => true,
                Filter::Only(status) => record.status == status,
            })
            .collect()
    }

    /// Per-status counts over the loaded list.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.records.len(),
            ..StatusCounts::default()
        };
        for record in &self.records {
            match record.status {
                RecordStatus::Draft => counts.draft += 1,
                RecordStatus::UnderInvestigation => counts.investigating += 1,
                RecordStatus::Resolved => counts.resolved += 1,
                RecordStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Patches a record's status from a confirmed server response.
    ///
    /// A record no longer in the list is a no-op.
    pub fn apply_status_updated(&mut self, record_id: i64, status: RecordStatus) {
        if let Some(record) = self.records.iter_mut().find(|r| r.id == record_id) {
            record.status = status;
        }
    }

    /// Clears a surfaced error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(id: i64, status: RecordStatus) -> Record {
        Record {
            id,
            title: format!("record {id}"),
            description: String::new(),
            record_type: None,
            urgency: None,
            status,
            vote_count: 0,
            creator_name: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            latitude: None,
            longitude: None,
            image_url: None,
            video_url: None,
        }
    }

    fn stats() -> AdminStats {
        serde_json::from_value(serde_json::json!({ "total_records": 4 })).unwrap()
    }

    #[test]
    fn transitions_never_offer_the_current_status() {
        for status in RecordStatus::all() {
            assert!(
                !allowed_transitions(*status).contains(status),
                "{status} offers a no-op transition"
            );
        }
    }

    #[test]
    fn terminal_statuses_offer_nothing() {
        assert!(allowed_transitions(RecordStatus::Resolved).is_empty());
        assert!(allowed_transitions(RecordStatus::Rejected).is_empty());
    }

    #[test]
    fn draft_and_investigation_offer_the_restricted_set() {
        assert_eq!(
            allowed_transitions(RecordStatus::Draft),
            &[RecordStatus::UnderInvestigation, RecordStatus::Rejected]
        );
        assert_eq!(
            allowed_transitions(RecordStatus::UnderInvestigation),
            &[RecordStatus::Resolved, RecordStatus::Rejected]
        );
    }

    #[test]
    fn status_is_patched_only_for_known_records() {
        let mut store = AdminStore::new();
        let seq = store.begin_load();
        store.apply_loaded(
            seq,
            vec![record(1, RecordStatus::Draft)],
            stats(),
        );

        store.apply_status_updated(1, RecordStatus::UnderInvestigation);
        store.apply_status_updated(42, RecordStatus::Resolved);

        assert_eq!(store.records()[0].status, RecordStatus::UnderInvestigation);
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let mut store = AdminStore::new();
        let seq = store.begin_load();
        store.apply_loaded(seq, vec![record(1, RecordStatus::Draft)], stats());

        let seq = store.begin_load();
        assert!(store.apply_failed(seq, "unreachable"));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.error(), Some("unreachable"));
    }

    #[test]
    fn counts_and_filtering_agree() {
        let mut store = AdminStore::new();
        let seq = store.begin_load();
        store.apply_loaded(
            seq,
            vec![
                record(1, RecordStatus::Draft),
                record(2, RecordStatus::UnderInvestigation),
                record(3, RecordStatus::UnderInvestigation),
                record(4, RecordStatus::Resolved),
            ],
            stats(),
        );

        let counts = store.status_counts();
        assert_eq!(counts.total, 4);
        assert_eq!(counts.investigating, 2);
        assert_eq!(counts.rejected, 0);

        store.set_filter(Filter::Only(RecordStatus::UnderInvestigation));
        assert_eq!(store.filtered_records().len(), 2);

        store.set_filter(Filter::All);
        assert_eq!(store.filtered_records().len(), 4);
    }
}
