//! Admin-only operations: triage listing, stats, status updates.

use sauti_record_models::{AdminStats, Record, RecordPage, RecordStatus};

use crate::query::ListQuery;
use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Lists all records for triage.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn admin_records(&self, query: &ListQuery) -> Result<RecordPage, ApiError> {
        self.execute(
            self.http
                .get(self.url("/admin/records"))
                .query(&query.params()),
        )
        .await
    }

    /// Fetches aggregate platform statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.execute(self.http.get(self.url("/admin/stats"))).await
    }

    /// Changes a record's status. This is the privileged operation,
    /// distinct from content edits; the server records the reason in the
    /// record's history.
    ///
    /// Returns the updated record. Callers patch their local copy only
    /// from this confirmed response, never speculatively.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn update_record_status(
        &self,
        id: i64,
        status: RecordStatus,
        reason: Option<&str>,
    ) -> Result<Record, ApiError> {
        self.execute(
            self.http
                .patch(self.url(&format!("/records/{id}/status")))
                .json(&serde_json::json!({
                    "status": status,
                    "reason": reason.unwrap_or(""),
                })),
        )
        .await
    }
}
