//! Public record operations: browsing, anonymous submission, voting.

use sauti_record_models::{DraftReport, Record, RecordPage, VoteResponse, VoteType};

use crate::query::ListQuery;
use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Lists public records matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn public_records(&self, query: &ListQuery) -> Result<RecordPage, ApiError> {
        self.execute(
            self.http
                .get(self.url("/public/records"))
                .query(&query.params()),
        )
        .await
    }

    /// Fetches one public record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn public_record(&self, id: i64) -> Result<Record, ApiError> {
        self.execute(self.http.get(self.url(&format!("/public/records/{id}"))))
            .await
    }

    /// Submits an anonymous report, returning the created record.
    ///
    /// Callers are expected to have run `sauti_validate::validate_draft`
    /// first; the server revalidates regardless.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn submit_report(&self, draft: &DraftReport) -> Result<Record, ApiError> {
        self.execute(self.http.post(self.url("/public/report")).json(draft))
            .await
    }

    /// Places a vote on a record, returning the server's authoritative
    /// vote count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn vote(&self, id: i64, vote_type: VoteType) -> Result<VoteResponse, ApiError> {
        self.execute(
            self.http
                .post(self.url(&format!("/records/{id}/vote")))
                .json(&serde_json::json!({ "vote_type": vote_type })),
        )
        .await
    }

    /// Withdraws the caller's vote on a record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn remove_vote(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.execute(self.http.delete(self.url(&format!("/records/{id}/vote"))))
            .await
    }
}
