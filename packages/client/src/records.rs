//! Authenticated CRUD on the caller's own records.

use serde::Serialize;

use sauti_record_models::{
    DraftReport, Record, RecordPage, RecordType, UrgencyLevel,
};

use crate::query::ListQuery;
use crate::{ApiClient, ApiError};

/// A partial content edit to an owned record. Unset fields are omitted
/// from the request body and left untouched server-side.
///
/// Status is deliberately absent: status changes go through the
/// privileged status-update operation, not content edits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecordPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// New urgency.
    #[serde(rename = "urgency_level", skip_serializing_if = "Option::is_none")]
    pub urgency: Option<UrgencyLevel>,
    /// New latitude, as form text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    /// New longitude, as form text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    /// New image evidence link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// New video evidence link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ApiClient {
    /// Lists the caller's own records.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn my_records(&self, query: &ListQuery) -> Result<RecordPage, ApiError> {
        self.execute(
            self.http
                .get(self.url("/my-records"))
                .query(&query.params()),
        )
        .await
    }

    /// Creates a record owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn create_record(&self, draft: &DraftReport) -> Result<Record, ApiError> {
        self.execute(self.http.post(self.url("/records")).json(draft))
            .await
    }

    /// Applies a partial content edit to an owned record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn update_record(
        &self,
        id: i64,
        patch: &RecordPatch,
    ) -> Result<Record, ApiError> {
        self.execute(
            self.http
                .patch(self.url(&format!("/records/{id}")))
                .json(patch),
        )
        .await
    }

    /// Deletes an owned record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn delete_record(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.execute(self.http.delete(self.url(&format!("/records/{id}"))))
            .await
    }

    /// Fetches the change history of an owned record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn record_history(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.execute(
            self.http
                .get(self.url(&format!("/records/{id}/history"))),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_patch_fields_are_omitted() {
        let patch = RecordPatch {
            title: Some("Updated title".to_owned()),
            ..RecordPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["title"], "Updated title");
    }

    #[test]
    fn patch_renames_wire_fields() {
        let patch = RecordPatch {
            record_type: Some(RecordType::Emergency),
            urgency: Some(UrgencyLevel::Critical),
            ..RecordPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["type"], "emergency");
        assert_eq!(value["urgency_level"], "critical");
    }
}
