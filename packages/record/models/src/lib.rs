#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shared record types for the sauti reporting client.
//!
//! This crate defines the wire-level data model exchanged with the remote
//! reporting API: records, submission drafts, locations, filters, and
//! pagination. All other sauti crates normalize to these types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Category of a citizen report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecordType {
    /// Corruption report
    RedFlag,
    /// Request for government intervention
    Intervention,
    /// General incident
    Incident,
    /// Complaint against a public service
    Complaint,
    /// Improvement suggestion
    Suggestion,
    /// Emergency requiring immediate attention
    Emergency,
}

impl RecordType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::RedFlag,
            Self::Intervention,
            Self::Incident,
            Self::Complaint,
            Self::Suggestion,
            Self::Emergency,
        ]
    }

    /// Human-readable label for form and list displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RedFlag => "Red Flag (Corruption)",
            Self::Intervention => "Intervention Request",
            Self::Incident => "General Incident",
            Self::Complaint => "Complaint",
            Self::Suggestion => "Suggestion",
            Self::Emergency => "Emergency",
        }
    }
}

/// Lifecycle status of a report, owned by the server and changed only
/// through the privileged status-update operation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RecordStatus {
    /// Newly submitted, not yet triaged.
    #[serde(rename = "draft")]
    #[strum(serialize = "draft")]
    Draft,
    /// Actively being investigated by an administrator.
    #[serde(rename = "under investigation")]
    #[strum(serialize = "under investigation")]
    UnderInvestigation,
    /// Investigation completed.
    #[serde(rename = "resolved")]
    #[strum(serialize = "resolved")]
    Resolved,
    /// Dismissed as invalid or a false claim.
    #[serde(rename = "rejected")]
    #[strum(serialize = "rejected")]
    Rejected,
}

impl RecordStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Draft,
            Self::UnderInvestigation,
            Self::Resolved,
            Self::Rejected,
        ]
    }
}

/// Urgency declared by the reporter at submission time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UrgencyLevel {
    /// Can wait for routine handling.
    Low,
    /// Default for most reports.
    Medium,
    /// Needs prompt attention.
    High,
    /// Immediate danger or large-scale harm.
    Critical,
}

impl UrgencyLevel {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

/// Kind of vote a signed-in citizen can place on a public record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoteType {
    /// Endorses the report.
    Support,
    /// Flags the report as urgent.
    Urgent,
}

impl VoteType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Support, Self::Urgent]
    }
}

/// A geographic point with an optional reverse-geocoded address.
///
/// Invariant: a usable location carries *both* coordinates; a single
/// present coordinate is rejected by validation before submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees (WGS84), `[-90, 90]`.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees (WGS84), `[-180, 180]`.
    pub longitude: Option<f64>,
    /// Human-readable address from reverse geocoding, if any.
    pub address: Option<String>,
}

impl Location {
    /// `true` when both coordinates are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// `true` when neither coordinate is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}

/// An unsaved report held by the submission form.
///
/// Coordinates are kept as the raw text typed into the form; parsing and
/// range checking happen in `sauti_validate` at submission time. Empty
/// optional fields are omitted from the serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftReport {
    /// Short summary of the issue.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Report category.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Reporter-declared urgency.
    #[serde(rename = "urgency_level")]
    pub urgency: UrgencyLevel,
    /// Latitude as typed into the form. Empty when not provided.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub latitude: String,
    /// Longitude as typed into the form. Empty when not provided.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub longitude: String,
    /// Link to supporting image evidence.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    /// Link to supporting video evidence.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub video_url: String,
}

impl Default for DraftReport {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            record_type: RecordType::RedFlag,
            urgency: UrgencyLevel::Medium,
            latitude: String::new(),
            longitude: String::new(),
            image_url: String::new(),
            video_url: String::new(),
        }
    }
}

impl DraftReport {
    /// Seeds a draft from an existing record for edit flows.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            record_type: record.record_type.unwrap_or(RecordType::Incident),
            urgency: record.urgency.unwrap_or(UrgencyLevel::Medium),
            latitude: record.latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude: record.longitude.map(|v| v.to_string()).unwrap_or_default(),
            image_url: record.image_url.clone().unwrap_or_default(),
            video_url: record.video_url.clone().unwrap_or_default(),
        }
    }
}

/// A server-persisted report as returned by the API.
///
/// The client never mutates a record directly except to patch `status`
/// or `vote_count` from a confirmed server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned identifier.
    pub id: i64,
    /// Short summary of the issue.
    pub title: String,
    /// Detailed description.
    #[serde(default)]
    pub description: String,
    /// Report category. Older records may lack one.
    #[serde(rename = "type", default)]
    pub record_type: Option<RecordType>,
    /// Reporter-declared urgency, if recorded.
    #[serde(rename = "urgency_level", alias = "urgency", default)]
    pub urgency: Option<UrgencyLevel>,
    /// Current triage status.
    pub status: RecordStatus,
    /// Number of citizen votes on this record.
    #[serde(default)]
    pub vote_count: u64,
    /// Display name of the reporter, absent for anonymous reports.
    #[serde(default)]
    pub creator_name: Option<String>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latitude, if the report carried a location.
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    /// Longitude, if the report carried a location.
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
    /// Link to supporting image evidence.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Link to supporting video evidence.
    #[serde(default)]
    pub video_url: Option<String>,
}

impl Record {
    /// The record's location, if any coordinates were recorded.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            address: None,
        }
    }
}

/// Accepts a coordinate encoded as a JSON number, a numeric string, or
/// null. The upstream API is not consistent between the two encodings.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    })
}

/// A filter dimension that is either wide open (`all`) or narrowed to a
/// single value.
///
/// The `all` sentinel is how "no filter" is expressed in the UI layer;
/// the query builder drops such entries instead of sending empty params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    /// No narrowing.
    All,
    /// Narrowed to exactly this value.
    Only(T),
}

// Manual impl: the derive would demand `T: Default` for a variant that
// holds no `T`.
impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Filter<T> {
    /// `true` for the wide-open sentinel.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: fmt::Display> Filter<T> {
    /// The query-parameter representation: `"all"` or the inner value's
    /// wire string.
    #[must_use]
    pub fn param_value(&self) -> String {
        match self {
            Self::All => "all".to_owned(),
            Self::Only(value) => value.to_string(),
        }
    }
}

impl<T> From<T> for Filter<T> {
    fn from(value: T) -> Self {
        Self::Only(value)
    }
}

/// The active query narrowing the record list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordFilters {
    /// Status narrowing.
    pub status: Filter<RecordStatus>,
    /// Category narrowing.
    pub record_type: Filter<RecordType>,
    /// Urgency narrowing.
    pub urgency: Filter<UrgencyLevel>,
    /// Free-text search term.
    pub search: String,
}

impl RecordFilters {
    /// Merge-patches this filter set, leaving unset dimensions untouched.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(record_type) = update.record_type {
            self.record_type = record_type;
        }
        if let Some(urgency) = update.urgency {
            self.urgency = urgency;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
    }
}

/// A partial change to [`RecordFilters`]; unset fields are left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    /// New status narrowing, if changing.
    pub status: Option<Filter<RecordStatus>>,
    /// New category narrowing, if changing.
    pub record_type: Option<Filter<RecordType>>,
    /// New urgency narrowing, if changing.
    pub urgency: Option<Filter<UrgencyLevel>>,
    /// New search term, if changing.
    pub search: Option<String>,
}

impl FilterUpdate {
    /// Update that changes only the status dimension.
    #[must_use]
    pub const fn status(status: Filter<RecordStatus>) -> Self {
        Self {
            status: Some(status),
            record_type: None,
            urgency: None,
            search: None,
        }
    }

    /// Update that changes only the category dimension.
    #[must_use]
    pub const fn record_type(record_type: Filter<RecordType>) -> Self {
        Self {
            status: None,
            record_type: Some(record_type),
            urgency: None,
            search: None,
        }
    }

    /// Update that changes only the urgency dimension.
    #[must_use]
    pub const fn urgency(urgency: Filter<UrgencyLevel>) -> Self {
        Self {
            status: None,
            record_type: None,
            urgency: Some(urgency),
            search: None,
        }
    }

    /// Update that changes only the search term.
    #[must_use]
    pub const fn search(search: String) -> Self {
        Self {
            status: None,
            record_type: None,
            urgency: None,
            search: Some(search),
        }
    }
}

/// Server-authoritative pagination state, replaced wholesale from each
/// list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number, 1-based.
    pub page: u32,
    /// Total number of pages.
    #[serde(rename = "totalPages", alias = "total_pages", default = "one")]
    pub total_pages: u32,
    /// Total number of matching records.
    #[serde(default)]
    pub total: u64,
}

const fn one() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            total: 0,
        }
    }
}

/// One page of records plus its pagination envelope.
///
/// Endpoints without pagination (`/my-records`, `/admin/records`) decode
/// into the same shape with a defaulted envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordPage {
    /// Records on this page.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Pagination envelope.
    #[serde(default)]
    pub pagination: Pagination,
}

/// Server response to a vote, carrying the authoritative new count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VoteResponse {
    /// The record's vote count after the vote was applied.
    pub vote_count: u64,
}

/// An authenticated platform user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Whether the user holds the admin role.
    #[serde(default)]
    pub is_admin: bool,
}

/// Response to a successful login or signup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user, when the server includes it.
    #[serde(default)]
    pub user: Option<User>,
}

/// Aggregate platform statistics from the admin endpoint.
///
/// The payload shape is loosely specified server-side; known fields are
/// typed and the remainder is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminStats {
    /// Total records on the platform.
    #[serde(default)]
    pub total_records: Option<u64>,
    /// Total registered users.
    #[serde(default)]
    pub total_users: Option<u64>,
    /// Any further fields the server reports.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings() {
        for (status, wire) in [
            (RecordStatus::Draft, "\"draft\""),
            (
                RecordStatus::UnderInvestigation,
                "\"under investigation\"",
            ),
            (RecordStatus::Resolved, "\"resolved\""),
            (RecordStatus::Rejected, "\"rejected\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let parsed: RecordStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn record_type_wire_strings() {
        assert_eq!(
            serde_json::to_string(&RecordType::RedFlag).unwrap(),
            "\"red-flag\""
        );
        assert_eq!(RecordType::RedFlag.to_string(), "red-flag");
        let parsed: RecordType = "intervention".parse().unwrap();
        assert_eq!(parsed, RecordType::Intervention);
    }

    #[test]
    fn record_decodes_string_coordinates() {
        let json = serde_json::json!({
            "id": 17,
            "title": "Bridge collapse risk",
            "description": "Support pillars cracked",
            "type": "red-flag",
            "urgency_level": "high",
            "status": "under investigation",
            "vote_count": 4,
            "creator_name": "A. Wanjiku",
            "created_at": "2024-03-01T08:30:00Z",
            "latitude": "-1.2921",
            "longitude": 36.8219,
        });
        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.status, RecordStatus::UnderInvestigation);
        assert!((record.latitude.unwrap() - -1.2921).abs() < 1e-9);
        assert!((record.longitude.unwrap() - 36.8219).abs() < 1e-9);
        assert!(record.location().is_complete());
    }

    #[test]
    fn record_tolerates_missing_optionals() {
        let json = serde_json::json!({
            "id": 3,
            "title": "Pothole",
            "status": "draft",
            "created_at": "2024-01-15T12:00:00Z",
        });
        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.vote_count, 0);
        assert!(record.record_type.is_none());
        assert!(record.location().is_empty());
    }

    #[test]
    fn draft_serializes_without_empty_fields() {
        let draft = DraftReport {
            title: "Streetlight out".to_owned(),
            description: "Dark corner at night".to_owned(),
            ..DraftReport::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("latitude"));
        assert!(!obj.contains_key("image_url"));
        assert_eq!(obj["type"], "red-flag");
        assert_eq!(obj["urgency_level"], "medium");
    }

    #[test]
    fn filter_param_values() {
        assert_eq!(Filter::<RecordStatus>::All.param_value(), "all");
        assert_eq!(
            Filter::Only(RecordStatus::UnderInvestigation).param_value(),
            "under investigation"
        );
        assert_eq!(
            Filter::Only(RecordType::Incident).param_value(),
            "incident"
        );
    }

    #[test]
    fn filter_update_merges_only_named_dimensions() {
        let mut filters = RecordFilters {
            search: "water".to_owned(),
            ..RecordFilters::default()
        };
        filters.apply(FilterUpdate::status(Filter::Only(RecordStatus::Resolved)));
        assert_eq!(filters.status, Filter::Only(RecordStatus::Resolved));
        assert_eq!(filters.search, "water");
        assert!(filters.record_type.is_all());
    }

    #[test]
    fn record_page_defaults_pagination() {
        let json = serde_json::json!({ "records": [] });
        let page: RecordPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.pagination, Pagination::default());
        assert_eq!(page.pagination.page, 1);
    }
}
