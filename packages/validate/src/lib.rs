#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Pure client-side validation for report submission.
//!
//! Nothing here touches the network. Validation errors are resolved
//! locally in the form flow and block submission; they are never sent to
//! or logged by the server.

use std::collections::BTreeMap;

use sauti_record_models::DraftReport;
use strum_macros::{AsRefStr, Display, EnumString};

/// Latitude range in decimal degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Longitude range in decimal degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Draft field a validation error is keyed under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DraftField {
    /// The report title.
    Title,
    /// The report description.
    Description,
    /// The latitude/longitude pair, validated as a unit.
    Coordinates,
}

/// Field-keyed validation errors. Empty means the draft is valid.
pub type ValidationErrors = BTreeMap<DraftField, String>;

/// Checks a latitude/longitude pair given as raw form text.
///
/// Both values are parsed as `f64`; the pair is invalid if either fails
/// to parse (empty string and non-numeric text alike) or falls outside
/// its range. `NaN` parses but fails the range comparison.
///
/// Callers treat "both fields empty" as "no location provided" and skip
/// this check entirely; that contract lives in [`validate_draft`], not
/// here.
#[must_use]
pub fn coordinates_valid(latitude: &str, longitude: &str) -> bool {
    let (Ok(lat), Ok(lng)) = (
        latitude.trim().parse::<f64>(),
        longitude.trim().parse::<f64>(),
    ) else {
        return false;
    };
    coordinate_in_range(lat, lng)
}

/// Checks already-numeric coordinates against the WGS84 ranges.
#[must_use]
pub fn coordinate_in_range(latitude: f64, longitude: f64) -> bool {
    (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude)
        && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude)
}

/// Validates a draft report for submission.
///
/// All rules run independently (no short-circuiting):
///
/// - trimmed-empty `title` → `"Title is required"`
/// - trimmed-empty `description` → `"Description is required"`
/// - both coordinates non-empty → range check, failure keyed
///   [`DraftField::Coordinates`]; either coordinate empty → location is
///   treated as not provided and the check is skipped
///
/// An empty map means the draft may be submitted.
#[must_use]
pub fn validate_draft(draft: &DraftReport) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.insert(DraftField::Title, "Title is required".to_owned());
    }

    if draft.description.trim().is_empty() {
        errors.insert(
            DraftField::Description,
            "Description is required".to_owned(),
        );
    }

    if !draft.latitude.is_empty()
        && !draft.longitude.is_empty()
        && !coordinates_valid(&draft.latitude, &draft.longitude)
    {
        errors.insert(
            DraftField::Coordinates,
            "Invalid coordinates".to_owned(),
        );
    }

    errors
}
