//! Report draft form state and the single-path location merger.

use sauti_record_models::{DraftReport, Location, Record, RecordType, UrgencyLevel};
use sauti_validate::{DraftField, ValidationErrors, validate_draft};

/// A change to the draft's location, from any of the three input paths.
///
/// Manual edits, the "use current location" fix, and map clicks all
/// funnel through [`DraftForm::apply_location`] so the location is only
/// ever written from one code path — a slow geolocation call and a
/// subsequent manual edit cannot interleave into a partial write; last
/// write wins by call-completion order.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    /// Manual edit of the latitude field only.
    Latitude(String),
    /// Manual edit of the longitude field only.
    Longitude(String),
    /// A resolved device fix or map click: both axes at once.
    Position {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
    /// The decorative reverse-geocode result for the current position.
    Address(Option<String>),
}

/// Ephemeral state of the report submission form.
///
/// Mutated field-by-field on every input change; validated at
/// submission time; discarded (dropped) on submit success or cancel.
#[derive(Debug, Clone, Default)]
pub struct DraftForm {
    draft: DraftReport,
    address: Option<String>,
    errors: ValidationErrors,
}

impl DraftForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the form from an existing record for edit flows.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            draft: DraftReport::from_record(record),
            address: None,
            errors: ValidationErrors::new(),
        }
    }

    /// The draft being edited.
    #[must_use]
    pub const fn draft(&self) -> &DraftReport {
        &self.draft
    }

    /// The reverse-geocoded address for the current position, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Validation errors from the last [`validate`](Self::validate).
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Sets the title, clearing its stale error.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.errors.remove(&DraftField::Title);
    }

    /// Sets the description, clearing its stale error.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.errors.remove(&DraftField::Description);
    }

    /// Sets the report category.
    pub fn set_record_type(&mut self, record_type: RecordType) {
        self.draft.record_type = record_type;
    }

    /// Sets the urgency level.
    pub fn set_urgency(&mut self, urgency: UrgencyLevel) {
        self.draft.urgency = urgency;
    }

    /// Sets the image evidence link.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.draft.image_url = url.into();
    }

    /// Sets the video evidence link.
    pub fn set_video_url(&mut self, url: impl Into<String>) {
        self.draft.video_url = url.into();
    }

    /// Applies a location change. The one write path for all three
    /// input sources.
    ///
    /// Coordinate writes clear the stale coordinate error and any
    /// previously resolved address (it described the old position);
    /// callers re-trigger reverse geocoding afterwards if desired.
    pub fn apply_location(&mut self, update: LocationUpdate) {
        match update {
            LocationUpdate::Latitude(value) => {
                self.draft.latitude = value;
                self.address = None;
                self.errors.remove(&DraftField::Coordinates);
            }
            LocationUpdate::Longitude(value) => {
                self.draft.longitude = value;
                self.address = None;
                self.errors.remove(&DraftField::Coordinates);
            }
            LocationUpdate::Position {
                latitude,
                longitude,
            } => {
                self.draft.latitude = latitude.to_string();
                self.draft.longitude = longitude.to_string();
                self.address = None;
                self.errors.remove(&DraftField::Coordinates);
            }
            LocationUpdate::Address(address) => {
                self.address = address;
            }
        }
    }

    /// The draft's location as parsed values, for display.
    #[must_use]
    pub fn location(&self) -> Location {
        Location {
            latitude: self.draft.latitude.trim().parse().ok(),
            longitude: self.draft.longitude.trim().parse().ok(),
            address: self.address.clone(),
        }
    }

    /// Validates the draft, storing the field-keyed errors.
    ///
    /// Returns `true` when the draft may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_draft(&self.draft);
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_edit_touches_one_axis() {
        let mut form = DraftForm::new();
        form.apply_location(LocationUpdate::Position {
            latitude: -1.2921,
            longitude: 36.8219,
        });

        form.apply_location(LocationUpdate::Latitude("-1.3000".to_owned()));

        assert_eq!(form.draft().latitude, "-1.3000");
        assert_eq!(form.draft().longitude, "36.8219");
    }

    #[test]
    fn position_overwrites_both_axes_and_stale_address() {
        let mut form = DraftForm::new();
        form.apply_location(LocationUpdate::Latitude("50".to_owned()));
        form.apply_location(LocationUpdate::Address(Some("Old Town".to_owned())));

        form.apply_location(LocationUpdate::Position {
            latitude: -1.2921,
            longitude: 36.8219,
        });

        assert_eq!(form.draft().latitude, "-1.2921");
        assert_eq!(form.draft().longitude, "36.8219");
        assert!(form.address().is_none());
    }

    #[test]
    fn address_update_leaves_coordinates_alone() {
        let mut form = DraftForm::new();
        form.apply_location(LocationUpdate::Position {
            latitude: -1.2921,
            longitude: 36.8219,
        });

        form.apply_location(LocationUpdate::Address(Some(
            "Kenyatta Avenue, Nairobi".to_owned(),
        )));

        assert_eq!(form.address(), Some("Kenyatta Avenue, Nairobi"));
        assert_eq!(form.draft().latitude, "-1.2921");
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = DraftForm::new();
        assert!(!form.validate());
        assert!(form.errors().contains_key(&DraftField::Title));

        form.set_title("Burst water main");

        assert!(!form.errors().contains_key(&DraftField::Title));
        assert!(form.errors().contains_key(&DraftField::Description));
    }

    #[test]
    fn coordinate_write_clears_coordinate_error() {
        let mut form = DraftForm::new();
        form.set_title("t");
        form.set_description("d");
        form.apply_location(LocationUpdate::Latitude("999".to_owned()));
        form.apply_location(LocationUpdate::Longitude("10".to_owned()));
        assert!(!form.validate());

        form.apply_location(LocationUpdate::Latitude("-1.29".to_owned()));

        assert!(form.errors().is_empty());
        assert!(form.validate());
    }

    #[test]
    fn valid_form_exposes_parsed_location() {
        let mut form = DraftForm::new();
        form.set_title("t");
        form.set_description("d");
        form.apply_location(LocationUpdate::Position {
            latitude: -1.2921,
            longitude: 36.8219,
        });

        assert!(form.validate());
        let location = form.location();
        assert!(location.is_complete());
    }
}
