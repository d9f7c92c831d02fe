//! List query shaping.
//!
//! Every list endpoint takes the same narrowing parameters. "No filter"
//! is expressed by *omitting* the parameter, never by sending an empty
//! value or the `"all"` sentinel.

use sauti_record_models::{
    Filter, RecordFilters, RecordStatus, RecordType, UrgencyLevel,
};

/// Parameters for a record list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// Status narrowing.
    pub status: Filter<RecordStatus>,
    /// Category narrowing.
    pub record_type: Filter<RecordType>,
    /// Urgency narrowing.
    pub urgency: Filter<UrgencyLevel>,
    /// Free-text search term.
    pub search: String,
    /// Requested page, when paginating.
    pub page: Option<u32>,
}

impl ListQuery {
    /// Builds the query for a filter set and page.
    #[must_use]
    pub fn from_filters(filters: &RecordFilters, page: u32) -> Self {
        Self {
            status: filters.status,
            record_type: filters.record_type,
            urgency: filters.urgency,
            search: filters.search.clone(),
            page: Some(page),
        }
    }

    /// Serializes to query parameters, dropping empty values and the
    /// `"all"` sentinel.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "status", &self.status.param_value());
        push_param(&mut params, "type", &self.record_type.param_value());
        push_param(&mut params, "urgency", &self.urgency.param_value());
        push_param(&mut params, "search", &self.search);
        if let Some(page) = self.page {
            push_param(&mut params, "page", &page.to_string());
        }
        params
    }
}

/// Appends a parameter unless its value is empty or the `"all"`
/// sentinel.
fn push_param(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    if value.is_empty() || value == "all" {
        return;
    }
    params.push((key, value.to_owned()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_empty_values_are_dropped() {
        let query = ListQuery {
            status: Filter::All,
            record_type: Filter::Only(RecordType::Incident),
            urgency: Filter::All,
            search: String::new(),
            page: None,
        };
        assert_eq!(query.params(), vec![("type", "incident".to_owned())]);
    }

    #[test]
    fn all_dimensions_serialize_when_set() {
        let query = ListQuery {
            status: Filter::Only(RecordStatus::UnderInvestigation),
            record_type: Filter::Only(RecordType::RedFlag),
            urgency: Filter::Only(UrgencyLevel::Critical),
            search: "bridge".to_owned(),
            page: Some(3),
        };
        assert_eq!(
            query.params(),
            vec![
                ("status", "under investigation".to_owned()),
                ("type", "red-flag".to_owned()),
                ("urgency", "critical".to_owned()),
                ("search", "bridge".to_owned()),
                ("page", "3".to_owned()),
            ]
        );
    }

    #[test]
    fn default_query_sends_nothing() {
        assert!(ListQuery::default().params().is_empty());
    }

    #[test]
    fn from_filters_carries_the_page() {
        let filters = RecordFilters {
            status: Filter::Only(RecordStatus::Resolved),
            ..RecordFilters::default()
        };
        let query = ListQuery::from_filters(&filters, 5);
        assert!(query.params().contains(&("page", "5".to_owned())));
        assert!(query.params().contains(&("status", "resolved".to_owned())));
    }
}
