use serde_json::{json, Value as JsonValue};

use crate::models::selection::Selection;

/// Fixed ordering the structured endpoint is always asked for.
pub const STRUCTURED_SORT_BY: &str = "rating";

const PARAM_LOCATION: &str = "location";
const PARAM_DURATION: &str = "duration";
const PARAM_FILTERS: &str = "filters[]";
const PARAM_SORT_BY: &str = "sort_by";

/// The one request a Selection snapshot resolves to. A non-empty trimmed mood
/// query always wins and drops duration and tag filters entirely; the
/// structured shape is used only when no mood text is present.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    Structured(StructuredQuery),
    Mood(MoodQuery),
}

impl SearchPlan {
    pub fn from_selection(selection: &Selection) -> SearchPlan {
        let mood = selection.mood_query.trim();
        if mood.is_empty() {
            SearchPlan::Structured(StructuredQuery {
                location: selection.location.clone(),
                duration: selection.duration.clone(),
                filters: selection.active_filters.clone(),
                sort_by: STRUCTURED_SORT_BY.to_string(),
            })
        } else {
            SearchPlan::Mood(MoodQuery {
                query: mood.to_string(),
                location: selection.location.clone(),
            })
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            SearchPlan::Structured(_) => "structured",
            SearchPlan::Mood(_) => "mood",
        }
    }
}

/// Parameter-based query against `GET activities`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    pub location: String,
    pub duration: String,
    pub filters: Vec<String>,
    pub sort_by: String,
}

impl StructuredQuery {
    /// Query-string encoding: `filters[]` repeats once per tag, in toggle
    /// order, tags verbatim.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (PARAM_LOCATION.to_string(), self.location.clone()),
            (PARAM_DURATION.to_string(), self.duration.clone()),
        ];
        for tag in &self.filters {
            pairs.push((PARAM_FILTERS.to_string(), tag.clone()));
        }
        pairs.push((PARAM_SORT_BY.to_string(), self.sort_by.clone()));
        pairs
    }

    /// Inverse of `query_pairs`. Unknown parameters are ignored; repeated
    /// scalar parameters keep the last value.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut decoded = Self {
            location: String::new(),
            duration: String::new(),
            filters: Vec::new(),
            sort_by: STRUCTURED_SORT_BY.to_string(),
        };

        for (key, value) in pairs {
            match key {
                PARAM_LOCATION => decoded.location = value.to_string(),
                PARAM_DURATION => decoded.duration = value.to_string(),
                PARAM_FILTERS => decoded.filters.push(value.to_string()),
                PARAM_SORT_BY => decoded.sort_by = value.to_string(),
                _ => {}
            }
        }

        decoded
    }
}

/// Free-text query against `POST activities/mood-search`.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodQuery {
    pub query: String,
    pub location: String,
}

impl MoodQuery {
    pub fn body(&self) -> JsonValue {
        json!({
            "query": self.query,
            "location": self.location,
        })
    }
}
