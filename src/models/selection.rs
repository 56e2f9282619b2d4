use serde::{Deserialize, Serialize};

/// Filter tokens the catalog understands. Passed verbatim, no case mapping.
pub const FILTER_TAGS: [&str; 5] = ["OUTDOOR", "INDOOR", "FREE", "LOW ENERGY", "HIGH ENERGY"];

/// City domain used until (or instead of) the catalog's `GET locations`.
pub const DEFAULT_LOCATIONS: [&str; 5] = [
    "Berkeley",
    "San Francisco",
    "Oakland",
    "San Jose",
    "Palo Alto",
];

pub const DEFAULT_LOCATION: &str = "Berkeley";
pub const DEFAULT_DURATION: &str = "2 hrs";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationBucket {
    pub label: &'static str,
    pub description: &'static str,
}

pub const DURATION_BUCKETS: [DurationBucket; 4] = [
    DurationBucket {
        label: "30 min",
        description: "A quick outing close to home",
    },
    DurationBucket {
        label: "1 hr",
        description: "Enough for one solid activity",
    },
    DurationBucket {
        label: "2 hrs",
        description: "Room for an activity plus a snack stop",
    },
    DurationBucket {
        label: "3+ hrs",
        description: "A real adventure, naps optional",
    },
];

pub fn is_known_duration(label: &str) -> bool {
    DURATION_BUCKETS.iter().any(|bucket| bucket.label == label)
}

pub fn is_known_filter(tag: &str) -> bool {
    FILTER_TAGS.contains(&tag)
}

/// The caregiver's current, not-yet-submitted input. Pure data; queries are
/// derived lazily from a snapshot at search time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub location: String,
    pub duration: String,
    pub active_filters: Vec<String>,
    pub mood_query: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            duration: DEFAULT_DURATION.to_string(),
            active_filters: Vec::new(),
            mood_query: String::new(),
        }
    }
}

impl Selection {
    pub fn set_location(&mut self, city: impl Into<String>) {
        self.location = city.into();
    }

    pub fn set_duration(&mut self, bucket: impl Into<String>) {
        self.duration = bucket.into();
    }

    /// Insert if absent, remove if present. Toggle order is preserved for the
    /// remaining tags, so the encoded `filters[]` parameters keep it too.
    pub fn toggle_filter(&mut self, tag: &str) {
        if let Some(position) = self.active_filters.iter().position(|active| active == tag) {
            self.active_filters.remove(position);
        } else {
            self.active_filters.push(tag.to_string());
        }
    }

    pub fn has_filter(&self, tag: &str) -> bool {
        self.active_filters.iter().any(|active| active == tag)
    }

    pub fn set_mood_query(&mut self, text: impl Into<String>) {
        self.mood_query = text.into();
    }

    pub fn clear_mood_query(&mut self) {
        self.mood_query.clear();
    }
}
