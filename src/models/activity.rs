use serde::{Deserialize, Serialize};

/// One catalog entry as returned by the activity service. Lives only for the
/// duration of a single results view; the next search replaces the whole list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub enhanced_description: Option<String>,
    pub duration_label: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub cost_category: CostCategory,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    pub venue_name: String,
    pub address: String,
    pub city: String,
    pub rating: f64,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub is_open_now: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mood_tags: Option<Vec<String>>,
    #[serde(default)]
    pub joy_factors: Option<String>,
    #[serde(default)]
    pub parent_whisper: Option<String>,
    #[serde(default)]
    pub surprise_element: Option<String>,
    #[serde(default)]
    pub spontaneity_score: Option<f64>,
    pub source_system: String,
}

impl Activity {
    /// The enhanced description overrides the plain one when the source
    /// provided it.
    pub fn display_description(&self) -> &str {
        self.enhanced_description
            .as_deref()
            .unwrap_or(&self.description)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Free,
    Paid,
    #[default]
    Unknown,
}

/// Response envelope shared by the structured and mood search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySearchEnvelope {
    pub success: bool,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}
