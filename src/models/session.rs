use serde::{Deserialize, Serialize};

use crate::models::activity::Activity;
use crate::models::selection::Selection;
use crate::models::weather::WeatherSnapshot;

/// Named screens of the app shell. Transitions happen only through session
/// events; the frontend renders whatever screen the snapshot names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Main,
    Location,
    Duration,
    Interests,
    Results,
}

/// Lifecycle of one search. `Success` and `Failed` are terminal for their
/// generation; the next `begin_search` moves straight back to `Loading`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SearchStatus {
    Idle,
    Loading { generation: u64 },
    Success { generation: u64 },
    Failed { generation: u64, message: String },
}

/// Everything the frontend needs to render, in one value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub selection: Selection,
    pub search: SearchStatus,
    pub results: Vec<Activity>,
    pub weather: Option<WeatherSnapshot>,
    pub locations: Vec<String>,
}
