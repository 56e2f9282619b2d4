use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::activity::Activity;
use crate::models::selection::{is_known_duration, is_known_filter, Selection, DEFAULT_LOCATIONS};
use crate::models::session::{Screen, SearchStatus, SessionSnapshot};
use crate::models::weather::WeatherSnapshot;
use crate::services::search_plan::SearchPlan;

/// What became of one search's resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResolution {
    /// Committed a success; the screen moved to results.
    Committed { result_count: usize },
    /// Committed a failure; the screen is untouched, this message is shown.
    Failed { message: String },
    /// A newer search was triggered first; this resolution was discarded.
    Stale,
}

#[derive(Debug)]
struct SessionState {
    screen: Screen,
    selection: Selection,
    search: SearchStatus,
    results: Vec<Activity>,
    weather: Option<WeatherSnapshot>,
    locations: Vec<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::Main,
            selection: Selection::default(),
            search: SearchStatus::Idle,
            results: Vec::new(),
            weather: None,
            locations: Vec::new(),
        }
    }
}

/// The whole UI-facing state machine in one value, transitioned only through
/// named events. Holds the search generation counter: only the most recently
/// issued generation may commit a resolution.
pub struct SessionService {
    state: RwLock<SessionState>,
    last_generation: AtomicU64,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            last_generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().expect("session lock poisoned");
        SessionSnapshot {
            screen: state.screen,
            selection: state.selection.clone(),
            search: state.search.clone(),
            results: state.results.clone(),
            weather: state.weather.clone(),
            locations: self.location_domain_locked(&state),
        }
    }

    pub fn current_location(&self) -> String {
        let state = self.state.read().expect("session lock poisoned");
        state.selection.location.clone()
    }

    // ---- navigation events ------------------------------------------------

    /// Location, duration and interests screens open from the main screen
    /// only; results is reachable solely through a committed search.
    pub fn open_screen(&self, target: Screen) -> AppResult<()> {
        let mut state = self.state.write().expect("session lock poisoned");

        if !matches!(target, Screen::Location | Screen::Duration | Screen::Interests) {
            return Err(AppError::validation(format!(
                "screen {target:?} cannot be opened directly"
            )));
        }
        if state.screen != Screen::Main {
            return Err(AppError::validation(format!(
                "screen {target:?} can only be opened from the main screen"
            )));
        }

        debug!(target: "app::session", screen = ?target, "opening screen");
        state.screen = target;
        Ok(())
    }

    /// Tapping a city on the location screen commits the choice and returns
    /// to main atomically; there is no cancel path.
    pub fn commit_location(&self, city: &str) -> AppResult<()> {
        let mut state = self.state.write().expect("session lock poisoned");

        if state.screen != Screen::Location {
            return Err(AppError::validation(
                "a location can only be chosen on the location screen",
            ));
        }
        if !self.location_domain_locked(&state).iter().any(|known| known == city) {
            return Err(AppError::validation_with_details(
                format!("unknown location: {city}"),
                json!({ "location": city }),
            ));
        }

        info!(target: "app::session", city, "location committed");
        state.selection.set_location(city);
        state.screen = Screen::Main;
        Ok(())
    }

    pub fn commit_duration(&self, bucket: &str) -> AppResult<()> {
        let mut state = self.state.write().expect("session lock poisoned");

        if state.screen != Screen::Duration {
            return Err(AppError::validation(
                "a duration can only be chosen on the duration screen",
            ));
        }
        if !is_known_duration(bucket) {
            return Err(AppError::validation_with_details(
                format!("unknown duration bucket: {bucket}"),
                json!({ "duration": bucket }),
            ));
        }

        info!(target: "app::session", bucket, "duration committed");
        state.selection.set_duration(bucket);
        state.screen = Screen::Main;
        Ok(())
    }

    pub fn close_interests(&self) -> AppResult<()> {
        let mut state = self.state.write().expect("session lock poisoned");

        if state.screen != Screen::Interests {
            return Err(AppError::validation("the interests screen is not open"));
        }

        state.screen = Screen::Main;
        Ok(())
    }

    /// Leaving the results screen for a new search clears the mood query but
    /// keeps location, duration and active filters.
    pub fn new_search(&self) -> AppResult<()> {
        let mut state = self.state.write().expect("session lock poisoned");

        if state.screen != Screen::Results {
            return Err(AppError::validation(
                "a new search starts from the results screen",
            ));
        }

        debug!(target: "app::session", "returning to main for a new search");
        state.selection.clear_mood_query();
        state.results.clear();
        state.search = SearchStatus::Idle;
        state.screen = Screen::Main;
        Ok(())
    }

    // ---- selection events -------------------------------------------------

    /// Toggleable from the main and interests screens alike, also while a
    /// search is in flight.
    pub fn toggle_filter(&self, tag: &str) -> AppResult<()> {
        if !is_known_filter(tag) {
            return Err(AppError::validation_with_details(
                format!("unknown filter tag: {tag}"),
                json!({ "tag": tag }),
            ));
        }

        let mut state = self.state.write().expect("session lock poisoned");
        state.selection.toggle_filter(tag);
        debug!(
            target: "app::session",
            tag,
            active = state.selection.has_filter(tag),
            "filter toggled"
        );
        Ok(())
    }

    pub fn set_mood_query(&self, text: &str) {
        let mut state = self.state.write().expect("session lock poisoned");
        state.selection.set_mood_query(text);
    }

    pub fn clear_mood_query(&self) {
        let mut state = self.state.write().expect("session lock poisoned");
        state.selection.clear_mood_query();
    }

    // ---- search lifecycle -------------------------------------------------

    /// Allocates the next generation, snapshots the selection into a request
    /// plan and moves the machine to `Loading`. Always succeeds, from any
    /// prior search state.
    pub fn begin_search(&self) -> (u64, SearchPlan) {
        let generation = self.last_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().expect("session lock poisoned");

        state.search = SearchStatus::Loading { generation };
        let plan = SearchPlan::from_selection(&state.selection);

        debug!(
            target: "app::session",
            generation,
            mode = plan.mode(),
            "search started"
        );
        (generation, plan)
    }

    /// Commits a resolution only when `generation` is still the most recently
    /// issued one; anything older is discarded without touching results or
    /// screen.
    pub fn resolve_search(
        &self,
        generation: u64,
        outcome: AppResult<Vec<Activity>>,
    ) -> SearchResolution {
        let mut state = self.state.write().expect("session lock poisoned");

        if generation != self.last_generation.load(Ordering::SeqCst) {
            debug!(
                target: "app::session",
                generation,
                "discarding stale search resolution"
            );
            return SearchResolution::Stale;
        }

        match outcome {
            Ok(activities) => {
                let result_count = activities.len();
                info!(target: "app::session", generation, result_count, "search succeeded");
                state.results = activities;
                state.search = SearchStatus::Success { generation };
                state.screen = Screen::Results;
                SearchResolution::Committed { result_count }
            }
            Err(error) => {
                let message = error.user_message();
                warn!(
                    target: "app::session",
                    generation,
                    error = %error,
                    "search failed"
                );
                state.search = SearchStatus::Failed {
                    generation,
                    message: message.clone(),
                };
                SearchResolution::Failed { message }
            }
        }
    }

    // ---- ambient data -----------------------------------------------------

    pub fn set_weather(&self, snapshot: WeatherSnapshot) {
        let mut state = self.state.write().expect("session lock poisoned");
        state.weather = Some(snapshot);
    }

    pub fn set_locations(&self, locations: Vec<String>) {
        let mut state = self.state.write().expect("session lock poisoned");
        state.locations = locations;
    }

    fn location_domain_locked(&self, state: &SessionState) -> Vec<String> {
        if state.locations.is_empty() {
            DEFAULT_LOCATIONS.iter().map(|city| city.to_string()).collect()
        } else {
            state.locations.clone()
        }
    }
}
