use tauri::State;

use crate::models::selection::{DurationBucket, DURATION_BUCKETS, FILTER_TAGS};
use crate::models::session::SessionSnapshot;

use super::{AppState, CommandResult};

/// The closed tag set the UI renders as the only selectable filter chips.
#[tauri::command]
pub fn selection_filter_options() -> Vec<String> {
    FILTER_TAGS.iter().map(|tag| tag.to_string()).collect()
}

#[tauri::command]
pub fn selection_duration_options() -> Vec<DurationBucket> {
    DURATION_BUCKETS.to_vec()
}

#[tauri::command]
pub fn selection_toggle_filter(
    state: State<'_, AppState>,
    tag: String,
) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.toggle_filter(&tag)?;
    Ok(session.snapshot())
}

#[tauri::command]
pub fn selection_set_mood_query(
    state: State<'_, AppState>,
    query: String,
) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.set_mood_query(&query);
    Ok(session.snapshot())
}

#[tauri::command]
pub fn selection_clear_mood_query(state: State<'_, AppState>) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.clear_mood_query();
    Ok(session.snapshot())
}
