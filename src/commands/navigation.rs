use tauri::{async_runtime, State};

use crate::models::session::{Screen, SessionSnapshot};

use super::{AppState, CommandResult};

#[tauri::command]
pub fn session_get(state: State<'_, AppState>) -> CommandResult<SessionSnapshot> {
    Ok(state.session().snapshot())
}

#[tauri::command]
pub fn navigation_open_screen(
    state: State<'_, AppState>,
    screen: Screen,
) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.open_screen(screen)?;
    Ok(session.snapshot())
}

/// Commits the tapped city and returns to main in one step; the weather
/// snapshot refreshes in the background for the new location.
#[tauri::command]
pub fn navigation_commit_location(
    state: State<'_, AppState>,
    city: String,
) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.commit_location(&city)?;

    let weather = state.weather();
    async_runtime::spawn(async move {
        weather.refresh(&city).await;
    });

    Ok(session.snapshot())
}

#[tauri::command]
pub fn navigation_commit_duration(
    state: State<'_, AppState>,
    bucket: String,
) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.commit_duration(&bucket)?;
    Ok(session.snapshot())
}

#[tauri::command]
pub fn navigation_close_interests(state: State<'_, AppState>) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.close_interests()?;
    Ok(session.snapshot())
}

#[tauri::command]
pub fn navigation_new_search(state: State<'_, AppState>) -> CommandResult<SessionSnapshot> {
    let session = state.session();
    session.new_search()?;
    Ok(session.snapshot())
}
