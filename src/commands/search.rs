use tauri::State;

use crate::models::session::SessionSnapshot;

use super::{AppState, CommandResult};

/// Runs one search against the catalog. Failures do not surface as command
/// errors; they land in the snapshot's search status with a displayable
/// message, and the screen only changes on success.
#[tauri::command]
pub async fn search_run(state: State<'_, AppState>) -> CommandResult<SessionSnapshot> {
    let search = state.inner().search();
    Ok(search.run_search().await)
}
