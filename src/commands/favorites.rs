use serde::Serialize;
use tauri::State;

use super::{run_blocking, AppState, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleResult {
    pub activity_id: String,
    pub is_favorite: bool,
}

#[tauri::command]
pub async fn favorites_toggle(
    state: State<'_, AppState>,
    activity_id: String,
) -> CommandResult<FavoriteToggleResult> {
    let favorites = state.inner().favorites();
    run_blocking(move || {
        let is_favorite = favorites.toggle(&activity_id);
        Ok(FavoriteToggleResult {
            activity_id,
            is_favorite,
        })
    })
    .await
}

#[tauri::command]
pub fn favorites_is_favorite(state: State<'_, AppState>, activity_id: String) -> bool {
    state.favorites().is_favorite(&activity_id)
}

#[tauri::command]
pub fn favorites_list(state: State<'_, AppState>) -> Vec<String> {
    state.favorites().list()
}
