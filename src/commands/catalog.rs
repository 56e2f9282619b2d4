use tauri::State;

use crate::models::weather::WeatherSnapshot;
use crate::services::catalog_service;

use super::{AppState, CommandResult};

/// Populates the enumerated city domain from the catalog, falling back to the
/// built-in set when the request fails.
#[tauri::command]
pub async fn locations_list(state: State<'_, AppState>) -> CommandResult<Vec<String>> {
    let state = state.inner().clone();
    let locations = catalog_service::load_locations_or_default(state.catalog().as_ref()).await;
    state.session().set_locations(locations.clone());
    Ok(locations)
}

/// Refreshes the display-only weather snapshot for the given city (or the
/// currently selected one) and returns whatever snapshot the session holds.
#[tauri::command]
pub async fn weather_refresh(
    state: State<'_, AppState>,
    location: Option<String>,
) -> CommandResult<Option<WeatherSnapshot>> {
    let state = state.inner().clone();
    let weather = state.weather();

    match location {
        Some(city) => weather.refresh(&city).await,
        None => weather.refresh_current().await,
    }

    Ok(state.session().snapshot().weather)
}
