pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("failed to launch application: {error}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle();

            crate::utils::logger::init_logging(&handle)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let mut data_dir = handle
                .path()
                .app_data_dir()
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            std::fs::create_dir_all(&data_dir)?;
            data_dir.push("tottrot.sqlite");

            let pool = crate::db::DbPool::new(&data_dir)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let state = crate::commands::AppState::new(pool)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::navigation::session_get,
            crate::commands::navigation::navigation_open_screen,
            crate::commands::navigation::navigation_commit_location,
            crate::commands::navigation::navigation_commit_duration,
            crate::commands::navigation::navigation_close_interests,
            crate::commands::navigation::navigation_new_search,
            crate::commands::selection::selection_filter_options,
            crate::commands::selection::selection_duration_options,
            crate::commands::selection::selection_toggle_filter,
            crate::commands::selection::selection_set_mood_query,
            crate::commands::selection::selection_clear_mood_query,
            crate::commands::search::search_run,
            crate::commands::favorites::favorites_toggle,
            crate::commands::favorites::favorites_is_favorite,
            crate::commands::favorites::favorites_list,
            crate::commands::catalog::locations_list,
            crate::commands::catalog::weather_refresh,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
