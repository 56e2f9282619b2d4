pub mod catalog;
pub mod favorites;
pub mod navigation;
pub mod search;
pub mod selection;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tauri::async_runtime;
use tracing::error;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::catalog_service::{CatalogApi, CatalogService};
use crate::services::favorites_service::FavoritesService;
use crate::services::search_service::SearchService;
use crate::services::session_service::SessionService;
use crate::services::weather_service::WeatherService;

#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    session_service: Arc<SessionService>,
    search_service: Arc<SearchService>,
    favorites_service: Arc<FavoritesService>,
    weather_service: Arc<WeatherService>,
    catalog_service: Arc<dyn CatalogApi>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> AppResult<Self> {
        let catalog: Arc<dyn CatalogApi> = Arc::new(CatalogService::from_env()?);
        Ok(Self::with_catalog(db_pool, catalog))
    }

    /// Wiring seam shared by `new` and the integration tests, which point the
    /// catalog at a local mock server.
    pub fn with_catalog(db_pool: DbPool, catalog: Arc<dyn CatalogApi>) -> Self {
        let session_service = Arc::new(SessionService::new());
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&session_service),
            Arc::clone(&catalog),
        ));
        let favorites_service = Arc::new(FavoritesService::new(db_pool.clone()));
        let weather_service = Arc::new(WeatherService::new(
            Arc::clone(&session_service),
            Arc::clone(&catalog),
        ));

        Self {
            db_pool,
            session_service,
            search_service,
            favorites_service,
            weather_service,
            catalog_service: catalog,
        }
    }

    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session_service)
    }

    pub fn search(&self) -> Arc<SearchService> {
        Arc::clone(&self.search_service)
    }

    pub fn favorites(&self) -> Arc<FavoritesService> {
        Arc::clone(&self.favorites_service)
    }

    pub fn weather(&self) -> Arc<WeatherService> {
        Arc::clone(&self.weather_service)
    }

    pub fn catalog(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.catalog_service)
    }

    pub fn db(&self) -> DbPool {
        self.db_pool.clone()
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation { message, details } => {
                CommandError::new("VALIDATION_ERROR", message, details)
            }
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "The requested resource does not exist", None)
            }
            AppError::Catalog {
                code,
                message,
                correlation_id,
            } => CommandError::new(
                code.as_str(),
                message,
                correlation_id.map(|id| json!({ "correlationId": id })),
            ),
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "Serialization failed", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "File system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("blocking task failed: {err}"), None))?
        .map_err(CommandError::from)
}
