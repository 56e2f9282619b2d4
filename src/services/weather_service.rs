use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::catalog_service::CatalogApi;
use crate::services::session_service::SessionService;

/// Display-only weather refresh, triggered whenever the location changes.
/// Failures keep whatever snapshot was last shown.
pub struct WeatherService {
    session: Arc<SessionService>,
    catalog: Arc<dyn CatalogApi>,
}

impl WeatherService {
    pub fn new(session: Arc<SessionService>, catalog: Arc<dyn CatalogApi>) -> Self {
        Self { session, catalog }
    }

    pub async fn refresh(&self, location: &str) {
        match self.catalog.fetch_weather(location).await {
            Ok(snapshot) => {
                debug!(
                    target: "app::weather",
                    location,
                    condition = %snapshot.weather_condition,
                    "weather snapshot refreshed"
                );
                self.session.set_weather(snapshot);
            }
            Err(error) => {
                warn!(
                    target: "app::weather",
                    location,
                    error = %error,
                    "weather refresh failed; keeping previous snapshot"
                );
            }
        }
    }

    pub async fn refresh_current(&self) {
        let location = self.session.current_location();
        self.refresh(&location).await;
    }
}
