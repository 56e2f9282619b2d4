use std::sync::Arc;

use tracing::debug;

use crate::models::session::SessionSnapshot;
use crate::services::catalog_service::CatalogApi;
use crate::services::search_plan::SearchPlan;
use crate::services::session_service::{SearchResolution, SessionService};

/// Runs one search end to end: plan from the current selection, dispatch
/// against the catalog, resolve into the session state machine. Failures
/// never escape this boundary; they land in `SearchStatus::Failed` with a
/// user-displayable message.
pub struct SearchService {
    session: Arc<SessionService>,
    catalog: Arc<dyn CatalogApi>,
}

impl SearchService {
    pub fn new(session: Arc<SessionService>, catalog: Arc<dyn CatalogApi>) -> Self {
        Self { session, catalog }
    }

    pub async fn run_search(&self) -> SessionSnapshot {
        let (generation, plan) = self.session.begin_search();

        let outcome = match &plan {
            SearchPlan::Structured(query) => self.catalog.search_structured(query).await,
            SearchPlan::Mood(query) => self.catalog.search_mood(query).await,
        };

        match self.session.resolve_search(generation, outcome) {
            SearchResolution::Committed { result_count } => {
                debug!(target: "app::search", generation, result_count, "search committed");
            }
            SearchResolution::Failed { message } => {
                debug!(target: "app::search", generation, %message, "search resolved to failure");
            }
            SearchResolution::Stale => {
                debug!(target: "app::search", generation, "search superseded before resolution");
            }
        }

        self.session.snapshot()
    }
}
