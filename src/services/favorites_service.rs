use std::collections::HashSet;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::db::repositories::favorites_repository::FavoritesRepository;
use crate::db::DbPool;

/// Liked activity ids, independent of any search's result set. Membership is
/// held in memory and written through to sqlite before `toggle` returns; a
/// failed write is logged and the in-memory state stands for the session.
pub struct FavoritesService {
    db: DbPool,
    cache: Mutex<HashSet<String>>,
}

impl FavoritesService {
    pub fn new(db: DbPool) -> Self {
        let persisted = db.with_connection(FavoritesRepository::list);
        let cache = match persisted {
            Ok(ids) => ids.into_iter().collect(),
            Err(error) => {
                warn!(
                    target: "app::favorites",
                    error = %error,
                    "could not load persisted favorites; starting empty"
                );
                HashSet::new()
            }
        };

        Self {
            db,
            cache: Mutex::new(cache),
        }
    }

    /// Insert if absent, remove if present. Returns the new membership.
    /// Toggles serialize on the cache lock, so rapid toggles of the same id
    /// converge on the parity of the toggle count.
    pub fn toggle(&self, activity_id: &str) -> bool {
        let mut cache = self.cache.lock().expect("favorites lock poisoned");

        let favored = if cache.remove(activity_id) {
            false
        } else {
            cache.insert(activity_id.to_string());
            true
        };

        let persisted = self.db.with_connection(|conn| {
            if favored {
                FavoritesRepository::insert(conn, activity_id)
            } else {
                FavoritesRepository::delete(conn, activity_id)
            }
        });

        match persisted {
            Ok(()) => {
                debug!(target: "app::favorites", activity_id, favored, "favorite toggled");
            }
            Err(error) => {
                warn!(
                    target: "app::favorites",
                    activity_id,
                    favored,
                    error = %error,
                    "favorite persistence failed; keeping in-memory state"
                );
            }
        }

        favored
    }

    pub fn is_favorite(&self, activity_id: &str) -> bool {
        let cache = self.cache.lock().expect("favorites lock poisoned");
        cache.contains(activity_id)
    }

    pub fn list(&self) -> Vec<String> {
        let cache = self.cache.lock().expect("favorites lock poisoned");
        let mut ids: Vec<String> = cache.iter().cloned().collect();
        ids.sort();
        ids
    }
}
