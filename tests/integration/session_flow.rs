use std::sync::Arc;
use std::time::Duration as StdDuration;

use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use tottrot_app_lib::db::DbPool;
use tottrot_app_lib::error::AppError;
use tottrot_app_lib::models::session::{Screen, SearchStatus};
use tottrot_app_lib::services::catalog_service::{testing, CatalogApi};
use tottrot_app_lib::services::favorites_service::FavoritesService;
use tottrot_app_lib::services::search_service::SearchService;
use tottrot_app_lib::services::session_service::SessionService;
use tottrot_app_lib::services::weather_service::WeatherService;

fn harness(base_url: &str) -> (Arc<SessionService>, Arc<SearchService>) {
    let session = Arc::new(SessionService::new());
    let catalog: Arc<dyn CatalogApi> = Arc::new(
        testing::service_for(base_url, StdDuration::from_secs(2)).expect("catalog service"),
    );
    let search = Arc::new(SearchService::new(Arc::clone(&session), catalog));
    (session, search)
}

fn activity_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "Stroller-friendly and close by",
        "durationLabel": "1 hr",
        "venueName": "Neighborhood Spot",
        "address": "1 Main St",
        "city": "Berkeley",
        "rating": 4.2,
        "tags": ["FREE"],
        "sourceSystem": "catalog"
    })
}

// ---- navigation ------------------------------------------------------------

#[test]
fn location_commit_sets_selection_and_returns_to_main() {
    let session = SessionService::new();

    session.open_screen(Screen::Location).expect("open location");
    assert_eq!(session.snapshot().screen, Screen::Location);

    session
        .commit_location("San Francisco")
        .expect("commit location");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.screen, Screen::Main);
    assert_eq!(snapshot.selection.location, "San Francisco");
}

#[test]
fn sub_screens_open_only_from_main() {
    let session = SessionService::new();

    session.open_screen(Screen::Location).expect("open location");
    let error = session
        .open_screen(Screen::Duration)
        .expect_err("duration must not open from the location screen");
    assert!(matches!(error, AppError::Validation { .. }));

    let error = session
        .open_screen(Screen::Results)
        .expect_err("results is not directly reachable");
    assert!(matches!(error, AppError::Validation { .. }));
}

#[test]
fn location_commit_rejects_cities_outside_the_domain() {
    let session = SessionService::new();

    session.open_screen(Screen::Location).expect("open location");
    let error = session
        .commit_location("Sacramento")
        .expect_err("unknown city must be rejected");
    assert!(matches!(error, AppError::Validation { .. }));

    // Still on the location screen, nothing committed.
    let snapshot = session.snapshot();
    assert_eq!(snapshot.screen, Screen::Location);
    assert_eq!(snapshot.selection.location, "Berkeley");
}

#[test]
fn location_domain_follows_the_catalog_provided_set() {
    let session = SessionService::new();
    session.set_locations(vec!["Berkeley".to_string(), "Alameda".to_string()]);

    session.open_screen(Screen::Location).expect("open location");
    session.commit_location("Alameda").expect("in-domain city");

    session.open_screen(Screen::Location).expect("open location");
    let error = session
        .commit_location("San Jose")
        .expect_err("city outside the fetched domain");
    assert!(matches!(error, AppError::Validation { .. }));
}

#[test]
fn duration_commit_validates_the_bucket_label() {
    let session = SessionService::new();

    session.open_screen(Screen::Duration).expect("open duration");
    session.commit_duration("1 hr").expect("known bucket");
    assert_eq!(session.snapshot().selection.duration, "1 hr");
    assert_eq!(session.snapshot().screen, Screen::Main);

    session.open_screen(Screen::Duration).expect("open duration");
    let error = session
        .commit_duration("45 min")
        .expect_err("unknown bucket must be rejected");
    assert!(matches!(error, AppError::Validation { .. }));
}

#[test]
fn interests_screen_toggles_filters_and_closes_back_to_main() {
    let session = SessionService::new();

    session
        .open_screen(Screen::Interests)
        .expect("open interests");
    session.toggle_filter("HIGH ENERGY").expect("toggle filter");
    session.close_interests().expect("close interests");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.screen, Screen::Main);
    assert!(snapshot.selection.has_filter("HIGH ENERGY"));
}

#[test]
fn unknown_filter_tags_are_rejected() {
    let session = SessionService::new();

    let error = session
        .toggle_filter("free")
        .expect_err("tags are matched verbatim, lowercase is not in the set");
    assert!(matches!(error, AppError::Validation { .. }));
}

// ---- search lifecycle ------------------------------------------------------

#[tokio::test]
async fn successful_search_transitions_to_results_with_the_exact_list() {
    let server = MockServer::start_async().await;
    let (session, search) = harness(&server.base_url());

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/activities")
                .query_param("location", "San Francisco")
                .query_param("duration", "1 hr")
                .query_param("filters[]", "FREE")
                .query_param("sort_by", "rating");
            then.status(200).json_body(json!({
                "success": true,
                "activities": [
                    activity_json("act_1", "Fog Park Playground"),
                    activity_json("act_2", "Cable Car Watching")
                ]
            }));
        })
        .await;

    session.open_screen(Screen::Location).expect("open location");
    session.commit_location("San Francisco").expect("commit");
    session.open_screen(Screen::Duration).expect("open duration");
    session.commit_duration("1 hr").expect("commit");
    session.toggle_filter("FREE").expect("toggle");

    let snapshot = search.run_search().await;

    mock.assert_async().await;
    assert_eq!(snapshot.screen, Screen::Results);
    assert_eq!(snapshot.search, SearchStatus::Success { generation: 1 });
    let ids: Vec<&str> = snapshot.results.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["act_1", "act_2"]);
}

#[tokio::test]
async fn failed_search_stays_on_main_and_surfaces_the_message_verbatim() {
    let server = MockServer::start_async().await;
    let (session, search) = harness(&server.base_url());

    let _mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/activities")
                .query_param("duration", "2 hrs");
            then.status(200)
                .json_body(json!({ "success": false, "activities": [], "error": "no activities" }));
        })
        .await;

    let snapshot = search.run_search().await;

    assert_eq!(snapshot.screen, Screen::Main);
    assert_eq!(
        snapshot.search,
        SearchStatus::Failed {
            generation: 1,
            message: "no activities".to_string()
        }
    );
    assert!(snapshot.results.is_empty());

    // The machine accepts the next search immediately, no acknowledge gate.
    let _mock_ok = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/activities")
                .query_param("duration", "1 hr");
            then.status(200).json_body(json!({
                "success": true,
                "activities": [activity_json("act_3", "Tilden Nature Walk")]
            }));
        })
        .await;

    session.open_screen(Screen::Duration).expect("open duration");
    session.commit_duration("1 hr").expect("commit");
    let snapshot = search.run_search().await;
    assert_eq!(snapshot.screen, Screen::Results);
    assert_eq!(snapshot.search, SearchStatus::Success { generation: 2 });
}

#[tokio::test]
async fn mood_search_dispatches_when_mood_and_filters_coexist() {
    let server = MockServer::start_async().await;
    let (session, search) = harness(&server.base_url());

    let mood_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/activities/mood-search")
                .json_body(json!({ "query": "museum morning", "location": "Berkeley" }));
            then.status(200).json_body(json!({
                "success": true,
                "activities": [activity_json("act_9", "Lawrence Hall of Science")]
            }));
        })
        .await;

    session.toggle_filter("FREE").expect("toggle");
    session.set_mood_query("museum morning");

    let snapshot = search.run_search().await;

    mood_mock.assert_async().await;
    assert_eq!(snapshot.screen, Screen::Results);
    assert_eq!(snapshot.results[0].id, "act_9");
}

#[tokio::test(flavor = "multi_thread")]
async fn later_search_wins_over_a_stale_resolution() {
    let server = MockServer::start_async().await;
    let (session, search) = harness(&server.base_url());

    // Search A: the default "2 hrs" selection, slow to resolve.
    let _slow_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/activities")
                .query_param("duration", "2 hrs");
            then.status(200)
                .delay(StdDuration::from_millis(500))
                .json_body(json!({
                    "success": true,
                    "activities": [activity_json("slow_1", "Stale Result")]
                }));
        })
        .await;

    // Search B: "1 hr", resolves immediately.
    let _fast_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/activities")
                .query_param("duration", "1 hr");
            then.status(200).json_body(json!({
                "success": true,
                "activities": [activity_json("fast_1", "Fresh Result")]
            }));
        })
        .await;

    let slow_search = Arc::clone(&search);
    let first = tokio::spawn(async move { slow_search.run_search().await });

    // Let search A reach the wire, then retarget the selection and fire B.
    tokio::time::sleep(StdDuration::from_millis(100)).await;
    session.open_screen(Screen::Duration).expect("open duration");
    session.commit_duration("1 hr").expect("commit");
    let after_b = search.run_search().await;

    assert_eq!(after_b.search, SearchStatus::Success { generation: 2 });
    assert_eq!(after_b.results[0].id, "fast_1");

    // A resolves afterwards; its outcome must have been discarded.
    let after_a = first.await.expect("search task");
    assert_eq!(after_a.search, SearchStatus::Success { generation: 2 });
    assert_eq!(after_a.results[0].id, "fast_1");
    assert_eq!(after_a.screen, Screen::Results);

    let final_snapshot = session.snapshot();
    let ids: Vec<&str> = final_snapshot.results.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["fast_1"]);
}

#[tokio::test]
async fn new_search_clears_mood_but_preserves_filters_location_and_duration() {
    let server = MockServer::start_async().await;
    let (session, search) = harness(&server.base_url());

    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/activities/mood-search");
            then.status(200).json_body(json!({
                "success": true,
                "activities": [activity_json("act_4", "Rainy Day Fort")]
            }));
        })
        .await;

    session.toggle_filter("INDOOR").expect("toggle");
    session.set_mood_query("cozy afternoon");
    let snapshot = search.run_search().await;
    assert_eq!(snapshot.screen, Screen::Results);

    session.new_search().expect("new search");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.screen, Screen::Main);
    assert_eq!(snapshot.search, SearchStatus::Idle);
    assert!(snapshot.results.is_empty());
    assert_eq!(snapshot.selection.mood_query, "");
    assert!(snapshot.selection.has_filter("INDOOR"));
    assert_eq!(snapshot.selection.location, "Berkeley");
    assert_eq!(snapshot.selection.duration, "2 hrs");
}

#[tokio::test]
async fn favorites_survive_result_replacement_across_searches() {
    let server = MockServer::start_async().await;
    let (session, search) = harness(&server.base_url());

    let dir = TempDir::new().expect("tempdir");
    let pool = DbPool::new(dir.path().join("tottrot.sqlite")).expect("pool");
    let favorites = FavoritesService::new(pool);

    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/activities");
            then.status(200).json_body(json!({
                "success": true,
                "activities": [activity_json("sample_1", "Corner Store Adventure")]
            }));
        })
        .await;

    let snapshot = search.run_search().await;
    assert_eq!(snapshot.results[0].id, "sample_1");
    assert!(favorites.toggle("sample_1"));

    // A new search replaces the result list wholesale.
    session.new_search().expect("new search");
    let snapshot = search.run_search().await;
    assert_eq!(snapshot.results[0].id, "sample_1");

    assert!(favorites.is_favorite("sample_1"));
}

// ---- weather ---------------------------------------------------------------

#[tokio::test]
async fn weather_refresh_failure_keeps_the_previous_snapshot() {
    let server = MockServer::start_async().await;

    let session = Arc::new(SessionService::new());
    let catalog: Arc<dyn CatalogApi> = Arc::new(
        testing::service_for(&server.base_url(), StdDuration::from_secs(2))
            .expect("catalog service"),
    );
    let weather = WeatherService::new(Arc::clone(&session), catalog);

    let _berkeley = server
        .mock_async(|when, then| {
            when.method(GET).path("/weather/Berkeley");
            then.status(200).json_body(json!({
                "success": true,
                "weather": {
                    "temperature_high": 72.0,
                    "weather_condition": "Sunny",
                    "precipitation_chance": 0.05
                }
            }));
        })
        .await;

    let _oakland = server
        .mock_async(|when, then| {
            when.method(GET).path("/weather/Oakland");
            then.status(500).body("internal error");
        })
        .await;

    weather.refresh_current().await;
    let snapshot = session.snapshot();
    let current = snapshot.weather.expect("weather snapshot set");
    assert_eq!(current.weather_condition, "Sunny");

    weather.refresh("Oakland").await;
    let snapshot = session.snapshot();
    let kept = snapshot.weather.expect("previous snapshot kept");
    assert_eq!(kept.weather_condition, "Sunny");
    assert_eq!(kept.temperature_high, 72.0);
}
