//! Integration tests for tm-web request flows
//!
//! Tests cover:
//! - List flow: rank recomputation and write-back
//! - Edit flow: show form, validation, commit, NotFound
//! - Delete flow
//! - Add flow: title form, candidates, empty result, provider failure
//! - Resolve-selection (`/find`): record creation and redirect, duplicates
//! - Health endpoint

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tm_common::db::init::init_in_memory;
use tm_common::db::{movies, MovieRecord, NewMovie};
use tm_web::catalog::{CatalogError, MovieCandidate, MovieCatalog, MovieDetails};
use tm_web::{build_router, AppState};
use tower::util::ServiceExt; // for `oneshot` method

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// In-process stand-in for the metadata provider
#[derive(Default)]
struct StubCatalog {
    results: Vec<MovieCandidate>,
    details: Option<MovieDetails>,
    fail: bool,
    searches: Mutex<Vec<String>>,
}

#[async_trait]
impl MovieCatalog for StubCatalog {
    async fn search(&self, title: &str) -> Result<Vec<MovieCandidate>, CatalogError> {
        self.searches.lock().unwrap().push(title.to_string());
        if self.fail {
            return Err(CatalogError::Api(500, "boom".to_string()));
        }
        Ok(self.results.clone())
    }

    async fn details(&self, external_id: &str) -> Result<MovieDetails, CatalogError> {
        if self.fail {
            return Err(CatalogError::Api(500, "boom".to_string()));
        }
        self.details
            .clone()
            .ok_or_else(|| CatalogError::Api(404, format!("no movie {}", external_id)))
    }
}

/// Test helper: app over a fresh in-memory store
async fn setup(catalog: StubCatalog) -> (Router, SqlitePool, Arc<StubCatalog>) {
    let pool = init_in_memory().await.expect("in-memory database");
    let catalog = Arc::new(catalog);
    let state = AppState::new(pool.clone(), catalog.clone(), IMAGE_BASE);
    (build_router(state), pool, catalog)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = body.collect().await.expect("Should read body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("UTF-8 body")
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn add_movie(pool: &SqlitePool, title: &str, rating: f64) -> MovieRecord {
    let movie = movies::insert_movie(
        pool,
        &NewMovie {
            title: title.to_string(),
            year: 2000,
            description: format!("{} description", title),
            poster_url: format!("{}/{}.jpg", IMAGE_BASE, title),
        },
    )
    .await
    .unwrap();
    movies::update_rating_and_review(pool, movie.id, rating, "None")
        .await
        .unwrap();
    movies::get_movie(pool, movie.id).await.unwrap()
}

fn candidate(id: i64, title: &str, release_date: &str) -> MovieCandidate {
    MovieCandidate {
        id,
        title: Some(title.to_string()),
        release_date: Some(release_date.to_string()),
        overview: Some("...".to_string()),
        poster_path: Some("/p.jpg".to_string()),
    }
}

fn dune_details() -> MovieDetails {
    MovieDetails {
        title: "Dune".to_string(),
        release_date: Some("2021-10-22".to_string()),
        overview: Some("...".to_string()),
        poster_path: Some("/abc.jpg".to_string()),
    }
}

// =============================================================================
// List flow
// =============================================================================

#[tokio::test]
async fn test_list_assigns_dense_ranks_best_first() {
    let (app, pool, _) = setup(StubCatalog::default()).await;
    let low = add_movie(&pool, "Low", 3.0).await;
    let high = add_movie(&pool, "High", 9.5).await;
    let mid = add_movie(&pool, "Mid", 7.0).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;

    // Ranks written back to the store
    assert_eq!(movies::get_movie(&pool, high.id).await.unwrap().rank, 1);
    assert_eq!(movies::get_movie(&pool, mid.id).await.unwrap().rank, 2);
    assert_eq!(movies::get_movie(&pool, low.id).await.unwrap().rank, 3);

    // Rendered best-first
    let pos = |needle: &str| html.find(needle).expect(needle);
    assert!(pos("High") < pos("Mid"));
    assert!(pos("Mid") < pos("Low"));
}

#[tokio::test]
async fn test_list_ties_use_insertion_order() {
    let (app, pool, _) = setup(StubCatalog::default()).await;
    let first = add_movie(&pool, "First", 0.0).await;
    let second = add_movie(&pool, "Second", 0.0).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(movies::get_movie(&pool, first.id).await.unwrap().rank, 2);
    assert_eq!(movies::get_movie(&pool, second.id).await.unwrap().rank, 1);
}

#[tokio::test]
async fn test_list_empty_store() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Your list is empty"));
    assert!(html.contains("href=\"/add\""));
}

// =============================================================================
// Edit flow
// =============================================================================

#[tokio::test]
async fn test_edit_form_prefilled() {
    let (app, pool, _) = setup(StubCatalog::default()).await;
    let movie = add_movie(&pool, "Heat", 6.5).await;

    let response = app
        .oneshot(get(&format!("/edit?id={}", movie.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Heat"));
    assert!(html.contains(r#"name="rating" value="6.5""#));
    assert!(html.contains(r#"name="review" value="None""#));
}

#[tokio::test]
async fn test_edit_unknown_or_malformed_id_is_404() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    for uri in ["/edit?id=999", "/edit?id=abc", "/edit"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_edit_valid_submission_commits_and_redirects() {
    let (app, pool, _) = setup(StubCatalog::default()).await;
    let before = add_movie(&pool, "Heat", 0.0).await;

    let response = app
        .oneshot(post_form(
            &format!("/edit?id={}", before.id),
            "rating=8.5&review=Great+film",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let after = movies::get_movie(&pool, before.id).await.unwrap();
    assert_eq!(
        after,
        MovieRecord {
            rating: 8.5,
            review: "Great film".to_string(),
            ..before
        }
    );
}

#[tokio::test]
async fn test_edit_invalid_submission_rerenders_form() {
    let (app, pool, _) = setup(StubCatalog::default()).await;
    let before = add_movie(&pool, "Heat", 4.0).await;

    let response = app
        .oneshot(post_form(
            &format!("/edit?id={}", before.id),
            "rating=great&review=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("field-error"));
    assert!(html.contains(r#"value="great""#));

    assert_eq!(movies::get_movie(&pool, before.id).await.unwrap(), before);
}

#[tokio::test]
async fn test_edit_submit_unknown_id_is_404() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    let response = app
        .oneshot(post_form("/edit?id=41", "rating=1&review=x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete flow
// =============================================================================

#[tokio::test]
async fn test_delete_removes_only_that_movie() {
    let (app, pool, _) = setup(StubCatalog::default()).await;
    let keep = add_movie(&pool, "Keep", 5.0).await;
    let doomed = add_movie(&pool, "Doomed", 6.0).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/delete?id={}", doomed.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let titles = movies::list_titles(&pool).await.unwrap();
    assert_eq!(titles, vec![keep.title.clone()]);

    let again = app
        .oneshot(get(&format!("/delete?id={}", doomed.id)))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Add flow
// =============================================================================

#[tokio::test]
async fn test_add_form_renders() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    let response = app.oneshot(get("/add")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Movie Title"));
    assert!(html.contains("Add Movie"));
}

#[tokio::test]
async fn test_add_blank_title_does_not_search() {
    let (app, _, catalog) = setup(StubCatalog::default()).await;

    let response = app.oneshot(post_form("/add", "title=+++")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("field-error"));
    assert!(catalog.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_lists_candidates_with_duplicate_hint() {
    let catalog = StubCatalog {
        results: vec![
            candidate(438631, "Dune", "2021-09-15"),
            candidate(841, "Dune", "1984-12-14"),
            candidate(693134, "Dune: Part Two", "2024-02-27"),
        ],
        ..Default::default()
    };
    let (app, pool, catalog) = setup(catalog).await;
    add_movie(&pool, "Dune", 8.0).await;

    let response = app.oneshot(post_form("/add", "title=Dune")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains(r#"href="/find?id=438631""#));
    assert!(html.contains(r#"href="/find?id=841""#));
    assert!(html.contains(r#"href="/find?id=693134""#));
    assert!(html.contains("Dune - 2021"));
    assert_eq!(html.matches("already in your list").count(), 2);
    assert!(!html.contains("data-empty"));

    assert_eq!(*catalog.searches.lock().unwrap(), vec!["Dune".to_string()]);
}

#[tokio::test]
async fn test_add_zero_results_shows_empty_indicator() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    let response = app
        .oneshot(post_form("/add", "title=Nothing+Matches"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains(r#"data-empty="true""#));
}

#[tokio::test]
async fn test_add_provider_failure_is_bad_gateway() {
    let catalog = StubCatalog {
        fail: true,
        ..Default::default()
    };
    let (app, _, _) = setup(catalog).await;

    let response = app.oneshot(post_form("/add", "title=Dune")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Resolve-selection flow
// =============================================================================

#[tokio::test]
async fn test_find_creates_movie_and_redirects_to_edit() {
    let catalog = StubCatalog {
        details: Some(dune_details()),
        ..Default::default()
    };
    let (app, pool, _) = setup(catalog).await;

    let response = app.oneshot(get("/find?id=438631")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let stored = movies::list_by_rating(&pool).await.unwrap();
    assert_eq!(stored.len(), 1);
    let movie = &stored[0];
    assert_eq!(location(&response), format!("/edit?id={}", movie.id));

    assert_eq!(movie.title, "Dune");
    assert_eq!(movie.year, 2021);
    assert_eq!(movie.description, "...");
    assert_eq!(movie.poster_url, format!("{}/abc.jpg", IMAGE_BASE));
    assert_eq!(movie.rating, 0.0);
    assert_eq!(movie.review, "None");
}

#[tokio::test]
async fn test_find_then_follow_redirect_to_edit_form() {
    let catalog = StubCatalog {
        details: Some(dune_details()),
        ..Default::default()
    };
    let (app, _, _) = setup(catalog).await;

    let response = app.clone().oneshot(get("/find?id=438631")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/edit?id="), "{}", target);

    let response = app.oneshot(get(&target)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Dune"));
}

#[tokio::test]
async fn test_find_duplicate_title_is_conflict() {
    let catalog = StubCatalog {
        details: Some(dune_details()),
        ..Default::default()
    };
    let (app, pool, _) = setup(catalog).await;
    let existing = add_movie(&pool, "Dune", 9.0).await;

    let response = app.oneshot(get("/find?id=438631")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let stored = movies::list_by_rating(&pool).await.unwrap();
    assert_eq!(stored, vec![existing]);
}

#[tokio::test]
async fn test_find_provider_failure_is_bad_gateway() {
    let (app, pool, _) = setup(StubCatalog::default()).await;

    let response = app.oneshot(get("/find?id=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(movies::list_titles(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_malformed_external_id_is_404() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    let response = app.oneshot(get("/find?id=abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = setup(StubCatalog::default()).await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_str(&body_text(response.into_body()).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tm-web");
    assert!(body["version"].is_string());
}
