//! Add flow (title search) and resolve-selection (`/find`)

use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use tm_common::db::movies;
use tracing::info;

use super::IdQuery;
use crate::forms::{AddForm, AddStep, AddSubmission};
use crate::{views, ApiResult, AppState};

/// GET /add
pub async fn add_form() -> Html<String> {
    Html(views::render_add(&AddForm::default()))
}

/// POST /add
///
/// Valid title: search the catalog and show candidates. Titles already in
/// the store are passed along for the "already in your list" hint only.
pub async fn add_submit(
    State(state): State<AppState>,
    Form(submission): Form<AddSubmission>,
) -> ApiResult<Html<String>> {
    let title = match AddStep::submit(submission) {
        AddStep::ShowTitleForm(form) => return Ok(Html(views::render_add(&form))),
        AddStep::Search(title) => title,
    };

    let candidates = state.catalog.search(&title).await?;
    let existing: HashSet<String> = movies::list_titles(&state.db).await?.into_iter().collect();

    Ok(Html(views::render_select(&title, &candidates, &existing)))
}

/// GET /find?id=<external id>
///
/// Fetches details, stores a new movie and continues to its edit form.
pub async fn find_movie(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Redirect> {
    let external_id = query.external_id()?;

    let details = state.catalog.details(&external_id).await?;
    let new_movie = details.into_new_movie(&state.image_base_url)?;
    let movie = movies::insert_movie(&state.db, &new_movie).await?;

    info!(
        movie_id = movie.id,
        external_id = %external_id,
        title = %movie.title,
        "Movie added"
    );

    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

/// Build add/find routes
pub fn add_routes() -> Router<AppState> {
    Router::new()
        .route("/add", get(add_form).post(add_submit))
        .route("/find", get(find_movie))
}
