//! List, edit and delete flows

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tm_common::db::movies;
use tracing::info;

use super::IdQuery;
use crate::forms::{EditStep, EditSubmission};
use crate::{ranking, views, ApiResult, AppState};

/// GET /
///
/// Recomputes and stores every rank, then renders the list best-first.
pub async fn list_movies(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let ranked = ranking::refresh_ranks(&state.db).await?;
    Ok(Html(views::render_list(&ranked)))
}

/// GET /edit?id=
pub async fn edit_form(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Response> {
    let movie = movies::get_movie(&state.db, query.record_id()?).await?;
    render_step(&state, &movie, EditStep::show(&movie)).await
}

/// POST /edit?id=
pub async fn edit_submit(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Form(submission): Form<EditSubmission>,
) -> ApiResult<Response> {
    let movie = movies::get_movie(&state.db, query.record_id()?).await?;
    render_step(&state, &movie, EditStep::submit(submission)).await
}

async fn render_step(
    state: &AppState,
    movie: &tm_common::db::MovieRecord,
    step: EditStep,
) -> ApiResult<Response> {
    match step {
        EditStep::ShowForm(form) => Ok(Html(views::render_edit(movie, &form)).into_response()),
        EditStep::Commit(edit) => {
            movies::update_rating_and_review(&state.db, movie.id, edit.rating, &edit.review)
                .await?;
            info!(movie_id = movie.id, rating = edit.rating, "Movie updated");
            Ok(Redirect::to("/").into_response())
        }
    }
}

/// GET /delete?id=
pub async fn delete_movie(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Redirect> {
    let id = query.record_id()?;
    movies::delete_movie(&state.db, id).await?;
    info!(movie_id = id, "Movie deleted");
    Ok(Redirect::to("/"))
}

/// Build list/edit/delete routes
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/edit", get(edit_form).post(edit_submit))
        .route("/delete", get(delete_movie))
}
