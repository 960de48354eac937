//! Movie record store
//!
//! Every mutating call commits immediately. Callers never hold a
//! transaction across requests; concurrent edits are last-writer-wins.

use crate::db::models::{MovieRecord, NewMovie};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

const MOVIE_COLUMNS: &str = r#"
    id, title, year, description,
    CAST(COALESCE(rating, 0.0) AS REAL) AS rating,
    CAST(COALESCE(rank, 0) AS INTEGER) AS rank,
    COALESCE(review, 'None') AS review,
    poster_url
"#;

// RETURNING hands back column defaults without REAL affinity applied, so
// `rating` is cast explicitly in MOVIE_COLUMNS.
fn movie_from_row(row: &SqliteRow) -> Result<MovieRecord> {
    Ok(MovieRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
        description: row.try_get("description")?,
        rating: row.try_get("rating")?,
        rank: row.try_get("rank")?,
        review: row.try_get("review")?,
        poster_url: row.try_get("poster_url")?,
    })
}

/// Insert a new movie; fails with `Duplicate` if the title is taken
pub async fn insert_movie(pool: &SqlitePool, movie: &NewMovie) -> Result<MovieRecord> {
    let sql = format!(
        r#"
        INSERT INTO movies (title, year, description, poster_url)
        VALUES (?, ?, ?, ?)
        RETURNING {}
        "#,
        MOVIE_COLUMNS
    );

    // Decode before commit so a bad row never outlives a failed insert
    let mut tx = pool.begin().await?;

    let row = sqlx::query(&sql)
        .bind(&movie.title)
        .bind(movie.year)
        .bind(&movie.description)
        .bind(&movie.poster_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Error::from_insert(e, &movie.title))?;

    let record = movie_from_row(&row)?;
    tx.commit().await?;

    debug!(movie_id = record.id, title = %record.title, "Inserted movie");
    Ok(record)
}

/// Load a movie by id
pub async fn get_movie(pool: &SqlitePool, id: i64) -> Result<MovieRecord> {
    let sql = format!("SELECT {} FROM movies WHERE id = ?", MOVIE_COLUMNS);

    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("movie {}", id)))?;

    movie_from_row(&row)
}

/// Overwrite the user-editable fields of a movie
pub async fn update_rating_and_review(
    pool: &SqlitePool,
    id: i64,
    rating: f64,
    review: &str,
) -> Result<()> {
    let result = sqlx::query("UPDATE movies SET rating = ?, review = ? WHERE id = ?")
        .bind(rating)
        .bind(review)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("movie {}", id)));
    }

    Ok(())
}

/// Delete a movie by id
pub async fn delete_movie(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("movie {}", id)));
    }

    debug!(movie_id = id, "Deleted movie");
    Ok(())
}

/// All movies, ascending by rating; equal ratings keep insertion order
pub async fn list_by_rating(pool: &SqlitePool) -> Result<Vec<MovieRecord>> {
    let sql = format!(
        "SELECT {} FROM movies ORDER BY COALESCE(rating, 0.0) ASC, id ASC",
        MOVIE_COLUMNS
    );

    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter().map(movie_from_row).collect()
}

/// Titles of every stored movie
pub async fn list_titles(pool: &SqlitePool) -> Result<Vec<String>> {
    let titles = sqlx::query_scalar::<_, String>("SELECT title FROM movies ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    Ok(titles)
}

/// Persist the `rank` of each movie in a single transaction
pub async fn save_ranks(pool: &SqlitePool, movies: &[MovieRecord]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for movie in movies {
        sqlx::query("UPDATE movies SET rank = ? WHERE id = ?")
            .bind(movie.rank)
            .bind(movie.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
