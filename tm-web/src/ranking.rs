//! Rank computation for the list view
//!
//! Movies arrive sorted ascending by rating. With N movies, position `i`
//! (0-indexed) gets rank `N - i`, so the highest rating ends up as rank 1.
//! Ties are not special-cased; their relative order comes from the store.

use sqlx::SqlitePool;
use tm_common::db::{movies, MovieRecord};
use tracing::debug;

/// Assign dense ranks to movies already sorted ascending by rating
pub fn assign_ranks(ascending: &mut [MovieRecord]) {
    let n = ascending.len() as i64;
    for (i, movie) in ascending.iter_mut().enumerate() {
        movie.rank = n - i as i64;
    }
}

/// Recompute ranks, write them back, and return movies best-first
pub async fn refresh_ranks(pool: &SqlitePool) -> tm_common::Result<Vec<MovieRecord>> {
    let mut all = movies::list_by_rating(pool).await?;
    assign_ranks(&mut all);
    movies::save_ranks(pool, &all).await?;

    debug!(count = all.len(), "Ranks refreshed");

    all.reverse();
    Ok(all)
}
