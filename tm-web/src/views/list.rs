//! List page - every movie, best rank first

use tm_common::db::MovieRecord;

use super::{escape, page};

/// Render movies in the order given (expected best-first)
pub fn render_list(movies: &[MovieRecord]) -> String {
    let mut body = String::from("<h2>My Top Movies</h2>\n");

    if movies.is_empty() {
        body.push_str(r#"<p class="empty-result">Your list is empty. Add a movie to get started.</p>"#);
        body.push('\n');
    }

    for movie in movies {
        body.push_str(&format!(
            r#"<div class="card" id="movie-{id}">
    <img src="{poster}" alt="{title} poster">
    <div>
        <div class="rank">{rank}</div>
        <h3>{title} <span class="meta">({year})</span></h3>
        <div class="meta">Rating: {rating}</div>
        <p class="review">"{review}"</p>
        <p>{description}</p>
        <a class="button" href="/edit?id={id}">Update</a>
        <a class="button danger" href="/delete?id={id}">Delete</a>
    </div>
</div>
"#,
            id = movie.id,
            poster = escape(&movie.poster_url),
            title = escape(&movie.title),
            rank = movie.rank,
            year = movie.year,
            rating = movie.rating,
            review = escape(&movie.review),
            description = escape(&movie.description),
        ));
    }

    body.push_str(r#"<a class="button" href="/add">Add Movie</a>"#);

    page("My Top Movies", &body)
}
