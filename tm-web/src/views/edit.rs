//! Edit page - rating and review form for one movie

use tm_common::db::MovieRecord;

use crate::forms::EditForm;

use super::{escape, page};

pub fn render_edit(movie: &MovieRecord, form: &EditForm) -> String {
    let body = format!(
        r#"<h2>{title}</h2>
<p class="meta">Edit Movie Rating</p>
<form method="post" action="/edit?id={id}" novalidate>
    <div class="{rating_class}">
        <label for="rating">Your Rating Out of 10 e.g 7.5</label>
        <input type="text" id="rating" name="rating" value="{rating}">
        {rating_error}
    </div>
    <div class="{review_class}">
        <label for="review">Your Review</label>
        <input type="text" id="review" name="review" value="{review}">
        {review_error}
    </div>
    <button class="button" type="submit">Done</button>
</form>"#,
        title = escape(&movie.title),
        id = movie.id,
        rating = escape(&form.rating),
        review = escape(&form.review),
        rating_class = field_class(form.errors.rating),
        review_class = field_class(form.errors.review),
        rating_error = field_error(form.errors.rating),
        review_error = field_error(form.errors.review),
    );

    page(&format!("Edit {}", movie.title), &body)
}

fn field_class(error: Option<&str>) -> &'static str {
    if error.is_some() {
        "field invalid"
    } else {
        "field"
    }
}

fn field_error(error: Option<&str>) -> String {
    error
        .map(|msg| format!(r#"<div class="field-error">{}</div>"#, escape(msg)))
        .unwrap_or_default()
}
