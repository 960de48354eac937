//! Add page - title search form

use crate::forms::AddForm;

use super::{escape, page};

pub fn render_add(form: &AddForm) -> String {
    let error = form
        .error
        .map(|msg| format!(r#"<div class="field-error">{}</div>"#, escape(msg)))
        .unwrap_or_default();

    let body = format!(
        r#"<h2>Add a Movie</h2>
<form method="post" action="/add" novalidate>
    <div class="{class}">
        <label for="title">Movie Title</label>
        <input type="text" id="title" name="title" value="{title}">
        {error}
    </div>
    <button class="button" type="submit">Add Movie</button>
</form>"#,
        class = if form.error.is_some() { "field invalid" } else { "field" },
        title = escape(&form.title),
        error = error,
    );

    page("Add Movie", &body)
}
