//! Select page - search candidates for the add flow

use std::collections::HashSet;

use crate::catalog::MovieCandidate;

use super::{escape, page};

/// Render candidates; titles already stored get a hint but stay clickable
pub fn render_select(
    query: &str,
    candidates: &[MovieCandidate],
    existing_titles: &HashSet<String>,
) -> String {
    let mut body = format!("<h2>Results for \"{}\"</h2>\n", escape(query));

    if candidates.is_empty() {
        body.push_str(
            r#"<p class="empty-result" data-empty="true">No movies found. Try another title.</p>"#,
        );
        body.push('\n');
    } else {
        body.push_str("<ul class=\"candidates\">\n");
        for candidate in candidates {
            let title = candidate.display_title();
            let year = candidate
                .year()
                .map(|y| format!(" - {}", y))
                .unwrap_or_default();
            let hint = if existing_titles.contains(title) {
                r#"<span class="hint">already in your list</span>"#
            } else {
                ""
            };

            body.push_str(&format!(
                "    <li><a href=\"/find?id={id}\">{title}{year}</a>{hint}</li>\n",
                id = candidate.id,
                title = escape(title),
                year = year,
                hint = hint,
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str(r#"<a class="button" href="/add">Search again</a>"#);

    page("Select Movie", &body)
}
