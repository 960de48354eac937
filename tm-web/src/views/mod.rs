//! HTML views
//!
//! Pages are plain `format!` templates sharing one layout. Every value that
//! came from the store, the catalog or the user goes through [`escape`].
//!
//! - **List** (`list`): movie cards in rank order
//! - **Edit** (`edit`): rating/review form
//! - **Add** (`add`): title search form
//! - **Select** (`select`): search candidates

mod add;
mod edit;
mod layout;
mod list;
mod select;

pub use add::render_add;
pub use edit::render_edit;
pub use layout::{escape, page};
pub use list::render_list;
pub use select::render_select;

use axum::http::StatusCode;

/// Minimal error page
pub fn render_error(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<div class="error-page">
    <h2>{code} {reason}</h2>
    <p>{message}</p>
    <a class="button" href="/">Back to my list</a>
</div>"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape(message),
    );

    page("Error", &body)
}
