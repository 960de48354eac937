//! Form state machines for the edit and add flows
//!
//! Each flow has two explicit states: show the form, or act on a valid
//! submission. An invalid submission goes back to showing the form with
//! the offending fields marked.

use serde::Deserialize;
use tm_common::db::MovieRecord;

const REQUIRED: &str = "This field is required.";
const NOT_A_NUMBER: &str = "Not a valid decimal value.";

/// Raw `/edit` form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditSubmission {
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditErrors {
    pub rating: Option<&'static str>,
    pub review: Option<&'static str>,
}

impl EditErrors {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.review.is_none()
    }
}

/// Values to pre-fill the edit form with
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub rating: String,
    pub review: String,
    pub errors: EditErrors,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEdit {
    pub rating: f64,
    pub review: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditStep {
    ShowForm(EditForm),
    Commit(ValidEdit),
}

impl EditStep {
    /// Initial state: the form filled with the stored values
    pub fn show(movie: &MovieRecord) -> Self {
        EditStep::ShowForm(EditForm {
            rating: movie.rating.to_string(),
            review: movie.review.clone(),
            errors: EditErrors::default(),
        })
    }

    /// Validate a submission
    pub fn submit(submission: EditSubmission) -> Self {
        let rating_raw = submission.rating.unwrap_or_default();
        let review = submission.review.unwrap_or_default();

        let rating = parse_rating(&rating_raw);
        let errors = EditErrors {
            rating: rating.err(),
            review: review.trim().is_empty().then_some(REQUIRED),
        };

        match rating {
            Ok(rating) if errors.is_empty() => EditStep::Commit(ValidEdit { rating, review }),
            _ => EditStep::ShowForm(EditForm {
                rating: rating_raw,
                review,
                errors,
            }),
        }
    }
}

fn parse_rating(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NOT_A_NUMBER),
    }
}

/// Raw `/add` form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddSubmission {
    #[serde(default)]
    pub title: Option<String>,
}

/// Title-entry form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddForm {
    pub title: String,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddStep {
    ShowTitleForm(AddForm),
    /// Search the catalog for this (trimmed) title
    Search(String),
}

impl AddStep {
    pub fn submit(submission: AddSubmission) -> Self {
        let title = submission.title.unwrap_or_default();
        let trimmed = title.trim();

        if trimmed.is_empty() {
            AddStep::ShowTitleForm(AddForm {
                title,
                error: Some(REQUIRED),
            })
        } else {
            AddStep::Search(trimmed.to_string())
        }
    }
}
