//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

/// Post create/edit form body.
///
/// `text` defaults to empty when absent so a missing field surfaces as a
/// form validation error rather than a deserialization failure. Both fields
/// are passed through raw; the form validation in the service layer owns
/// every rule, including resolving `group`.
#[derive(Debug, Deserialize)]
pub struct PostFormRequest {
    #[serde(default)]
    pub text: String,

    /// ID of an existing group, as a string per the API's ID convention.
    pub group: Option<String>,
}

/// Create group request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional explicit slug; derived from the title when absent.
    pub slug: Option<String>,

    pub description: Option<String>,
}
