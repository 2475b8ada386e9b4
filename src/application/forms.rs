//! Form Validation
//!
//! Validates and normalizes write-path input before it is persisted.
//! Validation here is pure with respect to storage: it reads current state
//! (group existence, slug collisions) but never writes; persistence is the
//! caller's job after a successful validation.
//!
//! Fields are declared statically rather than discovered reflectively, so
//! every rule is visible at the definition site.

use crate::domain::GroupRepository;
use crate::shared::error::{AppError, FieldError};
use crate::shared::slug::{slugify, MAX_SLUG_LENGTH};

/// Post form errors, either field-level problems the caller re-displays or
/// a repository failure encountered during a lookup.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Validation failed")]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Repository(#[from] AppError),
}

fn invalid(field: &str, message: String) -> FormError {
    FormError::Invalid(vec![FieldError {
        field: field.to_string(),
        message,
    }])
}

/// Input fields of the post create/edit form.
///
/// `group` is the raw submitted value; resolving it (including parsing) is
/// part of validation, so a malformed identifier is a field error like any
/// other.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    /// Post body (required).
    pub text: String,
    /// Optional group identifier the post is filed under.
    pub group: Option<String>,
}

/// Normalized post fields after a successful validation.
#[derive(Debug, Clone)]
pub struct ValidatedPost {
    pub text: String,
    pub group_id: Option<i64>,
}

impl PostForm {
    /// Validate the form against current state.
    ///
    /// `text` must be non-empty after trimming; a supplied `group` must
    /// resolve to an existing group. An empty `group` value means no group.
    pub async fn validate<G: GroupRepository>(
        &self,
        groups: &G,
    ) -> Result<ValidatedPost, FormError> {
        if self.text.trim().is_empty() {
            return Err(invalid("text", "Text is required".into()));
        }

        let group_id = match self.group.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let group_id: i64 = raw.parse().map_err(|_| {
                    invalid("group", format!("Group \"{}\" does not exist", raw))
                })?;
                if groups.find_by_id(group_id).await?.is_none() {
                    return Err(invalid(
                        "group",
                        format!("Group {} does not exist", group_id),
                    ));
                }
                Some(group_id)
            }
            None => None,
        };

        Ok(ValidatedPost {
            text: self.text.clone(),
            group_id,
        })
    }
}

/// Validate a slug for a slug-carrying entity.
///
/// When no slug is supplied one is derived from `title` by transliteration,
/// truncated to [`MAX_SLUG_LENGTH`] characters. Supplied or derived, the slug
/// is then checked against existing records; a collision fails with a message
/// naming the conflicting slug.
///
/// This is a pre-check, not an atomic constraint: two concurrent validations
/// of the same slug can both pass, and the storage unique constraint is the
/// final authority. Callers must treat a uniqueness violation on save as the
/// same validation failure (see [`slug_taken_error`]).
pub async fn validate_slug<G: GroupRepository>(
    supplied: Option<&str>,
    title: &str,
    groups: &G,
) -> Result<String, FormError> {
    let slug = match supplied.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => {
            if s.chars().count() > MAX_SLUG_LENGTH {
                return Err(invalid(
                    "slug",
                    format!("Slug must be at most {} characters", MAX_SLUG_LENGTH),
                ));
            }
            s.to_string()
        }
        None => slugify(title),
    };

    if groups.slug_exists(&slug).await? {
        return Err(slug_taken_error(&slug));
    }

    Ok(slug)
}

/// The validation failure reported when a slug is already taken, shared by
/// the pre-check and by the storage-level fallback on insert.
pub fn slug_taken_error(slug: &str) -> FormError {
    invalid(
        "slug",
        format!("Address \"{}\" already exists, choose a unique value", slug),
    )
}
