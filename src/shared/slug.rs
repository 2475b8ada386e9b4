//! Slug Derivation
//!
//! URL-safe identifiers derived from display titles. Transliteration and
//! normalization are delegated to the `slug` crate; this module only
//! enforces the storage length limit.

/// Maximum slug length, matching the VARCHAR(100) column on `groups`.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Derive a URL-safe slug from a title, truncated to [`MAX_SLUG_LENGTH`]
/// characters.
pub fn slugify(title: &str) -> String {
    let full = slug::slugify(title);
    full.chars().take(MAX_SLUG_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn transliterates_non_ascii() {
        assert_eq!(slugify("Группа блога"), "gruppa-bloga");
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("What's new?!"), "what-s-new");
    }

    #[test]
    fn truncates_to_column_limit() {
        let long_title = "word ".repeat(50);
        let s = slugify(&long_title);
        assert_eq!(s.chars().count(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn same_title_derives_same_slug() {
        assert_eq!(slugify("Travel Notes"), slugify("Travel Notes"));
    }
}
