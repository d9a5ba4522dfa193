//! URL slugs derived from listing titles. Collisions get a numeric suffix,
//! chosen by the create handler against the database.

/// Lowercases and keeps alphanumeric runs, joined with single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        "listing".to_string()
    } else {
        slug
    }
}

pub fn with_suffix(base: &str, attempt: u32) -> String {
    format!("{base}-{attempt}")
}

/// Base slug for a renamed listing, or `None` when the current slug already
/// matches the new title.
pub fn refreshed_base(current_slug: &str, title: &str) -> Option<String> {
    let base = slugify(title);
    (base != current_slug).then_some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Sunny Loft in the Old Town"), "sunny-loft-in-the-old-town");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Beach house -- with pool!"), "beach-house-with-pool");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  ~Cozy cabin~  "), "cozy-cabin");
    }

    #[test]
    fn empty_titles_fall_back() {
        assert_eq!(slugify("!!!"), "listing");
        assert_eq!(slugify(""), "listing");
    }

    #[test]
    fn suffix_appends_attempt_number() {
        assert_eq!(with_suffix("cozy-cabin", 2), "cozy-cabin-2");
    }

    #[test]
    fn rename_produces_a_new_base() {
        assert_eq!(
            refreshed_base("cozy-cabin", "Cozy cabin with sauna"),
            Some("cozy-cabin-with-sauna".to_string())
        );
    }

    #[test]
    fn unchanged_title_keeps_the_slug() {
        assert_eq!(refreshed_base("cozy-cabin", "Cozy Cabin!"), None);
    }
}
