//! CSS identifier helpers.

use uuid::Uuid;

/// Normalize a layer name into a class token: lower-cased, with every
/// space replaced by a hyphen.
///
/// Other CSS-unsafe characters pass through unchanged; callers accept
/// that limitation.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// A short numeric token for auto-generated class names.
///
/// Derived from a fresh UUID reduced to four digits. Uniqueness is
/// best-effort within one conversion; a collision merges two classes and
/// is accepted as non-fatal.
#[must_use]
pub fn new_suffix() -> u32 {
    (Uuid::new_v4().as_u128() % 10_000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_lowercases_and_hyphenates() {
        assert_eq!(normalize_name("Hero Section"), "hero-section");
        assert_eq!(normalize_name("CTA Button 2"), "cta-button-2");
    }

    #[test]
    fn test_normalize_name_leaves_other_characters() {
        // Only spaces are rewritten; anything else passes through.
        assert_eq!(normalize_name("Nav/Item"), "nav/item");
    }

    #[test]
    fn test_new_suffix_is_short() {
        for _ in 0..100 {
            assert!(new_suffix() < 10_000);
        }
    }
}
