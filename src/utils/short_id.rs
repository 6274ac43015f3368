//! Short identifier generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default length of generated short identifiers.
pub const DEFAULT_LENGTH: usize = 6;

/// Generates a random alphanumeric short identifier of the given length.
///
/// Uniqueness is not guaranteed here; callers retry against the store's
/// unique index (see the link service).
pub fn generate(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_requested_length() {
        assert_eq!(generate(6).len(), 6);
        assert_eq!(generate(12).len(), 12);
    }

    #[test]
    fn test_generate_is_alphanumeric() {
        let id = generate(64);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_produces_distinct_ids() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            ids.insert(generate(DEFAULT_LENGTH));
        }
        // 62^6 possibilities; 1000 draws colliding would indicate a broken generator.
        assert!(ids.len() > 990);
    }
}
