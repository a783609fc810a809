//! Identifier generation and the derived short label.
//!
//! The identifier source is a trait object rather than a direct call to
//! `Uuid::new_v4()` so tests can substitute a deterministic sequence.

use tracing::debug;
use uuid::Uuid;

/// Number of trailing identifier characters printed under each code.
pub const LABEL_LEN: usize = 6;

/// Produces identifiers for stickers, one per call.
///
/// Implementations must be `Send + Sync`; stateful generators need interior
/// mutability (e.g. an atomic counter).
pub trait IdGenerator: Send + Sync {
    /// Return the next identifier. Identifiers should be unique within a run.
    fn next_id(&self) -> String;
}

/// Random UUIDv4 identifiers in hyphenated lowercase form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        let id = Uuid::new_v4().to_string();
        debug!("Generated identifier {}", id);
        id
    }
}

/// The last [`LABEL_LEN`] characters of `identifier` (all of it when shorter).
pub fn display_label(identifier: &str) -> String {
    let count = identifier.chars().count();
    identifier
        .chars()
        .skip(count.saturating_sub(LABEL_LEN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_produces_uuids() {
        let id = UuidGenerator.next_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn uuid_generator_is_unique_across_many_calls() {
        let ids: HashSet<String> = (0..10_000).map(|_| UuidGenerator.next_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn label_is_last_six_chars() {
        assert_eq!(
            display_label("3f2504e0-4f89-41d3-9a0c-0305e82c3301"),
            "2c3301"
        );
    }

    #[test]
    fn label_of_short_id_is_whole_id() {
        assert_eq!(display_label("abc"), "abc");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn label_counts_chars_not_bytes() {
        assert_eq!(display_label("ééééééé"), "éééééé");
    }
}
