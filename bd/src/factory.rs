//! EventFactory - fabricates synthetic event payloads
//!
//! Each call to [`EventFactory::generate`] is independent: the only state the
//! factory holds is the normalized tag pool it was built from.

use rand::Rng;
use tracing::debug;

use crate::domain::{EventPayload, EventType};
use crate::error::BurstError;

/// Canned remarks attached to comment events
pub const COMMENT_SAMPLES: &[&str] = &[
    "Great post!",
    "Totally agree",
    "Interesting take",
    "Thanks for sharing",
    "Never thought of it that way",
];

/// Prefix for synthetic user ids
const USER_ID_PREFIX: &str = "sim_";

/// Exclusive upper bound of the random user id suffix
const USER_ID_RANGE: u32 = 100_000;

/// Most hashtags a single event can carry
const MAX_HASHTAGS: usize = 3;

/// Normalize a raw tag: trim whitespace and ensure a leading `#`
///
/// Returns `None` for entries with nothing left after trimming (including a
/// bare `#`).
pub fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if body.is_empty() {
        return None;
    }
    Some(format!("#{}", body))
}

/// Produces one synthetic payload per invocation
#[derive(Debug, Clone)]
pub struct EventFactory {
    tags: Vec<String>,
}

impl EventFactory {
    /// Build a factory from a configured tag pool
    ///
    /// Blank entries are dropped; fails with a configuration error when none
    /// survive.
    pub fn new<S: AsRef<str>>(tag_pool: &[S]) -> Result<Self, BurstError> {
        debug!(pool_len = tag_pool.len(), "EventFactory::new: called");
        let tags: Vec<String> = tag_pool.iter().filter_map(|t| normalize_tag(t.as_ref())).collect();

        if tags.is_empty() {
            debug!("EventFactory::new: no usable tags after filtering");
            return Err(BurstError::configuration(
                "tag pool contains no usable hashtags after trimming blank entries",
            ));
        }

        debug!(?tags, "EventFactory::new: normalized pool");
        Ok(Self { tags })
    }

    /// The normalized pool hashtags are drawn from
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Generate a single payload
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> EventPayload {
        let event_type = EventType::ALL[rng.random_range(0..EventType::ALL.len())];

        let count = rng.random_range(1..=MAX_HASHTAGS);
        let hashtags = (0..count)
            .map(|_| self.tags[rng.random_range(0..self.tags.len())].clone())
            .collect();

        let user_id = format!("{}{}", USER_ID_PREFIX, rng.random_range(0..USER_ID_RANGE));

        let payload = EventPayload::new(event_type, hashtags, user_id);
        match event_type {
            EventType::Comment => {
                let remark = COMMENT_SAMPLES[rng.random_range(0..COMMENT_SAMPLES.len())];
                payload.with_comment(remark)
            }
            EventType::Like | EventType::Share => payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("AI"), Some("#AI".to_string()));
        assert_eq!(normalize_tag("#AI"), Some("#AI".to_string()));
        assert_eq!(normalize_tag("  Go  "), Some("#Go".to_string()));
        assert_eq!(normalize_tag(" #Rust "), Some("#Rust".to_string()));
        assert_eq!(normalize_tag(""), None);
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag("#"), None);
    }

    #[test]
    fn test_blank_pool_is_configuration_error() {
        let err = EventFactory::new(&["", "  "]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_pool_is_configuration_error() {
        let pool: [&str; 0] = [];
        assert!(EventFactory::new(&pool).is_err());
    }

    #[test]
    fn test_blank_entries_filtered() {
        let factory = EventFactory::new(&["", "AI", "  ", "#Go"]).unwrap();
        assert_eq!(factory.tags(), &["#AI".to_string(), "#Go".to_string()]);
    }

    #[test]
    fn test_generate_draws_from_pool() {
        let factory = EventFactory::new(&["#AI", "#Go"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let payload = factory.generate(&mut rng);
            assert!((1..=MAX_HASHTAGS).contains(&payload.hashtags.len()));
            for tag in &payload.hashtags {
                assert!(tag == "#AI" || tag == "#Go", "unexpected tag {}", tag);
            }
            assert!(payload.user_id.starts_with(USER_ID_PREFIX));
        }
    }

    #[test]
    fn test_generate_covers_all_types_and_counts() {
        let factory = EventFactory::new(&["#AI"]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut types = HashSet::new();
        let mut counts = HashSet::new();
        for _ in 0..500 {
            let payload = factory.generate(&mut rng);
            types.insert(payload.event_type);
            counts.insert(payload.hashtags.len());
        }

        assert_eq!(types.len(), 3);
        assert_eq!(counts, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_comment_only_on_comment_events() {
        let factory = EventFactory::new(&["#AI"]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..300 {
            let payload = factory.generate(&mut rng);
            match payload.event_type {
                EventType::Comment => {
                    let comment = payload.comment.expect("comment event without comment");
                    assert!(COMMENT_SAMPLES.contains(&comment.as_str()));
                }
                _ => assert!(payload.comment.is_none()),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_hashtags_non_empty_and_prefixed(
            seed in any::<u64>(),
            pool in prop::collection::vec("[ ]{0,2}#?[A-Za-z0-9]{1,8}[ ]{0,2}", 1..6),
        ) {
            let factory = EventFactory::new(pool.as_slice()).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let payload = factory.generate(&mut rng);

            prop_assert!(!payload.hashtags.is_empty());
            for tag in &payload.hashtags {
                prop_assert!(tag.starts_with('#'));
                prop_assert_eq!(tag.trim(), tag.as_str());
            }
            prop_assert_eq!(payload.comment.is_some(), payload.event_type == EventType::Comment);
        }
    }
}
