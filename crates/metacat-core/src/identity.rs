//! Deterministic identity generation.
//!
//! Identities are the lowercase hex MD5 of the components joined by
//! [`IDENTITY_SEPARATOR`](crate::IDENTITY_SEPARATOR), which is what the
//! catalog itself computes.

use crate::{IDENTITY_SEPARATOR, error::ValidationError, relation::RelationType, types::SourceType};
use md5::{Digest, Md5};

/// Length of a generated identity in hex characters.
pub const IDENTITY_LEN: usize = 32;

/// Hash the given components. An absent component contributes nothing but
/// still keeps its separator, so `[None, Some("a")]` and `[Some("a")]`
/// differ.
#[must_use]
pub fn generate(parts: &[Option<&str>]) -> String {
    let mut hasher = Md5::new();

    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            hasher.update(IDENTITY_SEPARATOR.as_bytes());
        }
        if let Some(part) = part {
            hasher.update(part.as_bytes());
        }
    }

    hex::encode(hasher.finalize())
}

/// Like [`generate`], but every component must be non-empty.
pub fn custom(parts: &[&str]) -> Result<String, ValidationError> {
    if let Some(index) = parts.iter().position(|part| part.is_empty()) {
        return Err(ValidationError::EmptyIdentityComponent { index });
    }

    let parts: Vec<_> = parts.iter().copied().map(Some).collect();

    Ok(generate(&parts))
}

/// Identity of a relation. Endpoint ids are sorted first so the order in
/// which they were collected does not matter.
#[must_use]
pub fn relation(
    relation_type: RelationType,
    ep1_ids: &[String],
    ep1_source: SourceType,
    ep2_ids: &[String],
    ep2_source: SourceType,
) -> String {
    let ep1 = sorted_join(ep1_ids);
    let ep2 = sorted_join(ep2_ids);

    generate(&[
        Some(relation_type.as_str()),
        Some(ep1.as_str()),
        Some(ep1_source.as_str()),
        Some(ep2.as_str()),
        Some(ep2_source.as_str()),
    ])
}

/// Key standing for "every tag" or "every property" in a change set.
#[must_use]
pub fn wildcard() -> String {
    generate(&[Some("*")])
}

/// Hex digits of either case are accepted.
#[must_use]
pub fn is_valid(identity: &str) -> bool {
    identity.len() == IDENTITY_LEN && identity.bytes().all(|b| b.is_ascii_hexdigit())
}

fn sorted_join(ids: &[String]) -> String {
    let mut sorted: Vec<&str> = ids.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    sorted.join(",")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generate_is_deterministic_and_well_formed() {
        let a = generate(&[Some("hdfs"), Some("/data/orders")]);
        let b = generate(&[Some("hdfs"), Some("/data/orders")]);

        assert_eq!(a, b);
        assert_eq!(a, "2b11295dd22aa6698e5fd553cd9c1f1d");
        assert_eq!(generate(&[Some("foo")]), "acbd18db4cc2f85cedef654fccc4a4d8");
        assert_eq!(a.len(), IDENTITY_LEN);
    }

    #[test]
    fn wildcard_matches_the_catalog_key() {
        assert_eq!(wildcard(), "3389dae361af79b04c9c8e7057f60cc6");
    }

    #[test]
    fn is_valid_accepts_either_case() {
        let id = generate(&[Some("hdfs"), Some("/data/orders")]);

        assert!(is_valid(&id));
        assert!(is_valid(&id.to_uppercase()));
        assert!(is_valid("3389dae361af79b04c9c8e7057f60cc6"));
        assert!(!is_valid("not-an-id"));
        assert!(!is_valid(&format!("{id}0")));
        assert!(!is_valid("3389dae361af79b04c9c8e7057f60ccg"));
        assert!(!is_valid(""));
    }

    #[test]
    fn absent_parts_keep_their_separator() {
        let skipped = generate(&[None, Some("a")]);
        let single = generate(&[Some("a")]);
        let empty = generate(&[Some(""), Some("a")]);

        assert_ne!(skipped, single);
        assert_eq!(skipped, empty);
    }

    #[test]
    fn custom_rejects_empty_components() {
        let err = custom(&["cluster", "", "path"]).expect_err("empty component should fail");
        assert_eq!(err, ValidationError::EmptyIdentityComponent { index: 1 });

        let id = custom(&["cluster", "path"]).expect("non-empty components should hash");
        assert_eq!(id, generate(&[Some("cluster"), Some("path")]));
    }

    #[test]
    fn relation_identity_ignores_endpoint_id_order() {
        let forward = relation(
            RelationType::DataFlow,
            &["b".into(), "a".into()],
            SourceType::Hdfs,
            &["c".into()],
            SourceType::Sdk,
        );
        let reversed = relation(
            RelationType::DataFlow,
            &["a".into(), "b".into()],
            SourceType::Hdfs,
            &["c".into()],
            SourceType::Sdk,
        );
        let other_type = relation(
            RelationType::ParentChild,
            &["a".into(), "b".into()],
            SourceType::Hdfs,
            &["c".into()],
            SourceType::Sdk,
        );

        assert_eq!(forward, reversed);
        assert_ne!(forward, other_type);
    }

    proptest! {
        #[test]
        fn generated_identities_are_always_valid(parts in prop::collection::vec(".*", 1..5)) {
            let parts: Vec<_> = parts.iter().map(|part| Some(part.as_str())).collect();

            prop_assert!(is_valid(&generate(&parts)));
        }

        #[test]
        fn relation_identity_is_stable_under_shuffle(
            ids in prop::collection::vec("[a-z0-9]{1,8}", 1..6)
        ) {
            let mut ids = ids;
            let before = relation(
                RelationType::DataFlow,
                &ids,
                SourceType::Hive,
                &["sink".into()],
                SourceType::Hdfs,
            );
            ids.reverse();
            let after = relation(
                RelationType::DataFlow,
                &ids,
                SourceType::Hive,
                &["sink".into()],
                SourceType::Hdfs,
            );

            prop_assert_eq!(before, after);
        }
    }
}
