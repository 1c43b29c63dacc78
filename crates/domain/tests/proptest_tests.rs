//! Property-based tests for identifier normalization and value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{EntityId, IdentityFields, IdentityNormalizer, MessageType, RoleCategory, Tone};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[a-f0-9]{1,24}"
}

// ============================================================================
// IdentityNormalizer Property Tests
// ============================================================================

mod identity_tests {
    use super::*;

    proptest! {
        #[test]
        fn equal_fields_resolve_identically(id in identifier()) {
            let both = IdentityFields::both(id.clone());
            let primary = IdentityFields::primary(id.clone());
            let alias = IdentityFields::alias(id.clone());

            let resolved = IdentityNormalizer::resolve(&both);
            prop_assert_eq!(resolved.as_ref().map(EntityId::as_str), Some(id.as_str()));
            prop_assert_eq!(&resolved, &IdentityNormalizer::resolve(&primary));
            prop_assert_eq!(&resolved, &IdentityNormalizer::resolve(&alias));
        }

        #[test]
        fn equal_fields_match_identically(id in identifier(), other in identifier()) {
            let both = IdentityFields::both(id.clone());
            let primary = IdentityFields::primary(id.clone());
            let alias = IdentityFields::alias(id);

            let expected = IdentityNormalizer::matches(&both, &other);
            prop_assert_eq!(expected, IdentityNormalizer::matches(&primary, &other));
            prop_assert_eq!(expected, IdentityNormalizer::matches(&alias, &other));
        }

        #[test]
        fn either_field_matches(primary in identifier(), alias in identifier()) {
            let fields = IdentityFields {
                primary: Some(primary.clone()),
                alias: Some(alias.clone()),
            };
            prop_assert!(IdentityNormalizer::matches(&fields, &primary));
            prop_assert!(IdentityNormalizer::matches(&fields, &alias));
            prop_assert_eq!(
                IdentityNormalizer::resolve(&fields).map(EntityId::into_inner),
                Some(primary)
            );
        }

        #[test]
        fn spellings_resolve_to_each_other(id in identifier()) {
            let from_store = IdentityFields::primary(id.clone());
            let from_api = IdentityFields::alias(id);
            let store_id = IdentityNormalizer::resolve(&from_store).unwrap();
            let api_id = IdentityNormalizer::resolve(&from_api).unwrap();
            prop_assert!(IdentityNormalizer::matches(&from_api, store_id.as_str()));
            prop_assert!(IdentityNormalizer::matches(&from_store, api_id.as_str()));
        }

        #[test]
        fn wire_roundtrip_preserves_matching(id in identifier()) {
            let json = format!(r#"{{"id": "{id}"}}"#);
            let fields: IdentityFields = serde_json::from_str(&json).unwrap();
            prop_assert!(IdentityNormalizer::matches(&fields, &id));
        }
    }
}

// ============================================================================
// EntityId Property Tests
// ============================================================================

mod entity_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn surrounding_whitespace_is_ignored(id in identifier(), pad in " {0,3}") {
            let padded = format!("{pad}{id}{pad}");
            let parsed = EntityId::new(padded).unwrap();
            prop_assert_eq!(parsed.as_str(), id.as_str());
        }

        #[test]
        fn blank_is_rejected(blank in " {0,8}") {
            prop_assert!(EntityId::new(blank).is_err());
        }
    }
}

// ============================================================================
// Enumeration Property Tests
// ============================================================================

mod enum_tests {
    use super::*;

    proptest! {
        #[test]
        fn role_category_display_parses_back(index in 0usize..6) {
            let category = RoleCategory::ALL[index];
            prop_assert_eq!(category.to_string().parse::<RoleCategory>().unwrap(), category);
        }

        #[test]
        fn tone_parse_is_case_insensitive(tone in prop_oneof![
            Just(Tone::Professional),
            Just(Tone::Technical),
            Just(Tone::Formal),
        ]) {
            prop_assert_eq!(tone.as_str().to_uppercase().parse::<Tone>().unwrap(), tone);
        }

        #[test]
        fn message_type_wire_value_parses_back(kind in prop_oneof![
            Just(MessageType::Email),
            Just(MessageType::NetworkingNote),
        ]) {
            prop_assert_eq!(kind.as_str().parse::<MessageType>().unwrap(), kind);
        }
    }
}
