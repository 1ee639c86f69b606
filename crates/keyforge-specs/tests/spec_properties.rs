//! Property-based tests for spec validity rules

use keyforge_specs::{DigestSpec, DigestType, KeyLength, KeySetSpec};
use proptest::prelude::*;

fn any_length() -> impl Strategy<Value = KeyLength> {
    prop::sample::select(KeyLength::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_keyset_validity_matches_the_predicate(
        length in any_length(),
        steps in any::<u8>(),
    ) {
        let spec = KeySetSpec::new(length, steps);
        let expected = (KeySetSpec::MIN_CIPHER_STEPS..=KeySetSpec::MAX_CIPHER_STEPS)
            .contains(&steps);
        prop_assert_eq!(spec.is_valid(), expected);
    }

    #[test]
    fn prop_keyset_equality_ignores_validity(
        length in any_length(),
        steps in any::<u8>(),
    ) {
        let spec = KeySetSpec::new(length, steps);
        let rebuilt = KeySetSpec::new(spec.key_length(), spec.cipher_steps());
        prop_assert_eq!(spec, rebuilt);
    }

    #[test]
    fn prop_length_ids_round_trip(length in any_length()) {
        prop_assert_eq!(KeyLength::from_id(length.id()), Ok(length));
    }

    #[test]
    fn prop_unregistered_ids_error(id in 6u8..) {
        prop_assert!(KeyLength::from_id(id).is_err());
    }

    #[test]
    fn prop_digest_spec_validity_follows_declared_lengths(
        digest_type in prop::sample::select(DigestType::ALL.to_vec()),
        length in any_length(),
    ) {
        let spec = DigestSpec::build(digest_type, None, length, false);
        prop_assert_eq!(spec.is_valid(), digest_type.supported_lengths().contains(&length));
    }

    #[test]
    fn prop_xof_is_shake_only(
        digest_type in prop::sample::select(DigestType::ALL.to_vec()),
        length in any_length(),
    ) {
        let spec = DigestSpec::build(digest_type, None, length, true);
        if spec.is_valid() {
            prop_assert_eq!(digest_type, DigestType::Shake);
        }
    }
}
