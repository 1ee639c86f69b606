//! Property-based tests for the generalized HKDF engine
//!
//! Invariants:
//!
//! 1. **Determinism**: same inputs always produce same output
//! 2. **Concatenation**: split inputs derive identically to joined inputs
//! 3. **Length contract**: the output is exactly the requested size
//! 4. **Clearing**: cleared params report no residual material

use keyforge_crypto::{HkdfEngine, HkdfParams, RustCryptoProvider};
use keyforge_specs::{DigestSpec, KeyLength};
use proptest::prelude::*;

const PROVIDER: RustCryptoProvider = RustCryptoProvider;

fn engine(expand: DigestSpec) -> HkdfEngine<'static> {
    HkdfEngine::new(DigestSpec::sha2(KeyLength::Len512), expand, &PROVIDER).unwrap()
}

fn any_expand_digest() -> impl Strategy<Value = DigestSpec> {
    prop::sample::select(vec![
        DigestSpec::sha2(KeyLength::Len256),
        DigestSpec::sha2(KeyLength::Len512),
        DigestSpec::sha3(KeyLength::Len256),
        DigestSpec::sha3(KeyLength::Len512),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_derivation_is_deterministic(
        ikm in prop::collection::vec(any::<u8>(), 1..100),
        salt in prop::collection::vec(any::<u8>(), 0..50),
        info in prop::collection::vec(any::<u8>(), 0..50),
        length in 1usize..200,
        digest in any_expand_digest(),
    ) {
        let engine = engine(digest);
        let derive = || {
            let mut params = HkdfParams::extract_then_expand(length)
                .unwrap()
                .with_ikm(&ikm)
                .with_salt(&salt)
                .with_info(&info);
            let out = engine.derive(&params).unwrap();
            params.clear();
            out
        };

        let first = derive();
        let second = derive();
        prop_assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn prop_output_is_exactly_the_requested_length(
        ikm in prop::collection::vec(any::<u8>(), 1..100),
        length in 1usize..500,
        digest in any_expand_digest(),
    ) {
        let engine = engine(digest);
        let mut params = HkdfParams::extract_then_expand(length).unwrap().with_ikm(&ikm);
        let out = engine.derive(&params).unwrap();
        params.clear();

        prop_assert_eq!(out.len(), length);
    }

    #[test]
    fn prop_split_ikm_matches_joined(
        ikm in prop::collection::vec(any::<u8>(), 2..100),
        split in any::<prop::sample::Index>(),
        digest in any_expand_digest(),
    ) {
        let engine = engine(digest);
        let at = 1 + split.index(ikm.len() - 1);

        let mut joined = HkdfParams::extract_then_expand(32).unwrap().with_ikm(&ikm);
        let expected = engine.derive(&joined).unwrap();
        joined.clear();

        let mut split_params = HkdfParams::extract_then_expand(32)
            .unwrap()
            .with_ikm(&ikm[..at])
            .with_ikm(&ikm[at..]);
        let actual = engine.derive(&split_params).unwrap();
        split_params.clear();

        prop_assert_eq!(actual.as_slice(), expected.as_slice());
    }

    #[test]
    fn prop_clear_removes_all_material(
        ikm in prop::collection::vec(any::<u8>(), 1..50),
        salt in prop::collection::vec(any::<u8>(), 1..50),
        info in prop::collection::vec(any::<u8>(), 1..50),
    ) {
        let mut params = HkdfParams::extract_then_expand(32)
            .unwrap()
            .with_ikm(&ikm)
            .with_salt(&salt)
            .with_info(&info);
        params.clear();

        prop_assert!(params.ikms().is_empty());
        prop_assert!(params.salts().is_empty());
        prop_assert!(params.infos().is_empty());
        prop_assert!(params.prk().is_none());
    }

    #[test]
    fn prop_distinct_secrets_diverge(
        ikm_a in prop::collection::vec(any::<u8>(), 1..50),
        ikm_b in prop::collection::vec(any::<u8>(), 1..50),
    ) {
        prop_assume!(ikm_a != ikm_b);
        let engine = engine(DigestSpec::sha2(KeyLength::Len256));

        let mut params_a = HkdfParams::extract_then_expand(32).unwrap().with_ikm(&ikm_a);
        let mut params_b = HkdfParams::extract_then_expand(32).unwrap().with_ikm(&ikm_b);
        let out_a = engine.derive(&params_a).unwrap();
        let out_b = engine.derive(&params_b).unwrap();
        params_a.clear();
        params_b.clear();

        prop_assert_ne!(out_a.as_slice(), out_b.as_slice());
    }
}
