//! Fuzz target for HKDF parameter handling
//!
//! # Strategy
//!
//! - Arbitrary mode selection with arbitrary PRKs and lengths
//! - Arbitrary IKM/salt/info lists, including empty entries
//! - Oversized length requests
//!
//! # Invariants
//!
//! - The engine never panics; misuse fails as a data error
//! - Derivation is deterministic
//! - Outputs are exactly the requested length
//! - clear() leaves no residual material

#![no_main]

use arbitrary::Arbitrary;
use keyforge_crypto::{HkdfEngine, HkdfMode, HkdfParams, RustCryptoProvider};
use keyforge_specs::{DigestSpec, KeyLength};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DeriveScenario {
    mode: ModeChoice,
    prk: Vec<u8>,
    length: u16,
    ikms: Vec<Vec<u8>>,
    salts: Vec<Vec<u8>>,
    infos: Vec<Vec<u8>>,
    sha3_expand: bool,
}

#[derive(Debug, Arbitrary)]
enum ModeChoice {
    Extract,
    Expand,
    ExtractThenExpand,
}

fuzz_target!(|scenario: DeriveScenario| {
    let provider = RustCryptoProvider::new();
    let expand = if scenario.sha3_expand {
        DigestSpec::sha3(KeyLength::Len256)
    } else {
        DigestSpec::sha2(KeyLength::Len512)
    };
    let engine = match HkdfEngine::new(DigestSpec::sha2(KeyLength::Len256), expand, &provider) {
        Ok(engine) => engine,
        Err(err) => unreachable!("engine construction must succeed: {err}"),
    };

    let length = scenario.length as usize;
    let built = match scenario.mode {
        ModeChoice::Extract => Ok(HkdfParams::extract_only()),
        ModeChoice::Expand => HkdfParams::expand_only(&scenario.prk, length),
        ModeChoice::ExtractThenExpand => HkdfParams::extract_then_expand(length),
    };

    let mut params = match built {
        Ok(params) => params,
        Err(err) => {
            // INVARIANT 1: constructor failures are data errors only
            assert!(err.is_data(), "unexpected failure class: {err}");
            return;
        },
    };
    for ikm in &scenario.ikms {
        params = params.with_ikm(ikm);
    }
    for salt in &scenario.salts {
        params = params.with_salt(salt);
    }
    for info in &scenario.infos {
        params = params.with_info(info);
    }

    match (engine.derive(&params), engine.derive(&params)) {
        (Ok(first), Ok(second)) => {
            // INVARIANT 2: determinism
            assert_eq!(first.as_slice(), second.as_slice());

            // INVARIANT 3: length contract
            match params.mode() {
                HkdfMode::Extract => assert_eq!(first.len(), 32),
                HkdfMode::Expand | HkdfMode::ExtractThenExpand => assert_eq!(first.len(), length),
            }
        },
        (Err(err), Err(_)) => {
            // Oversized expands are the only in-contract failure here
            assert!(err.is_data(), "unexpected failure class: {err}");
        },
        (Ok(_), Err(err)) | (Err(err), Ok(_)) => {
            unreachable!("derivation must be repeatable: {err}");
        },
    }

    // INVARIANT 4: clearing removes everything
    params.clear();
    assert!(params.ikms().is_empty());
    assert!(params.salts().is_empty());
    assert!(params.infos().is_empty());
    assert!(params.prk().is_none());
});
