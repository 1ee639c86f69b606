//! Fuzz target for the keyset cipher cascade
//!
//! # Strategy
//!
//! - Arbitrary specs (valid and invalid step counts)
//! - Arbitrary plaintexts, master seeds, and nonce seeds
//! - Byte flips and truncations against fresh ciphertexts
//! - Arbitrary byte strings fed straight into decrypt
//!
//! # Invariants
//!
//! - Invalid specs are rejected at keyset construction, never later
//! - Encrypt then decrypt round-trips for every valid spec
//! - Any corrupted or truncated ciphertext fails as bad credentials
//! - Decrypting garbage never panics and never returns plaintext

#![no_main]

use arbitrary::Arbitrary;
use keyforge_crypto::CryptoFactory;
use keyforge_specs::{KeyLength, KeySetSpec};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[derive(Debug, Arbitrary)]
struct CipherScenario {
    length_id: u8,
    cipher_steps: u8,
    master_seed: u64,
    nonce_seed: u64,
    plaintext: Vec<u8>,
    corruption: Corruption,
}

#[derive(Debug, Arbitrary)]
enum Corruption {
    /// Flip one byte at the given offset
    Flip { offset: u16, mask: u8 },
    /// Keep only a prefix of the ciphertext
    Truncate { keep: u16 },
    /// Replace the ciphertext wholesale
    Garbage(Vec<u8>),
}

fuzz_target!(|scenario: CipherScenario| {
    let factory = CryptoFactory::with_rustcrypto(b"keyforge-fuzz");

    let length = KeyLength::from_id(scenario.length_id % 6).unwrap_or(KeyLength::Len256);
    let spec = KeySetSpec::new(length, scenario.cipher_steps);

    let mut master_rng = ChaCha20Rng::seed_from_u64(scenario.master_seed);
    let keyset = match factory.generate_keyset(spec, &mut master_rng) {
        Ok(keyset) => {
            // INVARIANT 1: construction succeeds exactly for valid specs
            assert!(spec.is_valid(), "invalid spec must not build a keyset");
            keyset
        },
        Err(err) => {
            assert!(!spec.is_valid(), "valid spec must build a keyset: {err}");
            return;
        },
    };

    // INVARIANT 2: round-trip
    let mut nonce_rng = ChaCha20Rng::seed_from_u64(scenario.nonce_seed);
    let ciphertext = match keyset.encrypt(&mut nonce_rng, &scenario.plaintext) {
        Ok(ciphertext) => ciphertext,
        Err(err) => unreachable!("encryption must not fail: {err}"),
    };
    match keyset.decrypt(&ciphertext) {
        Ok(decrypted) => assert_eq!(decrypted, scenario.plaintext),
        Err(err) => unreachable!("fresh ciphertext must decrypt: {err}"),
    }

    // INVARIANT 3: corruption is detected, never a panic or silent garbage
    let corrupted = match scenario.corruption {
        Corruption::Flip { offset, mask } => {
            let mut corrupted = ciphertext.clone();
            let target = offset as usize % corrupted.len();
            corrupted[target] ^= mask | 0x01;
            corrupted
        },
        Corruption::Truncate { keep } => {
            let keep = keep as usize % ciphertext.len();
            ciphertext[..keep].to_vec()
        },
        Corruption::Garbage(bytes) => bytes,
    };
    if corrupted != ciphertext {
        match keyset.decrypt(&corrupted) {
            Ok(decrypted) => {
                assert_eq!(decrypted, scenario.plaintext, "corruption must not alter plaintext");
            },
            Err(err) => assert!(err.is_bad_credentials(), "unexpected failure class: {err}"),
        }
    }
});
