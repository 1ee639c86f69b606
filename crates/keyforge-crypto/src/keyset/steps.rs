//! Step planning: which algorithms run, in what order, with which keys.
//!
//! Both the per-slot algorithms and their order are derived from the
//! master material itself via labelled HKDF expansions. The plan is
//! deterministic for a given keyset, and unknowable without the master
//! material.

use keyforge_specs::{DigestSpec, KeyLength, KeyType, SymKeyType};

use crate::{
    error::Result,
    hkdf::{HkdfEngine, HkdfParams},
    keyset::KeySet,
    secret::SecretBytes,
};

/// Label for the algorithm-schedule expansion.
const SCHEDULE_LABEL: &[u8] = b"keyset.schedule.v1";

/// Label prefix for per-slot key expansions.
const STEP_KEY_LABEL: &[u8] = b"keyset.step.v1";

/// Algorithm families a cascade slot may use.
const CANDIDATES: [SymKeyType; 4] =
    [SymKeyType::Aes128, SymKeyType::Aes192, SymKeyType::Aes256, SymKeyType::ChaCha20];

/// One planned cascade slot: the family plus its independent key.
pub(crate) struct PlannedStep {
    pub(crate) key_type: SymKeyType,
    pub(crate) key: SecretBytes,
}

/// Derive the full cascade plan for a keyset.
///
/// Slot `i` gets algorithm `schedule[i]` and a key expanded under a label
/// naming both the slot and the algorithm, so no two slots (and no two
/// algorithms in the same slot across schedule changes) ever share key
/// material.
pub(crate) fn plan_steps(keyset: &KeySet) -> Result<Vec<PlannedStep>> {
    let count = keyset.spec().cipher_steps() as usize;
    let engine = internal_engine(keyset)?;

    let schedule = derive_schedule(&engine, keyset, count)?;

    let mut steps = Vec::with_capacity(count);
    for (slot, &key_type) in schedule.iter().enumerate() {
        let key = derive_step_key(&engine, keyset, slot, key_type)?;
        steps.push(PlannedStep { key_type, key });
    }
    Ok(steps)
}

/// Fixed digests for internal keyset expansions.
///
/// The keyset's agility lives in the step-algorithm schedule; the schedule
/// derivation itself needs a stable digest pair so existing keysets keep
/// decrypting across releases.
fn internal_engine(keyset: &KeySet) -> Result<HkdfEngine<'_>> {
    HkdfEngine::new(
        DigestSpec::sha2(KeyLength::Len512),
        DigestSpec::sha2(KeyLength::Len256),
        keyset.digest_provider(),
    )
}

/// One schedule byte per slot selects that slot's algorithm family.
fn derive_schedule(
    engine: &HkdfEngine<'_>,
    keyset: &KeySet,
    count: usize,
) -> Result<Vec<SymKeyType>> {
    let mut params = HkdfParams::expand_only(keyset.master().as_slice(), count)?
        .with_info(SCHEDULE_LABEL)
        .with_info(&[keyset.spec().cipher_steps()]);
    let bytes = engine.derive(&params);
    params.clear();
    let bytes = bytes?;

    let schedule = bytes
        .as_slice()
        .iter()
        .map(|&byte| CANDIDATES[byte as usize % CANDIDATES.len()])
        .collect();
    Ok(schedule)
}

/// Expand the slot's key at the algorithm's native key size.
fn derive_step_key(
    engine: &HkdfEngine<'_>,
    keyset: &KeySet,
    slot: usize,
    key_type: SymKeyType,
) -> Result<SecretBytes> {
    let key_len = key_type.key_length().bytes();
    let mut params = HkdfParams::expand_only(keyset.master().as_slice(), key_len)?
        .with_info(STEP_KEY_LABEL)
        .with_info(&[slot as u8])
        .with_info(key_type.algorithm_name().as_bytes());
    let key = engine.derive(&params);
    params.clear();
    key
}
