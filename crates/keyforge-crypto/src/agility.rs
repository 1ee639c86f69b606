//! Algorithm-agile digest selection.
//!
//! Secret-derived keys do not hard-code their digests: the digests are
//! drawn from a seeded random source, so two derivations with the same
//! secret but different seeds select different digest algorithms. A
//! weakness in one digest family therefore never universally compromises
//! all derived keys.

use keyforge_specs::{DigestSpec, DigestType};
use rand::{CryptoRng, Rng, RngCore};

use crate::{
    error::{CryptoError, Result},
    provider::DigestProvider,
};

/// Draw `count` digest specs of distinct families from the seeded source.
///
/// Only HMAC-capable specs are candidates (the HKDF engine needs them).
/// Deterministic: the same provider and seed sequence always yield the
/// same picks, which is what makes secret-derived keys regenerable.
pub fn derive_digest_specs<R>(
    provider: &dyn DigestProvider,
    rng: &mut R,
    count: usize,
) -> Result<Vec<DigestSpec>>
where
    R: RngCore + CryptoRng,
{
    // One bucket of capable specs per family, in fixed catalog order so
    // the draw depends only on the seed.
    let mut buckets: Vec<Vec<DigestSpec>> = Vec::new();
    for digest_type in DigestType::ALL {
        let capable: Vec<DigestSpec> = digest_type
            .supported_lengths()
            .iter()
            .map(|&length| DigestSpec::build(digest_type, None, length, false))
            .filter(|spec| provider.supports_hmac(spec))
            .collect();
        if !capable.is_empty() {
            buckets.push(capable);
        }
    }

    if buckets.len() < count {
        return Err(CryptoError::provider(format!(
            "need {count} distinct digest families, provider offers {}",
            buckets.len()
        )));
    }

    // Partial Fisher-Yates over the family buckets, then a random length
    // within each chosen family.
    let mut picks = Vec::with_capacity(count);
    for slot in 0..count {
        let chosen = rng.gen_range(slot..buckets.len());
        buckets.swap(slot, chosen);
        let bucket = &buckets[slot];
        picks.push(bucket[rng.gen_range(0..bucket.len())]);
    }
    Ok(picks)
}
