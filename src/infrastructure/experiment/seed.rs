//! Deterministic seed derivation for experiment assignment
//!
//! Ensures the same identity always seeds the same random stream, on any
//! host and in any process.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

use crate::domain::DomainError;

/// Derive the seed for an identity
///
/// SHA-256 of the UTF-8 bytes, first 8 bytes read little-endian, bit pattern
/// reinterpreted as `i64`.
pub fn derive_seed(identity: &str) -> Result<i64, DomainError> {
    seed_from_digest(&identity_digest(identity))
}

/// Derive an independent seed for one experiment of an identity
///
/// The type is prefixed with its byte length (u64, little-endian), so no
/// split of the same bytes between type and identity can collide.
pub fn derive_experiment_seed(experiment_type: &str, identity: &str) -> Result<i64, DomainError> {
    let digest = Sha256::new()
        .chain_update((experiment_type.len() as u64).to_le_bytes())
        .chain_update(experiment_type.as_bytes())
        .chain_update(identity.as_bytes())
        .finalize();

    seed_from_digest(&digest)
}

/// Full SHA-256 digest of an identity
pub fn identity_digest(identity: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(identity.as_bytes()));
    out
}

/// Build the seeded generator for a seed
pub fn seeded_rng(seed: i64) -> StdRng {
    StdRng::seed_from_u64(seed as u64)
}

fn seed_from_digest(digest: &[u8]) -> Result<i64, DomainError> {
    let prefix: [u8; 8] = digest
        .get(..8)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            DomainError::internal(format!("digest too short: {} bytes", digest.len()))
        })?;

    Ok(u64::from_le_bytes(prefix) as i64)
}
