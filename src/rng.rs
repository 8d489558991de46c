//! Identifier-seeded randomness
//!
//! The same identifier always produces the same generator, on every
//! platform, so a given track is always warped the same way.

use rand::rngs::StdRng;
use rand::SeedableRng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash of the identifier's UTF-8 bytes
pub fn seed_for(identifier: &str) -> u64 {
    identifier.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Generator seeded from the identifier
pub fn rng_for(identifier: &str) -> StdRng {
    StdRng::seed_from_u64(seed_for(identifier))
}
