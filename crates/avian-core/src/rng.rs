use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive a sub-RNG for a named stream, ensuring independent sequences.
pub fn derive_rng(base_seed: u64, stream: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(
        base_seed.wrapping_add(stream.wrapping_mul(crate::constants::RNG_DERIVATION_PRIME)),
    )
}
