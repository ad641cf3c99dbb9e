use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG factory for a given (`seed`, `game_id`, `turn`) triple.
///
/// - Derives a per-turn 64-bit seed by mixing the three inputs.
/// - Uses the PCG 64-bit generator (`rand_pcg::Pcg64`) for reproducible sequences.
#[inline]
#[must_use]
pub fn rng_for_game(seed: u64, game_id: u64, turn: u8) -> impl Rng {
    let derived: u64 = seed
        ^ game_id.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ ((u64::from(turn) << 56) | u64::from(turn));
    Pcg64::seed_from_u64(derived)
}
