//! Seeded random generators owned by each environment instance

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build a generator from `seed`, drawing a fresh seed from entropy when
/// none is given. Returns the generator together with the seed it used so
/// callers can report or replay it.
#[must_use]
pub fn np_random(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}
