//! Catch mechanic
//!
//! A throw rolls a number below the creature's base experience and succeeds
//! when the roll lands under [`CATCH_THRESHOLD`].

use rand::Rng;

/// Rolls below this value catch the target.
pub const CATCH_THRESHOLD: u32 = 40;

/// Probability in `[0, 1]` that one throw catches a creature.
pub fn catch_chance(base_experience: Option<u32>) -> f64 {
    let ceiling = roll_ceiling(base_experience);
    (CATCH_THRESHOLD.min(ceiling) as f64) / ceiling as f64
}

/// Throws one ball. Returns true if the creature was caught.
pub fn attempt_catch<R: Rng>(rng: &mut R, base_experience: Option<u32>) -> bool {
    rng.gen_range(0..roll_ceiling(base_experience)) < CATCH_THRESHOLD
}

// Missing experience counts as the easiest possible catch
fn roll_ceiling(base_experience: Option<u32>) -> u32 {
    base_experience.unwrap_or(0).max(1)
}
