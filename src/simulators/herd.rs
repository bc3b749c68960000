use rand::Rng;

use crate::ranch::Animal;

/// Maximum per-axis offset, in degrees, applied to a live herd view.
pub const JITTER_BOUND: f64 = 0.0008;

/// Copies the baseline with fresh noise on every position. The baseline is
/// only borrowed, so repeated calls never accumulate drift.
pub fn jitter_herd<R: Rng + ?Sized>(baseline: &[Animal], rng: &mut R) -> Vec<Animal> {
    baseline
        .iter()
        .map(|animal| {
            let mut view = animal.clone();
            view.lat += rng.gen_range(-JITTER_BOUND..=JITTER_BOUND);
            view.lon += rng.gen_range(-JITTER_BOUND..=JITTER_BOUND);
            view
        })
        .collect()
}
