use rand::Rng;

use crate::ranch::Gate;

/// Flips one gate chosen uniformly at random and returns its index.
/// Returns `None` only for an empty collection.
pub fn toggle_random_gate<R: Rng + ?Sized>(gates: &mut [Gate], rng: &mut R) -> Option<usize> {
    if gates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..gates.len());
    let gate = &mut gates[index];
    gate.status = gate.status.toggled();
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::ranch::initial_gates;

    #[test]
    fn exactly_one_gate_flips() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut gates = initial_gates();
        for _ in 0..20 {
            let before = gates.clone();
            let flipped = toggle_random_gate(&mut gates, &mut rng).expect("gates present");
            let changed: Vec<_> = before
                .iter()
                .zip(&gates)
                .enumerate()
                .filter(|(_, (a, b))| a.status != b.status)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(changed, vec![flipped]);
            assert_eq!(gates.len(), 3);
        }
    }

    #[test]
    fn empty_collection_is_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(toggle_random_gate(&mut [], &mut rng), None);
    }
}
