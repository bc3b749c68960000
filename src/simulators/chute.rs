use chrono::{DateTime, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::auth::USERS;
use crate::ranch::Animal;
use crate::rng::round_to;

pub const CHUTE_NOTES: [&str; 4] = [
    "Routine weight check",
    "Post-vaccine observation",
    "Health audit",
    "Hoof inspection",
];

const WEIGHT_DELTA_LB: i64 = 15;
const TEMPERATURE_DELTA_F: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChuteReading {
    pub id: String,
    pub weight: i64,
    pub temperature: f64,
    pub last_weighed: String,
    pub operator: String,
    pub note: String,
}

/// One-off weigh-station reading for a random animal, stamped with `now`.
/// Returns `None` when the herd is empty.
pub fn simulate_chute<R: Rng + ?Sized>(
    herd: &[Animal],
    rng: &mut R,
    now: DateTime<Utc>,
) -> Option<ChuteReading> {
    let animal = herd.choose(rng)?;
    let weight = i64::from(animal.weight) + rng.gen_range(-WEIGHT_DELTA_LB..=WEIGHT_DELTA_LB);
    let temperature = round_to(
        animal.temperature + rng.gen_range(-TEMPERATURE_DELTA_F..=TEMPERATURE_DELTA_F),
        1,
    );
    let operator = USERS.choose(rng).copied().unwrap_or(USERS[0]);
    let note = CHUTE_NOTES.choose(rng).copied().unwrap_or(CHUTE_NOTES[0]);
    Some(ChuteReading {
        id: animal.id.clone(),
        weight,
        temperature,
        last_weighed: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        operator: operator.to_string(),
        note: note.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::ranch::generate_herd;

    #[test]
    fn reading_stays_near_baseline() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let herd = generate_herd(&mut rng);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        for _ in 0..50 {
            let reading = simulate_chute(&herd, &mut rng, now).expect("herd not empty");
            let animal = herd.iter().find(|a| a.id == reading.id).expect("known animal");
            assert!((reading.weight - i64::from(animal.weight)).abs() <= WEIGHT_DELTA_LB);
            assert!((reading.temperature - animal.temperature).abs() <= 0.5);
            assert!(USERS.contains(&reading.operator.as_str()));
            assert!(CHUTE_NOTES.contains(&reading.note.as_str()));
            assert_eq!(reading.last_weighed, "2024-05-01T12:00:00.000000Z");
        }
    }

    #[test]
    fn empty_herd_yields_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(simulate_chute(&[], &mut rng, Utc::now()).is_none());
    }
}
