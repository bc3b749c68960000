use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const CAMERA_COUNT: usize = 4;

pub const CAMERA_LOCATIONS: [&str; 4] = [
    "north pasture",
    "feed station",
    "south draw",
    "equipment barn",
];

const ONLINE_PROBABILITY: f64 = 2.0 / 3.0;
const PREDATOR_PROBABILITY: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraReading {
    pub camera: String,
    pub status: CameraStatus,
    pub predator_detected: bool,
    pub location: String,
}

pub fn simulate_cameras<R: Rng + ?Sized>(rng: &mut R) -> Vec<CameraReading> {
    (1..=CAMERA_COUNT)
        .map(|number| {
            let status = if rng.gen_bool(ONLINE_PROBABILITY) {
                CameraStatus::Online
            } else {
                CameraStatus::Offline
            };
            let predator_detected = rng.gen_bool(PREDATOR_PROBABILITY);
            let location = CAMERA_LOCATIONS
                .choose(rng)
                .copied()
                .unwrap_or(CAMERA_LOCATIONS[0]);
            CameraReading {
                camera: format!("cam{number}"),
                status,
                predator_detected,
                location: location.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn one_record_per_camera() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..25 {
            let feed = simulate_cameras(&mut rng);
            let ids: Vec<_> = feed.iter().map(|c| c.camera.as_str()).collect();
            assert_eq!(ids, ["cam1", "cam2", "cam3", "cam4"]);
            assert!(feed
                .iter()
                .all(|c| CAMERA_LOCATIONS.contains(&c.location.as_str())));
        }
    }

    #[test]
    fn offline_is_the_minority() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let readings: Vec<_> = (0..500).flat_map(|_| simulate_cameras(&mut rng)).collect();
        let offline = readings
            .iter()
            .filter(|c| c.status == CameraStatus::Offline)
            .count();
        let predators = readings.iter().filter(|c| c.predator_detected).count();
        assert!(offline > 0 && offline < readings.len() / 2);
        assert!(predators > 0 && predators < readings.len() / 2);
    }
}
