use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::{
    ranch::{Animal, Gate, Ranch},
    rng::{streams, RngManager},
    simulators::{
        jitter_herd, simulate_cameras, simulate_chute, simulate_sensors, toggle_random_gate,
        CameraReading, ChuteReading, SensorReport,
    },
};

/// Process-wide ranch state handed to every request handler.
///
/// Locks are always taken ranch first, then rng, and never held across an
/// await point.
pub struct RanchState {
    ranch: Mutex<Ranch>,
    rng: Mutex<RngManager>,
}

impl RanchState {
    pub fn new(seed: u64) -> Self {
        let mut rng = RngManager::new(seed);
        let ranch = Ranch::generate(&mut rng);
        Self {
            ranch: Mutex::new(ranch),
            rng: Mutex::new(rng),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.lock().seed()
    }

    pub fn baseline_herd(&self) -> Vec<Animal> {
        self.ranch.lock().herd().to_vec()
    }

    /// Current gate collection, without simulating activity.
    pub fn gates(&self) -> Vec<Gate> {
        self.ranch.lock().gates().to_vec()
    }

    pub fn herd_view(&self) -> Vec<Animal> {
        let ranch = self.ranch.lock();
        let mut rng = self.rng.lock();
        jitter_herd(ranch.herd(), rng.stream(streams::JITTER))
    }

    /// Flips one random gate and returns the collection afterwards.
    ///
    /// This mutates shared state: repeated polling drifts gate status, which
    /// also feeds the gate sensor on later `sensors` calls.
    pub fn poll_gates(&self) -> Vec<Gate> {
        let mut ranch = self.ranch.lock();
        let mut rng = self.rng.lock();
        if let Some(index) = toggle_random_gate(ranch.gates_mut(), rng.stream(streams::GATES))
        {
            let gate = &ranch.gates()[index];
            tracing::debug!(gate = %gate.id, status = gate.status.as_str(), "gate toggled");
        }
        ranch.gates().to_vec()
    }

    pub fn sensors(&self) -> SensorReport {
        let gate_open = self.ranch.lock().any_gate_open();
        let mut rng = self.rng.lock();
        simulate_sensors(rng.stream(streams::SENSORS), gate_open)
    }

    pub fn chute(&self, now: DateTime<Utc>) -> Option<ChuteReading> {
        let ranch = self.ranch.lock();
        let mut rng = self.rng.lock();
        simulate_chute(ranch.herd(), rng.stream(streams::CHUTE), now)
    }

    pub fn cameras(&self) -> Vec<CameraReading> {
        let mut rng = self.rng.lock();
        simulate_cameras(rng.stream(streams::CAMERAS))
    }
}
