use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rng::{round_to, streams, RngManager};

pub const CATTLE_COUNT: usize = 50;
pub const STRAY_COUNT: usize = 5;
pub const CLUSTER_RADIUS: f64 = 0.01;
pub const STRAY_RADIUS: f64 = 0.05;

pub const RANCH_CENTER: GeoPoint = GeoPoint {
    lat: 36.7783,
    lon: -119.4179,
};

const WEIGHT_RANGE_LB: std::ops::RangeInclusive<u32> = 900..=1200;
const TEMPERATURE_RANGE_F: std::ops::RangeInclusive<f64> = 100.0..=102.5;

const VACCINATIONS: [(&str, &str); 2] = [
    ("Bovine Respiratory", "2023-11-14"),
    ("Blackleg", "2024-03-03"),
];

/// Offsets from the ranch center, as (lon, lat), tracing the pasture fence.
const FENCE_OFFSETS: [(f64, f64); 5] = [
    (-0.04, -0.03),
    (0.045, -0.025),
    (0.05, 0.028),
    (-0.035, 0.035),
    (-0.04, -0.03),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lon: self.lon + d_lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccination {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub weight: u32,
    pub temperature: f64,
    pub vaccines: Vec<Vaccination>,
    pub lat: f64,
    pub lon: f64,
}

impl Animal {
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    Open,
    Closed,
}

impl GateStatus {
    pub fn toggled(self) -> Self {
        match self {
            GateStatus::Open => GateStatus::Closed,
            GateStatus::Closed => GateStatus::Open,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GateStatus::Open => "open",
            GateStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: String,
    pub status: GateStatus,
    pub lat: f64,
    pub lon: f64,
}

impl Gate {
    fn at(id: &str, status: GateStatus, position: GeoPoint) -> Self {
        Self {
            id: id.to_string(),
            status,
            lat: position.lat,
            lon: position.lon,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == GateStatus::Open
    }
}

/// Builds the baseline roster. The first `CATTLE_COUNT - STRAY_COUNT` animals
/// sit within `CLUSTER_RADIUS` of the center; the trailing ones are strays.
pub fn generate_herd<R: Rng + ?Sized>(rng: &mut R) -> Vec<Animal> {
    (0..CATTLE_COUNT)
        .map(|index| {
            let number = index + 1;
            let weight = rng.gen_range(WEIGHT_RANGE_LB);
            let temperature = round_to(rng.gen_range(TEMPERATURE_RANGE_F), 1);
            let radius = if is_stray(index) {
                STRAY_RADIUS
            } else {
                CLUSTER_RADIUS
            };
            let d_lat = rng.gen_range(-radius..=radius);
            let d_lon = rng.gen_range(-radius..=radius);
            let position = RANCH_CENTER.offset(d_lat, d_lon);
            Animal {
                id: format!("3S-{number:03}"),
                name: format!("Cow {number}"),
                weight,
                temperature,
                vaccines: VACCINATIONS
                    .iter()
                    .map(|(name, date)| Vaccination {
                        name: name.to_string(),
                        date: date.to_string(),
                    })
                    .collect(),
                lat: position.lat,
                lon: position.lon,
            }
        })
        .collect()
}

pub fn is_stray(index: usize) -> bool {
    index >= CATTLE_COUNT - STRAY_COUNT
}

pub fn initial_gates() -> Vec<Gate> {
    vec![
        Gate::at(
            "North Gate",
            GateStatus::Closed,
            RANCH_CENTER.offset(0.015, -0.008),
        ),
        Gate::at(
            "South Gate",
            GateStatus::Open,
            RANCH_CENTER.offset(-0.02, 0.01),
        ),
        Gate::at(
            "West Gate",
            GateStatus::Closed,
            RANCH_CENTER.offset(0.005, -0.025),
        ),
    ]
}

/// Fence ring as `[lon, lat]` pairs, the order map layers expect.
pub fn fence_polygon() -> Vec<[f64; 2]> {
    FENCE_OFFSETS
        .iter()
        .map(|(d_lon, d_lat)| [RANCH_CENTER.lon + d_lon, RANCH_CENTER.lat + d_lat])
        .collect()
}

/// Baseline ranch layout: the herd never changes after construction, gate
/// status is flipped by the gate simulator.
#[derive(Debug, Clone)]
pub struct Ranch {
    pub(crate) herd: Vec<Animal>,
    pub(crate) gates: Vec<Gate>,
}

impl Ranch {
    pub fn generate(rng: &mut RngManager) -> Self {
        let herd = generate_herd(rng.stream(streams::HERD));
        Self {
            herd,
            gates: initial_gates(),
        }
    }

    pub fn herd(&self) -> &[Animal] {
        &self.herd
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gates_mut(&mut self) -> &mut [Gate] {
        &mut self.gates
    }

    pub fn any_gate_open(&self) -> bool {
        self.gates.iter().any(Gate::is_open)
    }
}
