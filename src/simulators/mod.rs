//! Per-request simulators. Each one is a plain function over the ranch
//! baseline and an injected random source.

mod cameras;
mod chute;
mod gates;
mod herd;
mod sensors;

pub use cameras::{simulate_cameras, CameraReading, CameraStatus, CAMERA_COUNT, CAMERA_LOCATIONS};
pub use chute::{simulate_chute, ChuteReading, CHUTE_NOTES};
pub use gates::toggle_random_gate;
pub use herd::{jitter_herd, JITTER_BOUND};
pub use sensors::{
    evaluate_sensors, simulate_sensors, SensorDraw, SensorReport, SensorStatus, SensorValue,
    TrafficLight,
};
