use rand::Rng;
use serde::Serialize;

use crate::rng::round_to;

pub const WATER_HEALTHY_ABOVE: f64 = 70.0;
pub const FENCE_HEALTHY_FROM_KV: f64 = 7.5;
pub const NETWORK_HEALTHY_FROM_BARS: u8 = 4;

/// Three-level health indicator. Serialized as the dashboard's colour names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrafficLight {
    #[serde(rename = "green")]
    Healthy,
    #[serde(rename = "yellow")]
    Caution,
    #[serde(rename = "red")]
    Alert,
}

impl TrafficLight {
    pub fn is_healthy(self) -> bool {
        self == TrafficLight::Healthy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Text(String),
    Bars(u8),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatus {
    pub status: TrafficLight,
    pub value: SensorValue,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReport {
    #[serde(rename = "WATER")]
    pub water: SensorStatus,
    #[serde(rename = "FENCE")]
    pub fence: SensorStatus,
    #[serde(rename = "GATE")]
    pub gate: SensorStatus,
    #[serde(rename = "NETWORK")]
    pub network: SensorStatus,
    #[serde(rename = "SYSTEM")]
    pub system: SensorStatus,
}

/// Raw measurements behind one sensor report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorDraw {
    pub water_level: f64,
    pub fence_voltage: f64,
    pub network_bars: u8,
    pub gate_open: bool,
}

impl SensorDraw {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, gate_open: bool) -> Self {
        Self {
            water_level: round_to(rng.gen_range(65.0..=100.0), 1),
            fence_voltage: round_to(rng.gen_range(6.5..=9.5), 2),
            network_bars: rng.gen_range(3..=5),
            gate_open,
        }
    }
}

pub fn simulate_sensors<R: Rng + ?Sized>(rng: &mut R, gate_open: bool) -> SensorReport {
    evaluate_sensors(SensorDraw::sample(rng, gate_open))
}

pub fn evaluate_sensors(draw: SensorDraw) -> SensorReport {
    let water = water_sensor(draw.water_level);
    let fence = fence_sensor(draw.fence_voltage);
    let gate = gate_sensor(draw.gate_open);
    let network = network_sensor(draw.network_bars);

    let nominal = [&water, &fence, &gate, &network]
        .iter()
        .all(|sensor| sensor.status.is_healthy());
    let system = if nominal {
        SensorStatus {
            status: TrafficLight::Healthy,
            value: SensorValue::Text("nominal".into()),
            detail: "Automation, analytics, and failsafes nominal across the ranch stack.".into(),
        }
    } else {
        SensorStatus {
            status: TrafficLight::Caution,
            value: SensorValue::Text("attention".into()),
            detail: "System automation engaged with advisories from sub-systems.".into(),
        }
    };

    SensorReport {
        water,
        fence,
        gate,
        network,
        system,
    }
}

/// Shortest form of a rounded reading, keeping one decimal on whole values.
fn reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn water_sensor(level: f64) -> SensorStatus {
    let healthy = level > WATER_HEALTHY_ABOVE;
    let level = reading(level);
    if healthy {
        SensorStatus {
            status: TrafficLight::Healthy,
            value: SensorValue::Text(format!("{level}%")),
            detail: format!(
                "Average trough level across 12 monitors is {level}% with auto-fill holding."
            ),
        }
    } else {
        SensorStatus {
            status: TrafficLight::Caution,
            value: SensorValue::Text(format!("{level}%")),
            detail: format!("Refill recommended: trough level dipping to {level}% across the line."),
        }
    }
}

fn fence_sensor(voltage: f64) -> SensorStatus {
    let healthy = voltage >= FENCE_HEALTHY_FROM_KV;
    let voltage = reading(voltage);
    if healthy {
        SensorStatus {
            status: TrafficLight::Healthy,
            value: SensorValue::Text(format!("{voltage} kV")),
            detail: format!("Perimeter voltage steady at {voltage} kV; arcs synced."),
        }
    } else {
        SensorStatus {
            status: TrafficLight::Alert,
            value: SensorValue::Text(format!("{voltage} kV")),
            detail: format!(
                "Voltage dip detected: {voltage} kV average across perimeter nodes."
            ),
        }
    }
}

fn gate_sensor(any_open: bool) -> SensorStatus {
    if any_open {
        SensorStatus {
            status: TrafficLight::Caution,
            value: SensorValue::Text("open".into()),
            detail: "One or more perimeter gates currently unlocked for ranch movement.".into(),
        }
    } else {
        SensorStatus {
            status: TrafficLight::Healthy,
            value: SensorValue::Text("closed".into()),
            detail: "All perimeter gates secured with remote actuators in standby.".into(),
        }
    }
}

fn network_sensor(bars: u8) -> SensorStatus {
    let status = if bars >= NETWORK_HEALTHY_FROM_BARS {
        TrafficLight::Healthy
    } else {
        TrafficLight::Caution
    };
    SensorStatus {
        status,
        value: SensorValue::Bars(bars),
        detail: format!("Uplink strength reading {bars}/5 bars with LTE failover primed."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(water_level: f64, fence_voltage: f64, network_bars: u8, gate_open: bool) -> SensorDraw {
        SensorDraw {
            water_level,
            fence_voltage,
            network_bars,
            gate_open,
        }
    }

    #[test]
    fn all_healthy_is_nominal() {
        let report = evaluate_sensors(draw(85.0, 8.2, 5, false));
        assert_eq!(report.system.status, TrafficLight::Healthy);
        assert_eq!(report.system.value, SensorValue::Text("nominal".into()));
        assert_eq!(report.gate.value, SensorValue::Text("closed".into()));
    }

    #[test]
    fn water_threshold_is_strict() {
        let report = evaluate_sensors(draw(70.0, 8.0, 5, false));
        assert_eq!(report.water.status, TrafficLight::Caution);
        assert_eq!(report.system.status, TrafficLight::Caution);
        assert_eq!(report.system.value, SensorValue::Text("attention".into()));

        let report = evaluate_sensors(draw(70.1, 8.0, 5, false));
        assert_eq!(report.water.status, TrafficLight::Healthy);
    }

    #[test]
    fn fence_threshold_is_inclusive_and_alerts() {
        assert_eq!(
            evaluate_sensors(draw(90.0, 7.5, 5, false)).fence.status,
            TrafficLight::Healthy
        );
        let low = evaluate_sensors(draw(90.0, 7.49, 5, false));
        assert_eq!(low.fence.status, TrafficLight::Alert);
        assert_eq!(low.fence.value, SensorValue::Text("7.49 kV".into()));
        assert_eq!(low.system.status, TrafficLight::Caution);
    }

    #[test]
    fn open_gate_or_weak_network_raises_caution() {
        let report = evaluate_sensors(draw(90.0, 8.0, 5, true));
        assert_eq!(report.gate.status, TrafficLight::Caution);
        assert_eq!(report.system.status, TrafficLight::Caution);

        let report = evaluate_sensors(draw(90.0, 8.0, 3, false));
        assert_eq!(report.network.status, TrafficLight::Caution);
        assert_eq!(report.network.value, SensorValue::Bars(3));
    }

    #[test]
    fn whole_readings_keep_one_decimal() {
        let report = evaluate_sensors(draw(100.0, 7.0, 4, false));
        assert_eq!(report.water.value, SensorValue::Text("100.0%".into()));
        assert_eq!(report.fence.value, SensorValue::Text("7.0 kV".into()));
        assert!(report.fence.detail.contains("7.0 kV"));
    }

    #[test]
    fn report_serializes_with_dashboard_keys() {
        let json = serde_json::to_value(evaluate_sensors(draw(91.5, 9.1, 4, false))).unwrap();
        assert_eq!(json["WATER"]["status"], "green");
        assert_eq!(json["WATER"]["value"], "91.5%");
        assert_eq!(json["FENCE"]["value"], "9.1 kV");
        assert_eq!(json["NETWORK"]["value"], 4);
        assert_eq!(json["SYSTEM"]["value"], "nominal");
    }
}
