//! Parametric sensor models. Each maps a parameter set plus one uniform draw
//! in [0, 1) to a single sample. The draw is centred to [-0.5, 0.5) before use.

use super::channel::Channel;
use super::parameters::{
    AccelerometerParameters, LoadCellParameters, ParameterSnapshot, ProximityParameters,
    RfidParameters, TemperatureParameters,
};

const TEMPERATURE_GAIN: f64 = 0.010; // V per degree C

const PROXIMITY_REFLECTIVITY_GAIN: f64 = 0.1;
const PROXIMITY_THERMAL_GAIN: f64 = 0.05;
const PROXIMITY_NOISE: f64 = 0.5;

const ACCEL_NOMINAL_SENSITIVITY: f64 = 1.0;
const ACCEL_THERMAL_COEFFICIENT: f64 = 0.001;
const ACCEL_REFERENCE_TEMPERATURE: f64 = 25.0;

const LOAD_CELL_GAIN: f64 = 0.002;
const LOAD_CELL_THERMAL_DRIFT: f64 = 0.001;
const LOAD_CELL_VIBRATION_GAIN: f64 = 0.05;

/// `0.010*T + V_offset + N*(rand - 0.5)`
pub fn temperature_sample(params: &TemperatureParameters, draw: f64) -> f64 {
    TEMPERATURE_GAIN * params.temperature + params.offset + params.noise_amplitude * (draw - 0.5)
}

/// `D_true + rho*0.1 + T_env*0.05 + (rand - 0.5)*0.5`
pub fn proximity_sample(params: &ProximityParameters, draw: f64) -> f64 {
    params.true_distance
        + params.reflectivity * PROXIMITY_REFLECTIVITY_GAIN
        + params.ambient_temperature * PROXIMITY_THERMAL_GAIN
        + (draw - 0.5) * PROXIMITY_NOISE
}

/// Sensitivity drifts linearly with temperature around 25 C.
pub fn accelerometer_sample(params: &AccelerometerParameters, draw: f64) -> f64 {
    let sensitivity = ACCEL_NOMINAL_SENSITIVITY
        + ACCEL_THERMAL_COEFFICIENT * (params.temperature - ACCEL_REFERENCE_TEMPERATURE);
    sensitivity * params.true_acceleration + params.noise_amplitude * (draw - 0.5)
}

/// `W*0.002 + T*0.001 + V_b*0.05*(rand - 0.5)`
pub fn load_cell_sample(params: &LoadCellParameters, draw: f64) -> f64 {
    params.weight * LOAD_CELL_GAIN
        + params.temperature * LOAD_CELL_THERMAL_DRIFT
        + params.vibration * LOAD_CELL_VIBRATION_GAIN * (draw - 0.5)
}

/// One-based index of the selected location.
pub fn rfid_sample(params: &RfidParameters) -> f64 {
    params.selected as f64 + 1.0
}

/// Dispatches to the channel's model. `draw` is ignored for RFID.
pub fn generate(channel: Channel, snapshot: &ParameterSnapshot, draw: f64) -> f64 {
    match channel {
        Channel::Temperature => temperature_sample(&snapshot.temperature, draw),
        Channel::Proximity => proximity_sample(&snapshot.proximity, draw),
        Channel::Accelerometer => accelerometer_sample(&snapshot.accelerometer, draw),
        Channel::LoadCell => load_cell_sample(&snapshot.load_cell, draw),
        Channel::Rfid => rfid_sample(&snapshot.rfid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn temperature_reference_point() {
        let params = TemperatureParameters {
            temperature: 20.0,
            offset: 0.10,
            noise_amplitude: 0.05,
        };
        assert!((temperature_sample(&params, 0.5) - 0.30).abs() < EPSILON);
        // extremes of the draw move the output by half the noise amplitude
        assert!((temperature_sample(&params, 0.0) - 0.275).abs() < EPSILON);
    }

    #[test]
    fn proximity_formula() {
        let params = ProximityParameters {
            true_distance: 40.0,
            reflectivity: 0.8,
            ambient_temperature: 30.0,
        };
        // 40 + 0.08 + 1.5 + 0.5 * 0.5
        assert!((proximity_sample(&params, 1.0) - 41.83).abs() < EPSILON);
    }

    #[test]
    fn accelerometer_sensitivity_drifts_with_temperature() {
        let params = AccelerometerParameters {
            true_acceleration: 2.0,
            temperature: 35.0,
            noise_amplitude: 0.1,
        };
        // S = 1.01
        assert!((accelerometer_sample(&params, 0.5) - 2.02).abs() < EPSILON);
        let at_reference = AccelerometerParameters {
            temperature: 25.0,
            ..params
        };
        assert!((accelerometer_sample(&at_reference, 0.75) - 2.025).abs() < EPSILON);
    }

    #[test]
    fn load_cell_formula() {
        let params = LoadCellParameters {
            weight: 500.0,
            temperature: 20.0,
            vibration: 2.0,
        };
        // 1.0 + 0.02 + 2*0.05*(0.25 - 0.5)
        assert!((load_cell_sample(&params, 0.25) - 0.995).abs() < EPSILON);
    }

    #[test]
    fn rfid_ignores_draw() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.rfid.selected = 1;
        assert_eq!(generate(Channel::Rfid, &snapshot, 0.0), 2.0);
        assert_eq!(generate(Channel::Rfid, &snapshot, 0.99), 2.0);
    }

    #[test]
    fn rfid_handles_largest_index() {
        let params = RfidParameters {
            locations: Vec::new(),
            selected: usize::MAX,
        };
        assert_eq!(rfid_sample(&params), usize::MAX as f64 + 1.0);
    }

    #[test]
    fn finite_inputs_give_finite_outputs() {
        let snapshot = ParameterSnapshot::default();
        for channel in Channel::ALL {
            for draw in [0.0, 0.5, 0.999_999] {
                assert!(generate(channel, &snapshot, draw).is_finite());
            }
        }
    }
}
