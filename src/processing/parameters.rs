use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::channel::Channel;

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),
    #[error("channel '{channel}' has no parameter '{key}'")]
    UnknownKey { channel: Channel, key: String },
    #[error("parameter '{key}' on '{channel}' must be finite, got {value}")]
    NonFinite {
        channel: Channel,
        key: String,
        value: f64,
    },
    #[error("RFID location index {index} out of range ({available} locations)")]
    UnknownLocation { index: usize, available: usize },
}

// PER-CHANNEL PARAMETERS ------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureParameters {
    /// T, degrees Celsius
    pub temperature: f64,
    /// V_offset, volts
    pub offset: f64,
    /// N, volts peak-to-peak
    pub noise_amplitude: f64,
}

impl Default for TemperatureParameters {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            offset: 0.10,
            noise_amplitude: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityParameters {
    /// D_true, centimetres
    pub true_distance: f64,
    /// rho, surface reflectivity
    pub reflectivity: f64,
    /// T_env, degrees Celsius
    pub ambient_temperature: f64,
}

impl Default for ProximityParameters {
    fn default() -> Self {
        Self {
            true_distance: 50.0,
            reflectivity: 0.5,
            ambient_temperature: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccelerometerParameters {
    /// a_true, m/s^2
    pub true_acceleration: f64,
    pub temperature: f64,
    pub noise_amplitude: f64,
}

impl Default for AccelerometerParameters {
    fn default() -> Self {
        Self {
            true_acceleration: 1.0,
            temperature: 25.0,
            noise_amplitude: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadCellParameters {
    /// W, kilograms
    pub weight: f64,
    pub temperature: f64,
    /// V_b, belt vibration level
    pub vibration: f64,
}

impl Default for LoadCellParameters {
    fn default() -> Self {
        Self {
            weight: 100.0,
            temperature: 25.0,
            vibration: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RfidParameters {
    pub locations: Vec<String>,
    pub selected: usize,
}

impl Default for RfidParameters {
    fn default() -> Self {
        Self {
            locations: vec!["Front".to_string(), "Middle".to_string(), "End".to_string()],
            selected: 0,
        }
    }
}

impl RfidParameters {
    pub fn selected_location(&self) -> Option<&str> {
        self.locations.get(self.selected).map(String::as_str)
    }
}

// SNAPSHOT --------------------------------------------------------------------

/// Immutable copy of every channel's parameters, read once at the start of a tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSnapshot {
    pub temperature: TemperatureParameters,
    pub proximity: ProximityParameters,
    pub accelerometer: AccelerometerParameters,
    pub load_cell: LoadCellParameters,
    pub rfid: RfidParameters,
}

impl ParameterSnapshot {
    /// Every numeric value must be finite and the RFID selection must name a location.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let numeric = [
            (Channel::Temperature, "temperature", self.temperature.temperature),
            (Channel::Temperature, "offset", self.temperature.offset),
            (Channel::Temperature, "noise_amplitude", self.temperature.noise_amplitude),
            (Channel::Proximity, "true_distance", self.proximity.true_distance),
            (Channel::Proximity, "reflectivity", self.proximity.reflectivity),
            (Channel::Proximity, "ambient_temperature", self.proximity.ambient_temperature),
            (Channel::Accelerometer, "true_acceleration", self.accelerometer.true_acceleration),
            (Channel::Accelerometer, "temperature", self.accelerometer.temperature),
            (Channel::Accelerometer, "noise_amplitude", self.accelerometer.noise_amplitude),
            (Channel::LoadCell, "weight", self.load_cell.weight),
            (Channel::LoadCell, "temperature", self.load_cell.temperature),
            (Channel::LoadCell, "vibration", self.load_cell.vibration),
        ];
        if let Some((channel, key, value)) = numeric.iter().find(|(_, _, v)| !v.is_finite()) {
            return Err(ParameterError::NonFinite {
                channel: *channel,
                key: key.to_string(),
                value: *value,
            });
        }

        let available = self.rfid.locations.len();
        if self.rfid.selected >= available {
            return Err(ParameterError::UnknownLocation {
                index: self.rfid.selected,
                available,
            });
        }
        Ok(())
    }
}

// PARAMETER STORE -------------------------------------------------------------

/// Current control values. Mutated by the control layer between ticks.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: ParameterSnapshot,
}

impl ParameterStore {
    /// Rejects snapshots that [`ParameterSnapshot::validate`] refuses.
    pub fn new(initial: ParameterSnapshot) -> Result<Self, ParameterError> {
        initial.validate()?;
        Ok(Self { current: initial })
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        self.current.clone()
    }

    pub fn get(&self, channel: Channel, key: &str) -> Result<f64, ParameterError> {
        let mut current = self.current.clone();
        slot(&mut current, channel, key).map(|value| *value)
    }

    /// Sets a numeric parameter by key. Accepts both camelCase and snake_case names.
    pub fn set(&mut self, channel: Channel, key: &str, value: f64) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NonFinite {
                channel,
                key: key.to_string(),
                value,
            });
        }
        *slot(&mut self.current, channel, key)? = value;
        Ok(())
    }

    pub fn select_location(&mut self, index: usize) -> Result<(), ParameterError> {
        let available = self.current.rfid.locations.len();
        if index >= available {
            return Err(ParameterError::UnknownLocation { index, available });
        }
        self.current.rfid.selected = index;
        Ok(())
    }

    /// Human-readable formula with the current values substituted.
    pub fn formula_label(&self, channel: Channel) -> String {
        let p = &self.current;
        match channel {
            Channel::Temperature => format!(
                "Vout(T) = (0.010 * {}°C) + {:.2}V + ({:.2}V * rand)",
                p.temperature.temperature, p.temperature.offset, p.temperature.noise_amplitude
            ),
            Channel::Proximity => format!(
                "D_measured = {} + ({:.1}*0.1) + ({}*0.05) + N",
                p.proximity.true_distance,
                p.proximity.reflectivity,
                p.proximity.ambient_temperature
            ),
            Channel::Accelerometer => format!(
                "a_out = (1 + 0.001*({}-25)) * {:.1} + ({:.2} * rand)",
                p.accelerometer.temperature,
                p.accelerometer.true_acceleration,
                p.accelerometer.noise_amplitude
            ),
            Channel::LoadCell => format!(
                "Vout = ({}*0.002) + ({}*0.001) + ({:.1}*0.05*rand)",
                p.load_cell.weight, p.load_cell.temperature, p.load_cell.vibration
            ),
            Channel::Rfid => format!(
                "Location: {}",
                p.rfid.selected_location().unwrap_or("N/A")
            ),
        }
    }
}

fn slot<'a>(
    params: &'a mut ParameterSnapshot,
    channel: Channel,
    key: &str,
) -> Result<&'a mut f64, ParameterError> {
    let found = match (channel, key) {
        (Channel::Temperature, "temperature" | "T") => Some(&mut params.temperature.temperature),
        (Channel::Temperature, "offset" | "vOffset" | "v_offset") => {
            Some(&mut params.temperature.offset)
        }
        (Channel::Temperature, "noiseAmplitude" | "noise_amplitude" | "N") => {
            Some(&mut params.temperature.noise_amplitude)
        }
        (Channel::Proximity, "trueDistance" | "true_distance" | "D_true") => {
            Some(&mut params.proximity.true_distance)
        }
        (Channel::Proximity, "reflectivity" | "rho") => Some(&mut params.proximity.reflectivity),
        (Channel::Proximity, "ambientTemperature" | "ambient_temperature" | "T_env") => {
            Some(&mut params.proximity.ambient_temperature)
        }
        (Channel::Accelerometer, "trueAcceleration" | "true_acceleration" | "a_true") => {
            Some(&mut params.accelerometer.true_acceleration)
        }
        (Channel::Accelerometer, "temperature" | "T") => {
            Some(&mut params.accelerometer.temperature)
        }
        (Channel::Accelerometer, "noiseAmplitude" | "noise_amplitude" | "N") => {
            Some(&mut params.accelerometer.noise_amplitude)
        }
        (Channel::LoadCell, "weight" | "W") => Some(&mut params.load_cell.weight),
        (Channel::LoadCell, "temperature" | "T") => Some(&mut params.load_cell.temperature),
        (Channel::LoadCell, "vibration" | "V_b") => Some(&mut params.load_cell.vibration),
        _ => None,
    };
    found.ok_or_else(|| ParameterError::UnknownKey {
        channel,
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_accepts_both_key_styles() {
        let mut store = ParameterStore::default();
        store.set(Channel::Temperature, "noiseAmplitude", 0.2).unwrap();
        assert_eq!(store.snapshot().temperature.noise_amplitude, 0.2);
        store.set(Channel::Temperature, "noise_amplitude", 0.3).unwrap();
        assert_eq!(store.get(Channel::Temperature, "N").unwrap(), 0.3);
    }

    #[test]
    fn set_rejects_unknown_key_and_non_finite_values() {
        let mut store = ParameterStore::default();
        assert!(matches!(
            store.set(Channel::Proximity, "weight", 1.0),
            Err(ParameterError::UnknownKey { .. })
        ));
        assert!(matches!(
            store.set(Channel::LoadCell, "weight", f64::NAN),
            Err(ParameterError::NonFinite { .. })
        ));
        // RFID has no numeric parameters.
        assert!(store.set(Channel::Rfid, "selected", 1.0).is_err());
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let mut store = ParameterStore::default();
        store.set(Channel::LoadCell, "weight", -1.0e6).unwrap();
        assert_eq!(store.snapshot().load_cell.weight, -1.0e6);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut store = ParameterStore::default();
        let before = store.snapshot();
        store.set(Channel::Accelerometer, "a_true", 9.8).unwrap();
        assert_eq!(before.accelerometer.true_acceleration, 1.0);
        assert_eq!(store.snapshot().accelerometer.true_acceleration, 9.8);
    }

    #[test]
    fn select_location_checks_bounds() {
        let mut store = ParameterStore::default();
        store.select_location(2).unwrap();
        assert_eq!(store.snapshot().rfid.selected_location(), Some("End"));
        assert_eq!(
            store.select_location(3),
            Err(ParameterError::UnknownLocation {
                index: 3,
                available: 3
            })
        );
    }

    #[test]
    fn new_rejects_non_finite_snapshot() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.temperature.temperature = f64::NAN;
        match ParameterStore::new(snapshot) {
            Err(ParameterError::NonFinite { channel, key, .. }) => {
                assert_eq!(channel, Channel::Temperature);
                assert_eq!(key, "temperature");
            }
            other => panic!("expected NonFinite, got {:?}", other),
        }

        let mut snapshot = ParameterSnapshot::default();
        snapshot.load_cell.vibration = f64::INFINITY;
        assert!(ParameterStore::new(snapshot).is_err());
    }

    #[test]
    fn new_rejects_out_of_range_selection() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.rfid.selected = usize::MAX;
        assert_eq!(
            ParameterStore::new(snapshot).unwrap_err(),
            ParameterError::UnknownLocation {
                index: usize::MAX,
                available: 3
            }
        );
        assert!(ParameterStore::new(ParameterSnapshot::default()).is_ok());
    }

    #[test]
    fn partial_channel_block_keeps_other_defaults() {
        let yaml = "load_cell:\n  weight: 250.0\n";
        let snapshot: ParameterSnapshot = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(snapshot.load_cell.weight, 250.0);
        assert_eq!(snapshot.load_cell.vibration, 1.0);
        assert_eq!(snapshot.proximity, ProximityParameters::default());
        assert_eq!(snapshot.rfid.selected_location(), Some("Front"));
    }

    #[test]
    fn formula_labels_substitute_current_values() {
        let store = ParameterStore::default();
        assert_eq!(
            store.formula_label(Channel::Temperature),
            "Vout(T) = (0.010 * 20°C) + 0.10V + (0.05V * rand)"
        );
        assert_eq!(store.formula_label(Channel::Rfid), "Location: Front");
    }
}
