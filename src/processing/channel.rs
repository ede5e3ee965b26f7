use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::parameters::ParameterError;

/// One simulated sensor on the conveyor rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Temperature,
    Proximity,
    Accelerometer,
    LoadCell,
    Rfid,
}

impl Channel {
    /// Fixed tick order. Random draws are consumed in this order.
    pub const ALL: [Channel; 5] = [
        Channel::Temperature,
        Channel::Proximity,
        Channel::Accelerometer,
        Channel::LoadCell,
        Channel::Rfid,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Proximity => "proximity",
            Channel::Accelerometer => "accelerometer",
            Channel::LoadCell => "load_cell",
            Channel::Rfid => "rfid",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature Output",
            Channel::Proximity => "Proximity Measured",
            Channel::Accelerometer => "Acceleration Output",
            Channel::LoadCell => "Load Cell Output",
            Channel::Rfid => "RFID Status",
        }
    }

    pub fn unit_label(&self) -> &'static str {
        match self {
            Channel::Temperature | Channel::LoadCell => "Voltage (V)",
            Channel::Proximity => "Distance (cm)",
            Channel::Accelerometer => "Acceleration (g)",
            Channel::Rfid => "Value",
        }
    }

    /// RFID is a categorical signal and takes no random draw.
    pub fn uses_noise(&self) -> bool {
        !matches!(self, Channel::Rfid)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Channel::Temperature => 0,
            Channel::Proximity => 1,
            Channel::Accelerometer => 2,
            Channel::LoadCell => 3,
            Channel::Rfid => 4,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Channel {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|channel| channel.id() == s)
            .ok_or_else(|| ParameterError::UnknownChannel(s.to_string()))
    }
}
