//! Mock sensor device
//!
//! Stand-in for the hardware telemetry source: one reading per second
//! with values drawn from the same ranges the real device reports.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One device reading, as served by `GET /data`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeviceReading {
    /// Body temperature in celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Heart rate in BPM.
    pub heart_rate: u32,
    /// Raw ECG sensor value.
    pub ecg: u32,
}

impl Default for DeviceReading {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            heart_rate: 0,
            ecg: 0,
        }
    }
}

/// Generates simulated sensor readings.
#[derive(Debug)]
pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Draw the next mock reading.
    pub fn next_reading(&mut self) -> DeviceReading {
        DeviceReading {
            temperature: round1(self.rng.gen_range(35.5..=37.5)),
            humidity: round1(self.rng.gen_range(15.0..=25.0)),
            heart_rate: self.rng.gen_range(60..=100),
            ecg: self.rng.gen_range(100..=900),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
