//! Display sink capability
//!
//! Simulation components never touch presentation directly; they push
//! formatted values through a [`DisplaySink`]. The binaries use a
//! tracing-backed sink, tests a recording one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A display field the simulation can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Feed metric: temperature in celsius.
    Temperature,
    /// Feed metric: relative humidity.
    Humidity,
    /// Feed metric: heart rate in BPM.
    HeartRate,
    /// Monitor indicator: heart rate.
    VitalHr,
    /// Monitor indicator: PR interval.
    VitalPr,
    /// Monitor indicator: QT interval.
    VitalQt,
    /// Monitor indicator: QRS duration.
    VitalQrs,
    /// Activity: step count.
    StepCount,
    /// Activity: distance in kilometers.
    DistanceKm,
    /// Analysis: risk category name.
    RiskCategory,
    /// Analysis: alert message.
    AlertMessage,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::HeartRate => "heart_rate",
            Field::VitalHr => "vital_hr",
            Field::VitalPr => "vital_pr",
            Field::VitalQt => "vital_qt",
            Field::VitalQrs => "vital_qrs",
            Field::StepCount => "step_count",
            Field::DistanceKm => "distance_km",
            Field::RiskCategory => "risk_category",
            Field::AlertMessage => "alert_message",
        }
    }
}

/// Where simulation output lands. Implementations must tolerate missing
/// targets by no-opping rather than faulting.
pub trait DisplaySink: Send {
    /// Set the text of a display field.
    fn set_field(&mut self, field: Field, text: String);

    /// Flip the connection indicator.
    fn set_connected(&mut self, connected: bool);
}

/// Shared handle used by the periodic tasks.
pub type SharedSink = Arc<Mutex<dyn DisplaySink>>;

/// Sink that logs updates through `tracing`. Used by the monitor binary.
#[derive(Debug, Default)]
pub struct TraceSink {
    connected: Option<bool>,
}

impl DisplaySink for TraceSink {
    fn set_field(&mut self, field: Field, text: String) {
        tracing::info!(field = field.as_str(), value = %text, "display update");
    }

    fn set_connected(&mut self, connected: bool) {
        // Only log transitions, the poller runs hot.
        if self.connected != Some(connected) {
            self.connected = Some(connected);
            if connected {
                tracing::info!("feed connected");
            } else {
                tracing::warn!("feed disconnected");
            }
        }
    }
}

/// Sink that records every update, for headless tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub fields: HashMap<Field, String>,
    pub connected: Option<bool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Mutex<RecordingSink>> {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(|s| s.as_str())
    }
}

impl DisplaySink for RecordingSink {
    fn set_field(&mut self, field: Field, text: String) {
        self.fields.insert(field, text);
    }

    fn set_connected(&mut self, connected: bool) {
        self.connected = Some(connected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_tracks_fields() {
        let mut sink = RecordingSink::new();
        sink.set_field(Field::HeartRate, "82.4 BPM".to_string());
        sink.set_connected(true);

        assert_eq!(sink.get(Field::HeartRate), Some("82.4 BPM"));
        assert_eq!(sink.connected, Some(true));
        assert_eq!(sink.get(Field::Temperature), None);
    }
}
