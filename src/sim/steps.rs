//! Step and activity counter
//!
//! Independent ten-second counter: +1 step per tick while playing. The
//! display only refreshes when the internal count has advanced, and
//! distance is derived from the displayed count.

use super::sink::{DisplaySink, Field};

/// Average stride length in meters, used for the distance estimate.
pub const AVERAGE_STEP_LENGTH: f64 = 0.75;

/// Seconds between step increments.
pub const STEP_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct StepCounter {
    count: u64,
    displayed: u64,
    step_length_m: f64,
}

impl StepCounter {
    pub fn new(step_length_m: f64) -> Self {
        Self {
            count: 0,
            displayed: 0,
            step_length_m,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    /// One interval elapsed: exactly one step. No decrement, no reset.
    pub fn tick(&mut self) {
        self.count += 1;
    }

    /// Distance in kilometers derived from the displayed count.
    pub fn distance_km(&self) -> f64 {
        self.displayed as f64 * self.step_length_m / 1000.0
    }

    /// Push the count and distance to the sink, but only when the
    /// internal count has advanced past the displayed one.
    pub fn refresh_display(&mut self, sink: &mut dyn DisplaySink) {
        if self.displayed < self.count {
            self.displayed = self.count;
            sink.set_field(Field::StepCount, self.displayed.to_string());
        }
        sink.set_field(Field::DistanceKm, format!("{:.2}", self.distance_km()));
    }
}

impl Default for StepCounter {
    fn default() -> Self {
        Self::new(AVERAGE_STEP_LENGTH)
    }
}
