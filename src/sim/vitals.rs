//! Vital-sign jitter simulation
//!
//! Each tracked vital random-walks within a clamped band, once per
//! jitter tick, independently of the waveform phase.

use rand::Rng;

use super::sink::{DisplaySink, Field};

/// One tracked vital sign with its random-walk state.
#[derive(Debug, Clone, Copy)]
pub struct VitalSign {
    pub base: f64,
    pub min: f64,
    pub max: f64,
    pub current: f64,
}

impl VitalSign {
    pub fn new(base: f64, min: f64, max: f64) -> Self {
        Self {
            base,
            min,
            max,
            current: base,
        }
    }

    /// Apply one bounded random-walk step: `current += uniform(-1, 1)`,
    /// clamped to `[min, max]`.
    pub fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current = (self.current + rng.gen_range(-1.0..1.0)).clamp(self.min, self.max);
    }

    /// Display value.
    pub fn rounded(&self) -> i64 {
        self.current.round() as i64
    }
}

/// The monitor's four vital indicators.
#[derive(Debug, Clone, Copy)]
pub struct VitalsPanel {
    pub hr: VitalSign,
    pub pr: VitalSign,
    pub qt: VitalSign,
    pub qrs: VitalSign,
}

impl VitalsPanel {
    pub fn new() -> Self {
        Self {
            hr: VitalSign::new(72.0, 70.0, 75.0),
            pr: VitalSign::new(160.0, 155.0, 165.0),
            qt: VitalSign::new(380.0, 375.0, 385.0),
            qrs: VitalSign::new(90.0, 88.0, 92.0),
        }
    }

    /// Jitter all vitals and push the rounded values to the sink.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, sink: &mut dyn DisplaySink) {
        for (vital, field) in [
            (&mut self.hr, Field::VitalHr),
            (&mut self.pr, Field::VitalPr),
            (&mut self.qt, Field::VitalQt),
            (&mut self.qrs, Field::VitalQrs),
        ] {
            vital.jitter(rng);
            sink.set_field(field, vital.rounded().to_string());
        }
    }
}

impl Default for VitalsPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sink::RecordingSink;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_jitter_never_leaves_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut vital = VitalSign::new(72.0, 70.0, 75.0);

        for _ in 0..10_000 {
            vital.jitter(&mut rng);
            assert!(vital.current >= vital.min);
            assert!(vital.current <= vital.max);
        }
    }

    #[test]
    fn test_jitter_actually_moves() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut vital = VitalSign::new(160.0, 155.0, 165.0);
        let start = vital.current;

        let mut moved = false;
        for _ in 0..20 {
            vital.jitter(&mut rng);
            if vital.current != start {
                moved = true;
            }
        }
        assert!(moved);
    }

    #[test]
    fn test_panel_tick_updates_all_fields() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut sink = RecordingSink::new();
        let mut panel = VitalsPanel::new();

        panel.tick(&mut rng, &mut sink);

        for field in [
            Field::VitalHr,
            Field::VitalPr,
            Field::VitalQt,
            Field::VitalQrs,
        ] {
            let text = sink.get(field).expect("field not updated");
            assert!(text.parse::<i64>().is_ok());
        }
    }

    #[test]
    fn test_panel_defaults_match_monitor_bands() {
        let panel = VitalsPanel::new();
        assert_eq!(panel.hr.base, 72.0);
        assert_eq!(panel.pr.base, 160.0);
        assert_eq!(panel.qt.base, 380.0);
        assert_eq!(panel.qrs.base, 90.0);
    }
}
