//! Procedural ECG waveform synthesis
//!
//! Two generators produce the simulated signal:
//! - [`EcgCycle`]: phase-driven PQRST shape used by the scrolling sweep
//! - [`clock_waveform`]: wall-clock variant feeding the live chart history
//!
//! Both are deterministic given the injected random source; amplitude
//! jitter and additive noise are the only randomness.

use rand::Rng;
use std::f64::consts::PI;

/// Baseline value for the clock-driven waveform variant.
pub const ECG_BASELINE: f64 = 600.0;

/// Width of the uniform noise band added to the clock-driven variant.
pub const NOISE_INTENSITY: f64 = 10.0;

/// Nominal per-cycle amplitude scale factor.
pub const NOMINAL_AMPLITUDE: f64 = 1.2;

/// Half-width of the per-cycle amplitude jitter.
pub const AMPLITUDE_JITTER: f64 = 0.05;

/// Clamp range for the clock-driven variant.
pub const CLOCK_MIN: f64 = 200.0;
pub const CLOCK_MAX: f64 = 1000.0;

/// One simulated cardiac cycle, modeled as piecewise closed-form curves
/// over a normalized phase in `[0, 1)`.
///
/// The amplitude factor is re-randomized by +/-[`AMPLITUDE_JITTER`] at
/// each phase wrap to give beat-to-beat variability.
#[derive(Debug, Clone, Copy)]
pub struct EcgCycle {
    /// Current per-cycle amplitude scale.
    pub amplitude: f64,
}

impl EcgCycle {
    pub fn new() -> Self {
        Self {
            amplitude: NOMINAL_AMPLITUDE,
        }
    }

    /// Offset above baseline at `phase` in `[0, 1)`.
    ///
    /// Positive values deflect upward. The QRS complex
    /// (`0.15 <= phase < 0.30`) produces the cycle maximum.
    pub fn offset(&self, phase: f64) -> f64 {
        let a = self.amplitude;

        if phase < 0.1 {
            // P wave
            let p = phase / 0.1;
            12.0 * (p * PI).sin() * a
        } else if phase < 0.15 {
            // PR segment
            0.0
        } else if phase < 0.2 {
            // Q wave
            let q = (phase - 0.15) / 0.05;
            -15.0 * q * q * a
        } else if phase < 0.25 {
            // R wave
            let r = (phase - 0.2) / 0.05;
            (-15.0 + 90.0 * (r * PI / 2.0).sin().powi(2)) * a
        } else if phase < 0.3 {
            // S wave
            let s = (phase - 0.25) / 0.05;
            (75.0 - 90.0 * (1.0 - s).powi(2)) * a
        } else if phase < 0.4 {
            // ST segment
            0.0
        } else if phase < 0.7 {
            // T wave
            let t = (phase - 0.4) / 0.3;
            25.0 * (t * PI).sin().powi(2) * a
        } else {
            // Diastolic rest
            0.0
        }
    }

    /// Redraw the amplitude factor for the next cycle.
    pub fn rejitter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.amplitude = NOMINAL_AMPLITUDE + rng.gen_range(-AMPLITUDE_JITTER..=AMPLITUDE_JITTER);
    }
}

impl Default for EcgCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock waveform variant used for the live chart feed.
///
/// Maps millisecond time modulo a 1-second period onto five coarse
/// segments around [`ECG_BASELINE`], adds uniform noise of width
/// [`NOISE_INTENSITY`], and clamps to `[CLOCK_MIN, CLOCK_MAX]`.
pub fn clock_waveform<R: Rng + ?Sized>(now_ms: i64, rng: &mut R) -> f64 {
    let t = (now_ms as f64 / 1000.0).rem_euclid(1.0);
    let mut value = ECG_BASELINE;

    if t < 0.2 {
        value += 40.0 * (t * PI * 5.0).sin();
    } else if t < 0.3 {
        value -= 100.0;
    } else if t < 0.4 {
        value += 250.0;
    } else if t < 0.5 {
        value -= 150.0;
    } else if t < 0.7 {
        value += 60.0 * ((t - 0.5) * PI * 4.0).sin();
    }

    value += rng.gen::<f64>() * NOISE_INTENSITY - NOISE_INTENSITY / 2.0;
    value.clamp(CLOCK_MIN, CLOCK_MAX)
}
