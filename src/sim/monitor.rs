//! Monitor controller
//!
//! Owns all mutable simulation state: play/pause flag, sample history,
//! waveform sweep, vitals panel, step counter, and the injected random
//! source and display sink. The periodic tasks call into the explicit
//! tick methods here, which also makes every behavior drivable from
//! tests without real timers.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::buffer::{Sample, SampleBuffer, BUFFER_SIZE};
use super::sink::{Field, SharedSink};
use super::steps::{StepCounter, AVERAGE_STEP_LENGTH};
use super::sweep::{DrawSurface, SweepSettings, WaveSweep};
use super::vitals::VitalsPanel;
use super::waveform::clock_waveform;
use crate::feed::SensorReading;

/// Playback state of the monitor. Toggling is the only external input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Construction-time tunables for the monitor.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub sweep: SweepSettings,
    pub buffer_size: usize,
    pub step_length_m: f64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            sweep: SweepSettings::default(),
            buffer_size: BUFFER_SIZE,
            step_length_m: AVERAGE_STEP_LENGTH,
        }
    }
}

/// The simulation controller.
pub struct Monitor {
    state: PlayState,
    history: SampleBuffer,
    sweep: WaveSweep,
    vitals: VitalsPanel,
    steps: StepCounter,
    rng: StdRng,
    sink: SharedSink,
}

impl Monitor {
    pub fn new(settings: MonitorSettings, sink: SharedSink, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: PlayState::Playing,
            history: SampleBuffer::new(settings.buffer_size),
            sweep: WaveSweep::new(settings.sweep),
            vitals: VitalsPanel::new(),
            steps: StepCounter::new(settings.step_length_m),
            rng,
            sink,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Flip between `Playing` and `Paused`, returning the new state.
    /// While paused every tick method is a no-op, so the frame chain,
    /// vitals jitter and step counter all halt synchronously.
    pub fn toggle(&mut self) -> PlayState {
        self.state = match self.state {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        };
        self.state
    }

    pub fn history(&self) -> &SampleBuffer {
        &self.history
    }

    pub fn sweep(&self) -> &WaveSweep {
        &self.sweep
    }

    pub fn vitals(&self) -> &VitalsPanel {
        &self.vitals
    }

    pub fn steps(&self) -> &StepCounter {
        &self.steps
    }

    /// Frame-synchronized tick: redraw the sweep path and advance the
    /// scroll. A paused monitor issues no draw calls at all, so the
    /// surface keeps whatever it last rendered.
    pub fn frame_tick(&mut self, surface: &mut dyn DrawSurface) {
        let playing = self.is_playing();
        self.sweep.frame(surface, playing, &mut self.rng);
    }

    /// One-second vitals jitter tick.
    pub fn vitals_tick(&mut self) {
        if !self.is_playing() {
            return;
        }
        if let Ok(mut sink) = self.sink.lock() {
            self.vitals.tick(&mut self.rng, &mut *sink);
        }
    }

    /// Ten-second step tick.
    pub fn step_tick(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.steps.tick();
        if let Ok(mut sink) = self.sink.lock() {
            self.steps.refresh_display(&mut *sink);
        }
    }

    /// A successful feed poll: mark connected and, while playing, push
    /// the formatted metrics and synthesize one live-chart sample.
    pub fn apply_reading(&mut self, reading: &SensorReading, now_ms: i64) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.set_connected(true);

            if self.state == PlayState::Playing {
                if let Some(temperature) = reading.temperature {
                    sink.set_field(Field::Temperature, format!("{:.1} °C", temperature));
                }
                if let Some(humidity) = reading.humidity {
                    sink.set_field(Field::Humidity, format!("{:.1} %", humidity));
                }
                if let Some(heart_rate) = reading.heart_rate {
                    sink.set_field(Field::HeartRate, format!("{:.1} BPM", heart_rate));
                }
            }
        }

        if self.state == PlayState::Playing {
            self.ingest_clock_sample(now_ms);
        }
    }

    /// A failed feed poll: flip the indicator, leave everything else
    /// untouched, and let the next poll self-heal.
    pub fn mark_disconnected(&mut self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.set_connected(false);
        }
    }

    /// Synthesize one clock-waveform sample into the bounded history.
    pub fn ingest_clock_sample(&mut self, now_ms: i64) {
        let value = clock_waveform(now_ms, &mut self.rng);
        self.history.push(Sample::with_timestamp(value, now_ms));
    }

    /// Push an analysis result to the display.
    pub fn show_analysis(&mut self, category: &str, message: &str) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.set_field(Field::RiskCategory, category.to_string());
            sink.set_field(Field::AlertMessage, message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sink::RecordingSink;
    use crate::sim::sweep::NullSurface;
    use std::sync::{Arc, Mutex};

    fn test_monitor() -> (Monitor, Arc<Mutex<RecordingSink>>) {
        let recorder = RecordingSink::shared();
        let sink: SharedSink = recorder.clone();
        let monitor = Monitor::new(MonitorSettings::default(), sink, Some(99));
        (monitor, recorder)
    }

    #[test]
    fn test_starts_playing() {
        let (monitor, _) = test_monitor();
        assert_eq!(monitor.state(), PlayState::Playing);
    }

    #[test]
    fn test_toggle_round_trip() {
        let (mut monitor, _) = test_monitor();
        assert_eq!(monitor.toggle(), PlayState::Paused);
        assert_eq!(monitor.toggle(), PlayState::Playing);
    }

    #[test]
    fn test_pause_halts_everything() {
        let (mut monitor, recorder) = test_monitor();
        let mut surface = NullSurface;

        monitor.toggle();

        let phase_before = monitor.sweep().phase();
        let history_before = monitor.history().len();
        let hr_before = monitor.vitals().hr.current;

        monitor.frame_tick(&mut surface);
        monitor.vitals_tick();
        monitor.step_tick();

        assert_eq!(monitor.sweep().phase(), phase_before);
        assert_eq!(monitor.history().len(), history_before);
        assert_eq!(monitor.vitals().hr.current, hr_before);
        assert_eq!(monitor.steps().count(), 0);
        assert!(recorder.lock().unwrap().fields.is_empty());
    }

    #[test]
    fn test_paused_frame_issues_no_draws() {
        struct Counting(usize);
        impl crate::sim::sweep::DrawSurface for Counting {
            fn draw_path(&mut self, _points: &[crate::sim::sweep::WavePoint]) {
                self.0 += 1;
            }
        }

        let (mut monitor, _) = test_monitor();
        let mut surface = Counting(0);

        monitor.frame_tick(&mut surface);
        assert_eq!(surface.0, 1);

        monitor.toggle();
        monitor.frame_tick(&mut surface);
        monitor.frame_tick(&mut surface);
        assert_eq!(surface.0, 1, "paused frame ticks must not redraw");

        monitor.toggle();
        monitor.frame_tick(&mut surface);
        assert_eq!(surface.0, 2);
    }

    #[test]
    fn test_pause_then_resume_without_tick_changes_nothing() {
        let (mut monitor, _) = test_monitor();
        let mut surface = NullSurface;
        monitor.frame_tick(&mut surface);
        monitor.vitals_tick();

        let phase = monitor.sweep().phase();
        let history = monitor.history().len();
        let hr = monitor.vitals().hr.current;

        monitor.toggle();
        monitor.toggle();

        assert_eq!(monitor.sweep().phase(), phase);
        assert_eq!(monitor.history().len(), history);
        assert_eq!(monitor.vitals().hr.current, hr);
    }

    #[test]
    fn test_apply_reading_formats_metrics() {
        let (mut monitor, recorder) = test_monitor();

        let reading = SensorReading {
            temperature: Some(36.53),
            humidity: Some(20.0),
            heart_rate: Some(82.4),
        };
        monitor.apply_reading(&reading, 1_000);

        let sink = recorder.lock().unwrap();
        assert_eq!(sink.get(Field::Temperature), Some("36.5 °C"));
        assert_eq!(sink.get(Field::Humidity), Some("20.0 %"));
        assert_eq!(sink.get(Field::HeartRate), Some("82.4 BPM"));
        assert_eq!(sink.connected, Some(true));
        drop(sink);

        assert_eq!(monitor.history().len(), 1);
    }

    #[test]
    fn test_apply_reading_while_paused_only_marks_connected() {
        let (mut monitor, recorder) = test_monitor();
        monitor.toggle();

        let reading = SensorReading {
            temperature: Some(36.5),
            humidity: None,
            heart_rate: Some(70.0),
        };
        monitor.apply_reading(&reading, 2_000);

        let sink = recorder.lock().unwrap();
        assert_eq!(sink.connected, Some(true));
        assert_eq!(sink.get(Field::HeartRate), None);
        drop(sink);
        assert_eq!(monitor.history().len(), 0);
    }

    #[test]
    fn test_disconnect_leaves_metrics_untouched() {
        let (mut monitor, recorder) = test_monitor();

        let reading = SensorReading {
            temperature: None,
            humidity: None,
            heart_rate: Some(82.4),
        };
        monitor.apply_reading(&reading, 3_000);
        monitor.mark_disconnected();

        let sink = recorder.lock().unwrap();
        assert_eq!(sink.connected, Some(false));
        assert_eq!(sink.get(Field::HeartRate), Some("82.4 BPM"));
    }

    #[test]
    fn test_history_respects_capacity() {
        let (mut monitor, _) = test_monitor();
        for i in 0..(BUFFER_SIZE as i64 + 50) {
            monitor.ingest_clock_sample(i * 5);
        }
        assert_eq!(monitor.history().len(), BUFFER_SIZE);
    }
}
