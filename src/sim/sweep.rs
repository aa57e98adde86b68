//! Scrolling waveform sweep
//!
//! Maintains the plotted point buffer for the monitor view: each tick
//! advances the cycle phase, appends a freshly synthesized point at the
//! right edge, shifts everything left, and evicts points that scrolled
//! past the left edge. The resulting path is handed to a [`DrawSurface`].

use rand::Rng;

use super::waveform::EcgCycle;

/// A plotted coordinate. Ephemeral; regenerated and scrolled each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePoint {
    pub x: f64,
    pub y: f64,
}

/// Something the sweep can draw onto. The monitor binaries use a no-op
/// surface; the snapshot exporter reads the point path directly.
pub trait DrawSurface {
    /// Redraw the full point path.
    fn draw_path(&mut self, points: &[WavePoint]);
}

/// A surface that discards draw calls.
#[derive(Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn draw_path(&mut self, _points: &[WavePoint]) {}
}

/// Geometry and pacing for the sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepSettings {
    /// Surface width in pixels; new points enter at this x.
    pub width: f64,
    /// Surface height; the trace baseline sits at half of it.
    pub height: f64,
    /// Scroll and phase speed multiplier.
    pub speed: f64,
    /// Horizontal pixel spacing between consecutive points.
    pub point_spacing: f64,
    /// Phase advance per tick before the speed multiplier.
    pub phase_step: f64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            speed: 0.8,
            point_spacing: 1.0,
            phase_step: 0.006,
        }
    }
}

impl SweepSettings {
    pub fn baseline_y(&self) -> f64 {
        self.height / 2.0
    }
}

/// The scrolling point buffer plus its phase state.
#[derive(Debug, Clone)]
pub struct WaveSweep {
    settings: SweepSettings,
    points: Vec<WavePoint>,
    phase: f64,
    cycle: EcgCycle,
}

impl WaveSweep {
    pub fn new(settings: SweepSettings) -> Self {
        let mut sweep = Self {
            settings,
            points: Vec::new(),
            phase: 0.0,
            cycle: EcgCycle::new(),
        };
        sweep.fill_initial_points();
        sweep
    }

    /// Seed the full width with points at the current phase, so the trace
    /// starts as an unbroken line.
    fn fill_initial_points(&mut self) {
        self.points.clear();
        let mut x = 0.0;
        while x < self.settings.width {
            self.points.push(WavePoint {
                x,
                y: self.point_y(),
            });
            x += self.settings.point_spacing;
        }
    }

    fn point_y(&self) -> f64 {
        self.settings.baseline_y() - self.cycle.offset(self.phase)
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn points(&self) -> &[WavePoint] {
        &self.points
    }

    /// Advance one frame: step the phase (re-jittering amplitude on
    /// wrap), append a point at the right edge, scroll left, and evict
    /// points past the left edge.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.phase += self.settings.phase_step * self.settings.speed;
        if self.phase >= 1.0 {
            self.phase = 0.0;
            self.cycle.rejitter(rng);
        }

        self.points.push(WavePoint {
            x: self.settings.width,
            y: self.point_y(),
        });

        let shift = self.settings.point_spacing * self.settings.speed;
        for point in &mut self.points {
            point.x -= shift;
        }

        self.points.retain(|p| p.x >= 0.0);
    }

    /// Redraw onto the surface and advance one tick. While paused the
    /// frame is skipped entirely: the surface keeps its last drawn path
    /// and no draw calls are issued.
    pub fn frame<R: Rng + ?Sized>(
        &mut self,
        surface: &mut dyn DrawSurface,
        playing: bool,
        rng: &mut R,
    ) {
        if !playing {
            return;
        }
        surface.draw_path(&self.points);
        self.tick(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_sweep() -> WaveSweep {
        WaveSweep::new(SweepSettings {
            width: 50.0,
            height: 100.0,
            ..SweepSettings::default()
        })
    }

    #[test]
    fn test_initial_points_span_width() {
        let sweep = small_sweep();
        assert_eq!(sweep.points().len(), 50);
        assert_eq!(sweep.points()[0].x, 0.0);
        // Phase 0 sits at the start of the P wave: sin(0) = 0.
        assert_eq!(sweep.points()[0].y, 50.0);
    }

    #[test]
    fn test_tick_appends_and_scrolls() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sweep = small_sweep();
        let before = sweep.points().len();

        sweep.tick(&mut rng);

        // One appended at the right edge, shifted left by spacing * speed.
        let last = *sweep.points().last().unwrap();
        assert!((last.x - (50.0 - 0.8)).abs() < 1e-9);
        assert!(sweep.points().len() <= before + 1);
    }

    #[test]
    fn test_points_never_negative_x() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sweep = small_sweep();

        for _ in 0..500 {
            sweep.tick(&mut rng);
            assert!(sweep.points().iter().all(|p| p.x >= 0.0));
        }
    }

    #[test]
    fn test_phase_wraps_and_rejitters() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sweep = small_sweep();
        let initial_amplitude = sweep.cycle.amplitude;

        // 0.006 * 0.8 per tick; just over 208 ticks wraps the phase.
        for _ in 0..250 {
            sweep.tick(&mut rng);
        }

        assert!(sweep.phase() < 1.0);
        assert_ne!(sweep.cycle.amplitude, initial_amplitude);
    }

    #[test]
    fn test_frame_paused_does_not_advance_or_draw() {
        struct Counting(usize);
        impl DrawSurface for Counting {
            fn draw_path(&mut self, _points: &[WavePoint]) {
                self.0 += 1;
            }
        }

        let mut rng = StdRng::seed_from_u64(4);
        let mut sweep = small_sweep();
        let mut surface = Counting(0);

        let phase_before = sweep.phase();
        let count_before = sweep.points().len();

        sweep.frame(&mut surface, false, &mut rng);
        sweep.frame(&mut surface, false, &mut rng);

        assert_eq!(surface.0, 0, "paused frames must not redraw");
        assert_eq!(sweep.phase(), phase_before);
        assert_eq!(sweep.points().len(), count_before);
    }

    #[test]
    fn test_frame_draws_full_path() {
        struct Counting(usize);
        impl DrawSurface for Counting {
            fn draw_path(&mut self, points: &[WavePoint]) {
                self.0 = points.len();
            }
        }

        let mut rng = StdRng::seed_from_u64(5);
        let mut sweep = small_sweep();
        let mut surface = Counting(0);

        sweep.frame(&mut surface, true, &mut rng);
        assert_eq!(surface.0, 50);
    }
}
