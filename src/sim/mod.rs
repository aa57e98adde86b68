//! Simulation core
//!
//! Everything with nontrivial state lives here:
//! - [`waveform`]: PQRST synthesis and the wall-clock chart variant
//! - [`buffer`]: bounded FIFO sample history
//! - [`sweep`]: scrolling plotted-point buffer for the monitor view
//! - [`vitals`]: bounded random-walk vital signs
//! - [`steps`]: ten-second activity counter
//! - [`monitor`]: the controller owning pause state and all of the above
//! - [`sink`]: display abstraction decoupling simulation from output
//! - [`device`]: mock sensor reading generator for the device API

pub mod buffer;
pub mod device;
pub mod monitor;
pub mod sink;
pub mod steps;
pub mod sweep;
pub mod vitals;
pub mod waveform;

pub use buffer::{Sample, SampleBuffer, BUFFER_SIZE};
pub use device::{DeviceReading, SensorSimulator};
pub use monitor::{Monitor, MonitorSettings, PlayState};
pub use sink::{DisplaySink, Field, RecordingSink, SharedSink, TraceSink};
pub use steps::{StepCounter, AVERAGE_STEP_LENGTH, STEP_INTERVAL_SECS};
pub use sweep::{DrawSurface, NullSurface, SweepSettings, WavePoint, WaveSweep};
pub use vitals::{VitalSign, VitalsPanel};
pub use waveform::{clock_waveform, EcgCycle, ECG_BASELINE, NOISE_INTENSITY};
