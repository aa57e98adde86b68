//! # VitalScope
//!
//! Simulated health telemetry dashboard engine: procedural ECG waveform
//! synthesis, live device polling, risk analysis with a local fallback,
//! and session export.
//!
//! ## Features
//!
//! - **PQRST synthesis**: phase-driven ECG cycles with per-beat
//!   amplitude jitter, plus a wall-clock variant for the live chart
//! - **Bounded history**: FIFO sample buffer feeding the CSV export
//! - **Live telemetry**: short-interval polling of the device feed with
//!   silent degradation on failure
//! - **Risk analysis**: remote classification that always degrades to a
//!   local fallback
//! - **Exports**: CSV history and a composite PNG snapshot
//!
//! ## Modules
//!
//! - [`sim`]: waveform, sweep, vitals, steps and the monitor controller
//! - [`feed`]: device feed client and poller
//! - [`analysis`]: remote client, fallback classifier, local scorer
//! - [`export`]: CSV and snapshot exports
//! - [`api`]: the device REST API served by `vitalscope-device`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::{Arc, Mutex};
//! use vitalscope::sim::{Monitor, MonitorSettings, NullSurface, SharedSink, TraceSink};
//!
//! let sink: SharedSink = Arc::new(Mutex::new(TraceSink::default()));
//! let mut monitor = Monitor::new(MonitorSettings::default(), sink, Some(42));
//!
//! let mut surface = NullSurface;
//! monitor.frame_tick(&mut surface);
//! monitor.vitals_tick();
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod export;
pub mod feed;
pub mod sim;

// Re-export top-level types for convenience
pub use sim::{
    DeviceReading, DisplaySink, Field, Monitor, MonitorSettings, PlayState, Sample, SampleBuffer,
    SensorSimulator, SharedSink, SweepSettings, WaveSweep,
};

pub use feed::{FeedClient, FeedConfig, FeedError, FeedPoller, SensorReading};

pub use analysis::{
    classify, fallback_assessment, AnalysisClient, AnalysisError, RiskAssessment, RiskCategory,
    ScoredAnalysis, VitalsSnapshot,
};

pub use export::{export_history, export_snapshot, ExportError, SnapshotStyle};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
