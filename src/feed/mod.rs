//! Inbound telemetry feed
//!
//! Short-interval polling of the device's `GET /data` endpoint, with
//! connection-indicator handling and silent per-tick degradation.

pub mod client;
pub mod poller;

pub use client::{FeedClient, FeedConfig, FeedError, SensorReading};
pub use poller::FeedPoller;
