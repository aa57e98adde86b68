//! Export surfaces
//!
//! Two one-shot exports of the monitor state: the sample history as a
//! CSV file and the current frame as a composite PNG snapshot.

pub mod csv;
pub mod snapshot;

use thiserror::Error;

pub use csv::{export_history, write_history};
pub use snapshot::{export_snapshot, render_snapshot, SnapshotStyle};

/// Errors from the export surfaces.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),
}
