//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analyze;
pub mod data;
pub mod health;
