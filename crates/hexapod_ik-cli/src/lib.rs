//! Hexapod IK command-line support
//!
//! Input resolution and report rendering for the `hexapod-ik` binary. The
//! solving itself lives in the `hexapod_ik` crate.

pub mod config;
pub mod report;

pub use config::{Overrides, RobotInput};
pub use report::{GeometryReport, ReportFormat};

/// Main result type using color-eyre for error handling
pub type Result<T> = color_eyre::Result<T>;
