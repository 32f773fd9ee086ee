//! # Hexapod IK
//!
//! A pure Rust library that poses the body of a six-legged robot while its
//! feet stay pinned to the ground.
//!
//! Given leg-segment lengths and a desired body pose, [`solve`] computes for
//! every leg the coxa, femur and tibia joint angles together with the world
//! space positions of each joint. The computation runs in three stages:
//!
//! - [`geometry`]: hip mount points and fixed foot contacts from the dimensions
//! - [`pose`]: the rigid body transform between the body and world frames
//! - [`leg`]: the closed-form planar triangle solve for a single leg
//!
//! ## Example
//!
//! ```rust
//! use hexapod_ik::{solve, Dimensions, Pose};
//!
//! let dimensions = Dimensions::default();
//! let pose = Pose { tz: 80.0, ..Pose::default() };
//!
//! let configuration = solve(&dimensions, &pose);
//! for leg in configuration.legs.iter() {
//!     assert!(leg.foot.z.abs() < 1e-6);
//! }
//! ```

pub mod dimensions;
pub mod geometry;
pub mod leg;
pub mod pose;
pub mod solver;

pub use dimensions::Dimensions;
pub use geometry::{Geometry, LegMountSpec, LegPosition};
pub use leg::{JointAngles, LegResult};
pub use nalgebra::{Isometry3, Point3};
pub use pose::{BodyTransform, Pose, PosedBody};
pub use solver::{Configuration, solve, try_solve};

/// Common result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for input validation
///
/// Solving itself never fails; these are only produced by the explicit
/// validation helpers.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A body or leg dimension that is not a finite, strictly positive length
    #[error("Invalid dimension `{name}`: expected a finite positive length, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// A pose component that is NaN or infinite
    #[error("Invalid pose component `{name}`: expected a finite value, got {value}")]
    NonFinitePose { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimension {
            name: "femur",
            value: -1.0,
        };
        let message = err.to_string();
        assert!(message.contains("femur"));
        assert!(message.contains("-1"));
    }

    #[test]
    fn test_solve_reexport() {
        let configuration = solve(&Dimensions::default(), &Pose::default());
        assert_eq!(configuration.legs.len(), 6);
        assert_eq!(configuration.body.len(), 6);
    }
}
