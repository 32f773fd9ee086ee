//! Body geometry derived from the robot dimensions.
//!
//! The hip mounts form a hexagon in the body's XY plane. Front and back
//! corner mounts sit on the ellipse with semi-axes `(front, side)` at 60°
//! from the lateral axis, middle mounts sit on the lateral axis at
//! `±middle`. Every foot is pinned on the ground plane along its leg's
//! mount direction, one nominal leg reach beyond the hip.

use std::f64::consts::FRAC_PI_3;

use nalgebra::Point3;

use crate::Dimensions;

/// Location of a leg on the body, in solver order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LegPosition {
    MiddleRight,
    FrontRight,
    FrontLeft,
    MiddleLeft,
    BackLeft,
    BackRight,
}

impl LegPosition {
    /// All legs in the fixed solver order
    pub const ALL: [LegPosition; 6] = [
        LegPosition::MiddleRight,
        LegPosition::FrontRight,
        LegPosition::FrontLeft,
        LegPosition::MiddleLeft,
        LegPosition::BackLeft,
        LegPosition::BackRight,
    ];

    /// Index of this leg in [`LegPosition::ALL`]
    pub fn index(self) -> usize {
        match self {
            LegPosition::MiddleRight => 0,
            LegPosition::FrontRight => 1,
            LegPosition::FrontLeft => 2,
            LegPosition::MiddleLeft => 3,
            LegPosition::BackLeft => 4,
            LegPosition::BackRight => 5,
        }
    }

    /// Stable snake_case identifier
    pub fn name(self) -> &'static str {
        match self {
            LegPosition::MiddleRight => "middle_right",
            LegPosition::FrontRight => "front_right",
            LegPosition::FrontLeft => "front_left",
            LegPosition::MiddleLeft => "middle_left",
            LegPosition::BackLeft => "back_left",
            LegPosition::BackRight => "back_right",
        }
    }

    /// Hip offset of this leg in the unposed body frame
    pub fn hip(self, dimensions: &Dimensions) -> Point3<f64> {
        let corner_x = dimensions.front * FRAC_PI_3.cos();
        let corner_y = dimensions.side * FRAC_PI_3.sin();
        match self {
            LegPosition::MiddleRight => Point3::new(dimensions.middle, 0.0, 0.0),
            LegPosition::FrontRight => Point3::new(corner_x, corner_y, 0.0),
            LegPosition::FrontLeft => Point3::new(-corner_x, corner_y, 0.0),
            LegPosition::MiddleLeft => Point3::new(-dimensions.middle, 0.0, 0.0),
            LegPosition::BackLeft => Point3::new(-corner_x, -corner_y, 0.0),
            LegPosition::BackRight => Point3::new(corner_x, -corner_y, 0.0),
        }
    }
}

impl std::fmt::Display for LegPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a leg attaches to the body and which way it points
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegMountSpec {
    pub position: LegPosition,

    /// Hip offset in the unposed body frame
    pub hip: Point3<f64>,

    /// Outward radial direction of the leg (radians, CCW from +X)
    pub mount_angle: f64,
}

impl LegMountSpec {
    /// Derive the mount for one leg
    pub fn new(position: LegPosition, dimensions: &Dimensions) -> Self {
        let hip = position.hip(dimensions);
        Self {
            position,
            hip,
            mount_angle: hip.y.atan2(hip.x),
        }
    }

    /// Horizontal distance from the body center to the hip
    pub fn radius(&self) -> f64 {
        self.hip.x.hypot(self.hip.y)
    }
}

/// Hip mounts and ground contacts for one set of dimensions
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Hip mounts in solver order
    pub mounts: [LegMountSpec; 6],

    /// World-space foot contacts on the ground plane (z = 0), in solver order.
    /// These do not move when the pose changes.
    pub fixed_feet: [Point3<f64>; 6],
}

impl Geometry {
    /// Build the hexagon of mounts and the ring of fixed feet
    ///
    /// # Example
    /// ```rust
    /// use hexapod_ik::{Dimensions, Geometry};
    ///
    /// let geometry = Geometry::new(&Dimensions::default());
    /// assert!(geometry.fixed_feet.iter().all(|foot| foot.z == 0.0));
    /// ```
    pub fn new(dimensions: &Dimensions) -> Self {
        let mounts = LegPosition::ALL.map(|position| LegMountSpec::new(position, dimensions));
        let reach = dimensions.nominal_reach();
        let fixed_feet = mounts.map(|mount| {
            let radius = mount.radius() + reach;
            Point3::new(
                radius * mount.mount_angle.cos(),
                radius * mount.mount_angle.sin(),
                0.0,
            )
        });
        Self { mounts, fixed_feet }
    }

    /// Mount of a single leg
    pub fn mount(&self, position: LegPosition) -> &LegMountSpec {
        &self.mounts[position.index()]
    }

    /// Fixed foot contact of a single leg
    pub fn fixed_foot(&self, position: LegPosition) -> &Point3<f64> {
        &self.fixed_feet[position.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_leg_order() {
        for (i, position) in LegPosition::ALL.iter().enumerate() {
            assert_eq!(position.index(), i);
        }
        assert_eq!(LegPosition::ALL[0].name(), "middle_right");
        assert_eq!(format!("{}", LegPosition::BackLeft), "back_left");
    }

    #[test]
    fn test_hips_are_symmetric() {
        let dims = Dimensions::new(80.0, 120.0, 95.0, 40.0, 90.0, 110.0);
        let geometry = Geometry::new(&dims);

        let fr = geometry.mount(LegPosition::FrontRight).hip;
        let fl = geometry.mount(LegPosition::FrontLeft).hip;
        let bl = geometry.mount(LegPosition::BackLeft).hip;
        let br = geometry.mount(LegPosition::BackRight).hip;

        assert!((fr.x + fl.x).abs() < 1e-12);
        assert!((fr.y - fl.y).abs() < 1e-12);
        assert!((fl.y + bl.y).abs() < 1e-12);
        assert!((br.x - fr.x).abs() < 1e-12);

        let mr = geometry.mount(LegPosition::MiddleRight).hip;
        assert_eq!(mr, Point3::new(95.0, 0.0, 0.0));
        for mount in geometry.mounts.iter() {
            assert_eq!(mount.hip.z, 0.0);
        }
    }

    #[test]
    fn test_mount_angles() {
        let geometry = Geometry::new(&Dimensions::default());
        let expected = [0.0, 60.0, 120.0, 180.0, -120.0, -60.0];

        for (mount, degrees) in geometry.mounts.iter().zip(expected) {
            let angle = mount.mount_angle * 180.0 / PI;
            assert!(
                (angle - degrees).abs() < 1e-9,
                "{} mount angle {} != {}",
                mount.position,
                angle,
                degrees
            );
        }
    }

    #[test]
    fn test_feet_lie_beyond_hips() {
        let dims = Dimensions::new(60.0, 140.0, 90.0, 30.0, 70.0, 100.0);
        let geometry = Geometry::new(&dims);

        for (mount, foot) in geometry.mounts.iter().zip(geometry.fixed_feet.iter()) {
            assert_eq!(foot.z, 0.0);
            let foot_radius = foot.x.hypot(foot.y);
            assert!((foot_radius - mount.radius() - dims.nominal_reach()).abs() < 1e-9);
            // same direction as the hip
            let foot_angle = foot.y.atan2(foot.x);
            assert!((foot_angle - mount.mount_angle).abs() < 1e-9);
        }
    }
}
