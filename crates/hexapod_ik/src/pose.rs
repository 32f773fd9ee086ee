//! Rigid body transform between the body frame and the world frame.
//!
//! Points leave the body frame by rotating about X, then Y, then Z and
//! translating. Points enter the body frame through the exact reverse
//! sequence with negated angles.

use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::{Error, Geometry, Result};

/// Desired body pose
///
/// Translation shares the length unit of [`crate::Dimensions`], rotations are
/// in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Pose {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Pose {
    /// Create a pose from a translation and X/Y/Z rotations in degrees
    pub fn new(tx: f64, ty: f64, tz: f64, rx: f64, ry: f64, rz: f64) -> Self {
        Self {
            tx,
            ty,
            tz,
            rx,
            ry,
            rz,
        }
    }

    /// The pose that leaves the body where the geometry put it
    pub fn identity() -> Self {
        Self::default()
    }

    /// Named view of every field, in declaration order
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("tx", self.tx),
            ("ty", self.ty),
            ("tz", self.tz),
            ("rx", self.rx),
            ("ry", self.ry),
            ("rz", self.rz),
        ]
    }

    /// Check that every component is finite
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return Err(Error::NonFinitePose { name, value });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "translation ({}, {}, {}) rotation ({}°, {}°, {}°)",
            self.tx, self.ty, self.tz, self.rx, self.ry, self.rz
        )
    }
}

/// The body transform for one pose
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransform {
    rotate_x: Rotation3<f64>,
    rotate_y: Rotation3<f64>,
    rotate_z: Rotation3<f64>,
    translation: Vector3<f64>,
}

impl BodyTransform {
    /// Build the transform for a pose
    ///
    /// # Example
    /// ```rust
    /// use hexapod_ik::{BodyTransform, Point3, Pose};
    ///
    /// let transform = BodyTransform::from_pose(&Pose::new(0.0, 0.0, 10.0, 0.0, 0.0, 90.0));
    /// let world = transform.to_world_frame(&Point3::new(1.0, 0.0, 0.0));
    /// assert!((world - Point3::new(0.0, 1.0, 10.0)).norm() < 1e-12);
    ///
    /// let local = transform.to_local_frame(&world);
    /// assert!((local - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    /// ```
    pub fn from_pose(pose: &Pose) -> Self {
        Self {
            rotate_x: Rotation3::from_axis_angle(&Vector3::x_axis(), pose.rx.to_radians()),
            rotate_y: Rotation3::from_axis_angle(&Vector3::y_axis(), pose.ry.to_radians()),
            rotate_z: Rotation3::from_axis_angle(&Vector3::z_axis(), pose.rz.to_radians()),
            translation: Vector3::new(pose.tx, pose.ty, pose.tz),
        }
    }

    /// The transform that changes nothing
    pub fn identity() -> Self {
        Self::from_pose(&Pose::identity())
    }

    /// Map a point from the unposed body frame into the world frame
    pub fn to_world_frame(&self, point: &Point3<f64>) -> Point3<f64> {
        let rotated = self.rotate_z * (self.rotate_y * (self.rotate_x * point));
        rotated + self.translation
    }

    /// Map a world point back into the unposed body frame
    pub fn to_local_frame(&self, point: &Point3<f64>) -> Point3<f64> {
        let shifted = point - self.translation;
        self.rotate_x
            .inverse_transform_point(&self.rotate_y.inverse_transform_point(
                &self.rotate_z.inverse_transform_point(&shifted),
            ))
    }

    /// The composed transform as an isometry
    pub fn isometry(&self) -> Isometry3<f64> {
        let rotation = self.rotate_z * self.rotate_y * self.rotate_x;
        Isometry3::from_parts(
            Translation3::from(self.translation),
            UnitQuaternion::from_rotation_matrix(&rotation),
        )
    }

    /// The homogeneous 4x4 matrix as a flat array (column-major)
    ///
    /// This is the layout renderers and Eigen expect.
    pub fn to_matrix_column_major(&self) -> [f64; 16] {
        let matrix = self.isometry().to_homogeneous();

        let mut result = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                result[col * 4 + row] = matrix[(row, col)];
            }
        }
        result
    }
}

impl Default for BodyTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Body points after the pose has been applied
#[derive(Clone, Debug, PartialEq)]
pub struct PosedBody {
    /// Hip mounts in the world frame
    pub hips_world: [Point3<f64>; 6],

    /// Fixed feet re-expressed in the unposed body frame
    pub feet_local: [Point3<f64>; 6],
}

impl PosedBody {
    pub fn new(geometry: &Geometry, transform: &BodyTransform) -> Self {
        Self {
            hips_world: geometry
                .mounts
                .map(|mount| transform.to_world_frame(&mount.hip)),
            feet_local: geometry
                .fixed_feet
                .map(|foot| transform.to_local_frame(&foot)),
        }
    }
}
