//! Manual FFI bindings for the hexapod_ik library
//!
//! This module provides a C-compatible interface so a C or C++ renderer can
//! solve a body pose and read back every joint position and angle.
//!
//! The approach uses:
//! - `#[no_mangle]` functions with C calling convention
//! - `#[repr(C)]` plain-data mirrors of the Rust types, passed by pointer
//! - `bool` status returns instead of panics across the boundary

use hexapod_ik::{BodyTransform, Dimensions, LegPosition, LegResult, Point3, Pose};
use std::ffi::{c_char, c_double, c_uint};

/// C-compatible 3D point
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3d {
    pub x: c_double,
    pub y: c_double,
    pub z: c_double,
}

impl From<Point3<f64>> for Vec3d {
    fn from(point: Point3<f64>) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }
}

/// C-compatible mirror of [`Dimensions`]
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexapodDimensions {
    pub front: c_double,
    pub side: c_double,
    pub middle: c_double,
    pub coxa: c_double,
    pub femur: c_double,
    pub tibia: c_double,
}

impl From<HexapodDimensions> for Dimensions {
    fn from(dims: HexapodDimensions) -> Self {
        Dimensions::new(
            dims.front,
            dims.side,
            dims.middle,
            dims.coxa,
            dims.femur,
            dims.tibia,
        )
    }
}

impl From<Dimensions> for HexapodDimensions {
    fn from(dims: Dimensions) -> Self {
        Self {
            front: dims.front,
            side: dims.side,
            middle: dims.middle,
            coxa: dims.coxa,
            femur: dims.femur,
            tibia: dims.tibia,
        }
    }
}

/// C-compatible mirror of [`Pose`], rotations in degrees
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HexapodPose {
    pub tx: c_double,
    pub ty: c_double,
    pub tz: c_double,
    pub rx: c_double,
    pub ry: c_double,
    pub rz: c_double,
}

impl From<HexapodPose> for Pose {
    fn from(pose: HexapodPose) -> Self {
        Pose::new(pose.tx, pose.ty, pose.tz, pose.rx, pose.ry, pose.rz)
    }
}

/// One solved leg, angles in degrees
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HexapodLeg {
    pub coxa_angle: c_double,
    pub femur_angle: c_double,
    pub tibia_angle: c_double,
    pub body_contact: Vec3d,
    pub coxa_end: Vec3d,
    pub femur_end: Vec3d,
    pub foot: Vec3d,
    pub reachable: bool,
}

impl From<&LegResult> for HexapodLeg {
    fn from(leg: &LegResult) -> Self {
        Self {
            coxa_angle: leg.angles.coxa,
            femur_angle: leg.angles.femur,
            tibia_angle: leg.angles.tibia,
            body_contact: leg.body_contact.into(),
            coxa_end: leg.coxa_end.into(),
            femur_end: leg.femur_end.into(),
            foot: leg.foot.into(),
            reachable: leg.reachable,
        }
    }
}

/// The full solver output
///
/// Legs are ordered middle-right, front-right, front-left, middle-left,
/// back-left, back-right; see `hexapod_leg_name`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HexapodConfiguration {
    pub legs: [HexapodLeg; 6],
    pub body: [Vec3d; 6],
}

/// C-compatible representation of a 4x4 transformation matrix
/// Data is stored in column-major order (compatible with Eigen)
#[repr(C)]
pub struct Mat4d {
    pub data: [c_double; 16],
}

const IDENTITY: Mat4d = Mat4d {
    data: [
        1.0, 0.0, 0.0, 0.0, // Column 0
        0.0, 1.0, 0.0, 0.0, // Column 1
        0.0, 0.0, 1.0, 0.0, // Column 2
        0.0, 0.0, 0.0, 1.0, // Column 3
    ],
};

/// NUL-terminated leg names, in solver order
const LEG_NAMES: [&std::ffi::CStr; 6] = [
    c"middle_right",
    c"front_right",
    c"front_left",
    c"middle_left",
    c"back_left",
    c"back_right",
];

/// Reference dimensions the solver ships with
#[unsafe(no_mangle)]
pub extern "C" fn hexapod_default_dimensions() -> HexapodDimensions {
    Dimensions::default().into()
}

/// Solve a body pose
///
/// Returns `false` and leaves `out` untouched when a pointer is null, a
/// dimension is not a finite positive length, or a pose component is not
/// finite. Unreachable legs are still solved; check `reachable` per leg.
///
/// # Safety
/// `dimensions` and `pose` must be null or point to valid values, `out` must
/// be null or point to writable memory for one `HexapodConfiguration`
#[unsafe(no_mangle)]
pub extern "C" fn hexapod_solve(
    dimensions: *const HexapodDimensions,
    pose: *const HexapodPose,
    out: *mut HexapodConfiguration,
) -> bool {
    if dimensions.is_null() || pose.is_null() || out.is_null() {
        return false;
    }

    let dimensions: Dimensions = unsafe { *dimensions }.into();
    let pose: Pose = unsafe { *pose }.into();

    let configuration = match hexapod_ik::try_solve(&dimensions, &pose) {
        Ok(configuration) => configuration,
        Err(error) => {
            tracing::warn!(%error, "rejected hexapod_solve input");
            return false;
        }
    };

    let result = HexapodConfiguration {
        legs: configuration.legs.each_ref().map(HexapodLeg::from),
        body: configuration.body.map(Vec3d::from),
    };

    unsafe {
        *out = result;
    }
    true
}

/// Body transform for a pose as a homogeneous matrix
///
/// # Safety
/// pose pointer must be null or valid; null yields the identity matrix
#[unsafe(no_mangle)]
pub extern "C" fn hexapod_body_transform(pose: *const HexapodPose) -> Mat4d {
    if pose.is_null() {
        return IDENTITY;
    }

    let pose: Pose = unsafe { *pose }.into();
    Mat4d {
        data: BodyTransform::from_pose(&pose).to_matrix_column_major(),
    }
}

/// Name of the leg at `index` in solver order
///
/// The returned string is static and must not be freed. Returns null when
/// `index` is out of range.
#[unsafe(no_mangle)]
pub extern "C" fn hexapod_leg_name(index: c_uint) -> *const c_char {
    match LEG_NAMES.get(index as usize) {
        Some(name) => name.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Number of legs in a configuration
#[unsafe(no_mangle)]
pub extern "C" fn hexapod_leg_count() -> c_uint {
    LegPosition::ALL.len() as c_uint
}
