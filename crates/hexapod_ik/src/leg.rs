//! Single-leg inverse kinematics.
//!
//! The leg is solved in its own frame: the body frame rotated so that the
//! leg's mount direction is +X. In that frame the coxa swings about Z and the
//! femur and tibia form a triangle in the vertical plane through the coxa.
//!
//! Targets outside the femur/tibia annulus are not rejected. The law of
//! cosines arguments are clamped to `[-1, 1]`, which yields the closest
//! achievable bend. The reconstructed foot still lands on the requested
//! target, but the femur-end to foot distance then differs from the tibia
//! length; check [`LegResult::reachable`] before treating the angles as a
//! physically valid solution.

use nalgebra::{Point3, Rotation3, Vector3};

use crate::{BodyTransform, Dimensions, LegMountSpec, LegPosition};

/// Slack allowed on the triangle inequality before a target counts as out of reach
const REACH_TOLERANCE: f64 = 1e-9;

/// Joint angles of one leg, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointAngles {
    /// Coxa swing about the vertical axis, relative to the mount direction
    pub coxa: f64,
    /// Femur elevation above horizontal, in (-180, 180]
    pub femur: f64,
    /// Interior knee angle between femur and tibia, in [0, 180]
    pub tibia: f64,
}

/// Solved angles and world-space joint positions of one leg
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegResult {
    pub position: LegPosition,
    pub angles: JointAngles,
    /// Hip attachment point on the body
    pub body_contact: Point3<f64>,
    pub coxa_end: Point3<f64>,
    pub femur_end: Point3<f64>,
    pub foot: Point3<f64>,
    /// Whether the femur and tibia can actually span the distance to the foot
    pub reachable: bool,
}

/// The knee triangle of one leg, in the leg frame
#[derive(Clone, Copy, Debug, PartialEq)]
struct LegPlane {
    /// Coxa swing (radians)
    coxa_angle: f64,
    /// Femur elevation (radians)
    femur_angle: f64,
    /// Interior knee angle (radians)
    knee_angle: f64,
    /// Horizontal distance from the femur pivot to the foot
    reach: f64,
    /// Vertical offset from the femur pivot to the foot, positive up
    height: f64,
    /// Straight-line distance from the femur pivot to the foot
    hypotenuse: f64,
}

impl LegPlane {
    fn solve(foot_in_leg_frame: &Vector3<f64>, dimensions: &Dimensions) -> Self {
        let coxa_angle = foot_in_leg_frame.y.atan2(foot_in_leg_frame.x);
        let planar_distance = foot_in_leg_frame.x.hypot(foot_in_leg_frame.y);
        let reach = planar_distance - dimensions.coxa;
        let height = foot_in_leg_frame.z;
        let hypotenuse = reach.hypot(height);

        let femur = dimensions.femur;
        let tibia = dimensions.tibia;

        let elevation = height.atan2(reach);
        let femur_interior = clamped_acos(
            femur * femur + hypotenuse * hypotenuse - tibia * tibia,
            2.0 * femur * hypotenuse,
        );
        let knee_angle = clamped_acos(
            femur * femur + tibia * tibia - hypotenuse * hypotenuse,
            2.0 * femur * tibia,
        );

        Self {
            coxa_angle,
            femur_angle: wrap_angle(elevation + femur_interior),
            knee_angle,
            reach,
            height,
            hypotenuse,
        }
    }

    fn reachable(&self, dimensions: &Dimensions) -> bool {
        self.hypotenuse >= dimensions.min_span() - REACH_TOLERANCE
            && self.hypotenuse <= dimensions.max_span() + REACH_TOLERANCE
    }

    /// Forward kinematics back to joint positions, relative to the hip, in the leg frame
    ///
    /// The foot comes from `reach` and `height` rather than the knee angle so
    /// the drawn leg always ends at the target, clamped or not.
    fn joints(&self, dimensions: &Dimensions) -> [Vector3<f64>; 3] {
        let direction = Vector3::new(self.coxa_angle.cos(), self.coxa_angle.sin(), 0.0);
        let up = Vector3::z();

        let coxa_end = direction * dimensions.coxa;
        let femur_end = coxa_end
            + direction * (dimensions.femur * self.femur_angle.cos())
            + up * (dimensions.femur * self.femur_angle.sin());
        let foot = coxa_end + direction * self.reach + up * self.height;

        [coxa_end, femur_end, foot]
    }
}

/// Solve one leg
///
/// `foot_local` is the leg's fixed foot expressed in the unposed body frame
/// (see [`crate::PosedBody`]). Joint positions are returned in the world
/// frame through `transform`.
pub fn solve_leg(
    mount: &LegMountSpec,
    foot_local: &Point3<f64>,
    dimensions: &Dimensions,
    transform: &BodyTransform,
) -> LegResult {
    let to_leg_frame = Rotation3::from_axis_angle(&Vector3::z_axis(), -mount.mount_angle);
    let foot_in_leg_frame = to_leg_frame * (foot_local - mount.hip);

    let plane = LegPlane::solve(&foot_in_leg_frame, dimensions);
    let reachable = plane.reachable(dimensions);
    if !reachable {
        tracing::debug!(
            leg = %mount.position,
            hypotenuse = plane.hypotenuse,
            min = dimensions.min_span(),
            max = dimensions.max_span(),
            "foot target out of reach, clamping knee triangle"
        );
    }

    let to_body_frame = to_leg_frame.inverse();
    let [coxa_end, femur_end, foot] = plane
        .joints(dimensions)
        .map(|joint| transform.to_world_frame(&(mount.hip + to_body_frame * joint)));

    LegResult {
        position: mount.position,
        angles: JointAngles {
            coxa: plane.coxa_angle.to_degrees(),
            femur: plane.femur_angle.to_degrees(),
            tibia: plane.knee_angle.to_degrees(),
        },
        body_contact: transform.to_world_frame(&mount.hip),
        coxa_end,
        femur_end,
        foot,
        reachable,
    }
}

/// Inverse cosine of `numerator / denominator`, safe for any inputs
///
/// The ratio is clamped to `[-1, 1]`. `0 / 0` only happens when the foot sits
/// on the femur pivot with femur == tibia; the ratio tends to 0 there.
fn clamped_acos(numerator: f64, denominator: f64) -> f64 {
    let ratio = numerator / denominator;
    if ratio.is_nan() {
        return 0f64.acos();
    }
    ratio.clamp(-1.0, 1.0).acos()
}

/// Wrap an angle in radians into (-π, π]
fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};

    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, Pose};
    use std::f64::consts::PI;
    use test_log::test;

    fn solve_at(
        dimensions: &Dimensions,
        position: LegPosition,
        foot_local: Point3<f64>,
    ) -> LegResult {
        let geometry = Geometry::new(dimensions);
        solve_leg(
            geometry.mount(position),
            &foot_local,
            dimensions,
            &BodyTransform::identity(),
        )
    }

    #[test]
    fn test_clamped_acos() {
        assert!((clamped_acos(1.0, 2.0) - PI / 3.0).abs() < 1e-12);
        assert_eq!(clamped_acos(5.0, 1.0), 0.0);
        assert!((clamped_acos(-5.0, 1.0) - PI).abs() < 1e-12);
        assert!((clamped_acos(0.0, 0.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(clamped_acos(1.0, 0.0), 0.0);
        assert!((clamped_acos(-1.0, 0.0) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_straight_out_flat_triangle() {
        // foot on the hip plane at femur + tibia/2 beyond the coxa
        let dims = Dimensions::default();
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::MiddleRight);
        let foot = mount.hip + Vector3::new(dims.nominal_reach(), 0.0, 0.0);

        let leg = solve_at(&dims, LegPosition::MiddleRight, foot);
        assert!(leg.reachable);
        assert!(leg.angles.coxa.abs() < 1e-9);

        // c = 160: femur interior = acos((100² + 160² - 120²) / (2·100·160))
        let expected_femur = (21_200.0f64 / 32_000.0).acos().to_degrees();
        assert!((leg.angles.femur - expected_femur).abs() < 1e-9);
        let expected_knee = (-1_200.0f64 / 24_000.0).acos().to_degrees();
        assert!((leg.angles.tibia - expected_knee).abs() < 1e-9);

        assert!((leg.foot - foot).norm() < 1e-9);
        assert!((leg.body_contact - mount.hip).norm() < 1e-12);
        assert!((leg.coxa_end - Point3::new(150.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_reachable_segment_lengths_hold() {
        let dims = Dimensions::default();
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::FrontLeft);
        let foot = mount.hip + Vector3::new(-90.0, 130.0, -70.0);

        let leg = solve_at(&dims, LegPosition::FrontLeft, foot);
        assert!(leg.reachable);
        assert!(((leg.coxa_end - leg.body_contact).norm() - dims.coxa).abs() < 1e-9);
        assert!(((leg.femur_end - leg.coxa_end).norm() - dims.femur).abs() < 1e-9);
        assert!(((leg.foot - leg.femur_end).norm() - dims.tibia).abs() < 1e-9);
        assert!((leg.foot - foot).norm() < 1e-9);
    }

    #[test]
    fn test_coxa_angle_follows_sideways_target() {
        let dims = Dimensions::default();
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::MiddleRight);
        // 45° to the left of the outward direction
        let foot = mount.hip + Vector3::new(150.0, 150.0, -50.0);

        let leg = solve_at(&dims, LegPosition::MiddleRight, foot);
        assert!((leg.angles.coxa - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreachable_target_is_clamped() {
        let dims = Dimensions::default();
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::BackRight);
        let outward = Rotation3::from_axis_angle(&Vector3::z_axis(), mount.mount_angle);
        let far = mount.hip + outward * Vector3::new(400.0, 0.0, 0.0);

        let leg = solve_at(&dims, LegPosition::BackRight, far);
        assert!(!leg.reachable);
        assert!(leg.angles.femur.is_finite());
        assert!(leg.angles.tibia.is_finite());
        // fully stretched knee, femur along the hypotenuse
        assert!((leg.angles.tibia - 180.0).abs() < 1e-9);
        assert!(leg.angles.femur.abs() < 1e-9);
        assert!((leg.foot - far).norm() < 1e-9);
    }

    #[test]
    fn test_target_inside_minimum_span() {
        let dims = Dimensions::new(100.0, 100.0, 100.0, 50.0, 60.0, 150.0);
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::MiddleLeft);
        // foot straight under the femur pivot, closer than |femur - tibia|
        let pivot = mount.hip + Vector3::new(-dims.coxa, 0.0, 0.0);
        let foot = pivot + Vector3::new(0.0, 0.0, -10.0);

        let leg = solve_at(&dims, LegPosition::MiddleLeft, foot);
        assert!(!leg.reachable);
        assert!(leg.angles.femur.is_finite());
        assert!(leg.angles.tibia.abs() < 1e-9);
    }

    #[test]
    fn test_foot_on_femur_pivot() {
        let dims = Dimensions::new(100.0, 100.0, 100.0, 50.0, 100.0, 100.0);
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::MiddleRight);
        let pivot = mount.hip + Vector3::new(dims.coxa, 0.0, 0.0);

        let leg = solve_at(&dims, LegPosition::MiddleRight, pivot);
        assert!(leg.reachable);
        assert!((leg.angles.femur - 90.0).abs() < 1e-9);
        assert!(leg.angles.tibia.abs() < 1e-9);
        assert!((leg.foot - pivot).norm() < 1e-9);
    }

    #[test]
    fn test_foot_under_hip() {
        let dims = Dimensions::default();
        let geometry = Geometry::new(&dims);
        let mount = geometry.mount(LegPosition::FrontRight);
        let foot = mount.hip + Vector3::new(0.0, 0.0, -150.0);

        let leg = solve_at(&dims, LegPosition::FrontRight, foot);
        assert!(leg.angles.coxa.abs() < 1e-9);
        assert!(leg.angles.femur.is_finite());
        assert!((leg.foot - foot).norm() < 1e-9);
    }

    #[test]
    fn test_world_frame_output() {
        let dims = Dimensions::default();
        let geometry = Geometry::new(&dims);
        let pose = Pose::new(5.0, -5.0, 60.0, 4.0, -6.0, 10.0);
        let transform = BodyTransform::from_pose(&pose);
        let mount = geometry.mount(LegPosition::BackLeft);
        let fixed = geometry.fixed_foot(LegPosition::BackLeft);

        let leg = solve_leg(mount, &transform.to_local_frame(fixed), &dims, &transform);
        assert!((leg.foot - fixed).norm() < 1e-9);
        assert!((leg.body_contact - transform.to_world_frame(&mount.hip)).norm() < 1e-12);
    }
}
