use nalgebra::Point3;

use crate::{
    BodyTransform, Dimensions, Geometry, JointAngles, LegPosition, LegResult, Pose, PosedBody,
    Result, leg::solve_leg,
};

/// Everything a renderer needs to draw one pose of the robot
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Solved legs in [`LegPosition::ALL`] order
    pub legs: [LegResult; 6],

    /// Posed hip mounts (body corners) in the world frame
    pub body: [Point3<f64>; 6],
}

impl Configuration {
    /// Result for a single leg
    pub fn leg(&self, position: LegPosition) -> &LegResult {
        &self.legs[position.index()]
    }

    /// Joint angles of every leg, in solver order
    pub fn angles(&self) -> [JointAngles; 6] {
        self.legs.map(|leg| leg.angles)
    }

    /// True when no leg had to clamp its knee triangle
    pub fn all_reachable(&self) -> bool {
        self.legs.iter().all(|leg| leg.reachable)
    }
}

/// Solve every leg for a body pose
///
/// This is a pure function of its inputs. It is defined for any positive
/// dimensions and any finite pose and never fails; targets the legs cannot
/// reach are approximated (see [`LegResult::reachable`]).
///
/// # Example
/// ```rust
/// use hexapod_ik::{solve, Dimensions, LegPosition, Pose};
///
/// let configuration = solve(&Dimensions::default(), &Pose::identity());
/// let leg = configuration.leg(LegPosition::FrontRight);
/// assert!(leg.reachable);
/// assert!(leg.angles.coxa.abs() < 1e-9);
/// ```
#[tracing::instrument(level = "trace", skip_all, fields(dimensions = %dimensions, pose = %pose))]
pub fn solve(dimensions: &Dimensions, pose: &Pose) -> Configuration {
    let geometry = Geometry::new(dimensions);
    let transform = BodyTransform::from_pose(pose);
    let posed = PosedBody::new(&geometry, &transform);

    let legs = LegPosition::ALL.map(|position| {
        let i = position.index();
        solve_leg(
            &geometry.mounts[i],
            &posed.feet_local[i],
            dimensions,
            &transform,
        )
    });

    Configuration {
        legs,
        body: posed.hips_world,
    }
}

/// Validate the inputs, then [`solve`]
pub fn try_solve(dimensions: &Dimensions, pose: &Pose) -> Result<Configuration> {
    dimensions.validate()?;
    pose.validate()?;
    Ok(solve(dimensions, pose))
}
