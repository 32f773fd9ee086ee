use crate::{Error, Result};

/// Physical dimensions of the robot
///
/// The three widths place the hip mounts on the body, the three segment
/// lengths describe each leg from the body outward. All values share one
/// length unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dimensions {
    /// Lateral semi-axis of the front and back corner mounts
    pub front: f64,
    /// Longitudinal semi-axis of the front and back corner mounts
    pub side: f64,
    /// Lateral offset of the middle mounts
    pub middle: f64,
    /// Hip-adjacent segment length
    pub coxa: f64,
    /// Upper leg segment length
    pub femur: f64,
    /// Lower leg segment length
    pub tibia: f64,
}

impl Dimensions {
    /// Create a new set of dimensions
    ///
    /// # Example
    /// ```rust
    /// use hexapod_ik::Dimensions;
    ///
    /// let dims = Dimensions::new(100.0, 100.0, 100.0, 50.0, 100.0, 120.0);
    /// assert!(dims.validate().is_ok());
    /// ```
    pub fn new(front: f64, side: f64, middle: f64, coxa: f64, femur: f64, tibia: f64) -> Self {
        Self {
            front,
            side,
            middle,
            coxa,
            femur,
            tibia,
        }
    }

    /// Named view of every field, in declaration order
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("front", self.front),
            ("side", self.side),
            ("middle", self.middle),
            ("coxa", self.coxa),
            ("femur", self.femur),
            ("tibia", self.tibia),
        ]
    }

    /// Check that every dimension is a finite, strictly positive length
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// Nominal horizontal reach of a leg used to place the foot ring
    pub fn nominal_reach(&self) -> f64 {
        self.coxa + self.femur + 0.5 * self.tibia
    }

    /// Longest straight-line distance the femur and tibia can span
    pub fn max_span(&self) -> f64 {
        self.femur + self.tibia
    }

    /// Shortest straight-line distance the femur and tibia can fold to
    pub fn min_span(&self) -> f64 {
        (self.femur - self.tibia).abs()
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(100.0, 100.0, 100.0, 50.0, 100.0, 120.0)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "body (front: {}, side: {}, middle: {}) leg (coxa: {}, femur: {}, tibia: {})",
            self.front, self.side, self.middle, self.coxa, self.femur, self.tibia
        )
    }
}
