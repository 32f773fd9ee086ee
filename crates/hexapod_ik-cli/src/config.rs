//! Input resolution for the CLI
//!
//! Dimensions and pose come from, lowest precedence first: built-in
//! defaults, an optional JSON or YAML file, then individual flags.

use color_eyre::eyre::{Context, eyre};
use hexapod_ik::{Dimensions, Pose};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{ReportFormat, Result};

/// Everything the solver needs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RobotInput {
    pub dimensions: Dimensions,
    pub pose: Pose,
}

impl RobotInput {
    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ReportFormat::from_extension)
            .ok_or_else(|| {
                eyre!(
                    "Cannot tell the format of {}; use a .json, .yaml or .yml file",
                    path.display()
                )
            })?;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse robot input from {}", path.display()))
    }

    /// Parse from a string in the given format
    pub fn parse(content: &str, format: ReportFormat) -> Result<Self> {
        let input = match format {
            ReportFormat::Json => serde_json::from_str(content)?,
            ReportFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(input)
    }

    /// Apply individual overrides on top of this input
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        let dimensions = [
            (&mut self.dimensions.front, overrides.front),
            (&mut self.dimensions.side, overrides.side),
            (&mut self.dimensions.middle, overrides.middle),
            (&mut self.dimensions.coxa, overrides.coxa),
            (&mut self.dimensions.femur, overrides.femur),
            (&mut self.dimensions.tibia, overrides.tibia),
        ];
        for (field, value) in dimensions {
            if let Some(value) = value {
                *field = value;
            }
        }

        let pose = [
            (&mut self.pose.tx, overrides.tx),
            (&mut self.pose.ty, overrides.ty),
            (&mut self.pose.tz, overrides.tz),
            (&mut self.pose.rx, overrides.rx),
            (&mut self.pose.ry, overrides.ry),
            (&mut self.pose.rz, overrides.rz),
        ];
        for (field, value) in pose {
            if let Some(value) = value {
                *field = value;
            }
        }

        self
    }

    /// Resolve defaults, an optional file, and overrides into a validated input
    pub fn resolve(config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let base = match config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let input = base.with_overrides(overrides);
        input.validate()?;
        tracing::debug!(dimensions = %input.dimensions, pose = %input.pose, "resolved robot input");
        Ok(input)
    }

    /// Check dimensions and pose
    pub fn validate(&self) -> Result<()> {
        self.dimensions
            .validate()
            .context("Invalid robot dimensions")?;
        self.pose.validate().context("Invalid body pose")?;
        Ok(())
    }
}

/// Per-value overrides from the command line
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// Lateral semi-axis of the front and back corner mounts
    #[arg(long)]
    pub front: Option<f64>,
    /// Longitudinal semi-axis of the front and back corner mounts
    #[arg(long)]
    pub side: Option<f64>,
    /// Lateral offset of the middle mounts
    #[arg(long)]
    pub middle: Option<f64>,
    /// Coxa segment length
    #[arg(long)]
    pub coxa: Option<f64>,
    /// Femur segment length
    #[arg(long)]
    pub femur: Option<f64>,
    /// Tibia segment length
    #[arg(long)]
    pub tibia: Option<f64>,
    /// Body translation along X
    #[arg(long, allow_negative_numbers = true)]
    pub tx: Option<f64>,
    /// Body translation along Y
    #[arg(long, allow_negative_numbers = true)]
    pub ty: Option<f64>,
    /// Body translation along Z
    #[arg(long, allow_negative_numbers = true)]
    pub tz: Option<f64>,
    /// Body rotation about X, in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub rx: Option<f64>,
    /// Body rotation about Y, in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub ry: Option<f64>,
    /// Body rotation about Z, in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub rz: Option<f64>,
}
