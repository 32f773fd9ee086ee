//! Report generation module
//!
//! Renders solver output as JSON, YAML, or a plain-text telemetry table.

use color_eyre::eyre::{Context, eyre};
use hexapod_ik::{Configuration, Geometry, LegPosition, Point3};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::Result;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl ReportFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
        }
    }

    /// Parse format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "yaml" | "yml" => Some(ReportFormat::Yaml),
            _ => None,
        }
    }

    /// Parse a user-supplied format name
    pub fn parse(format: &str) -> Result<Self> {
        Self::from_extension(format).ok_or_else(|| {
            eyre!(
                "Unsupported format '{}'. Supported formats: json, yaml",
                format
            )
        })
    }

    /// Serialize any report in this format
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            ReportFormat::Json => {
                serde_json::to_string_pretty(value).context("Failed to serialize report to JSON")
            }
            ReportFormat::Yaml => {
                serde_yaml::to_string(value).context("Failed to serialize report to YAML")
            }
        }
    }

    /// Serialize a report and write it to a file
    pub fn save_to_file<T: Serialize, P: AsRef<Path>>(&self, value: &T, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.render(value)?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        Ok(())
    }
}

/// Mount and ground contact of one leg, angles in degrees
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MountReport {
    pub leg: LegPosition,
    pub hip: Point3<f64>,
    pub mount_angle: f64,
    pub fixed_foot: Point3<f64>,
}

/// Body geometry for one set of dimensions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeometryReport {
    pub legs: Vec<MountReport>,
}

impl From<&Geometry> for GeometryReport {
    fn from(geometry: &Geometry) -> Self {
        let legs = geometry
            .mounts
            .iter()
            .zip(geometry.fixed_feet.iter())
            .map(|(mount, foot)| MountReport {
                leg: mount.position,
                hip: mount.hip,
                mount_angle: mount.mount_angle.to_degrees(),
                fixed_foot: *foot,
            })
            .collect();
        Self { legs }
    }
}

/// Render per-leg joint angles as an aligned text table
pub fn telemetry_table(configuration: &Configuration) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{:<14}{:>10}{:>10}{:>10}  {}",
        "leg", "coxa", "femur", "tibia", "reach"
    );
    for leg in configuration.legs.iter() {
        let _ = writeln!(
            output,
            "{:<14}{:>10.2}{:>10.2}{:>10.2}  {}",
            leg.position.name(),
            leg.angles.coxa,
            leg.angles.femur,
            leg.angles.tibia,
            if leg.reachable { "ok" } else { "clamped" }
        );
    }

    output
}
