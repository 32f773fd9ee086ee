//! hexapod-ik CLI - Hexapod body pose solver
//!
//! Solves the joint angles and joint positions of a six-legged robot for a
//! given body pose and prints them for renderers and telemetry tools.

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use hexapod_ik::{Geometry, solve};
use hexapod_ik_cli::{GeometryReport, Overrides, ReportFormat, RobotInput, report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hexapod-ik",
    about = "Hexapod body pose solver",
    long_about = "Compute coxa, femur and tibia angles and joint positions of a six-legged robot whose feet stay pinned while the body moves"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a pose and print the full configuration
    Solve {
        #[command(flatten)]
        input: InputArgs,
        /// Output file for the configuration
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Solve a pose and print a per-leg joint angle table
    Angles {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print hip mounts and fixed foot points for the dimensions
    Geometry {
        #[command(flatten)]
        input: InputArgs,
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON or YAML file with `dimensions` and `pose` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

impl InputArgs {
    fn resolve(&self) -> Result<RobotInput> {
        RobotInput::resolve(self.config.as_deref(), &self.overrides)
    }
}

fn main() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            input,
            output,
            format,
        } => solve_pose(input, output, &format),
        Commands::Angles { input } => print_angles(input),
        Commands::Geometry { input, format } => print_geometry(input, &format),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn solve_pose(input: InputArgs, output: Option<PathBuf>, format: &str) -> Result<()> {
    let format = ReportFormat::parse(format)?;
    let robot = input.resolve()?;

    let configuration = solve(&robot.dimensions, &robot.pose);
    warn_if_clamped(&configuration);

    if let Some(output) = output {
        format.save_to_file(&configuration, &output)?;
        tracing::info!(path = %output.display(), "configuration saved");
    } else {
        println!("{}", format.render(&configuration)?);
    }

    Ok(())
}

fn print_angles(input: InputArgs) -> Result<()> {
    let robot = input.resolve()?;

    let configuration = solve(&robot.dimensions, &robot.pose);
    warn_if_clamped(&configuration);

    print!("{}", report::telemetry_table(&configuration));
    Ok(())
}

fn print_geometry(input: InputArgs, format: &str) -> Result<()> {
    let format = ReportFormat::parse(format)?;
    let robot = input.resolve()?;

    let geometry = Geometry::new(&robot.dimensions);
    println!("{}", format.render(&GeometryReport::from(&geometry))?);
    Ok(())
}

fn warn_if_clamped(configuration: &hexapod_ik::Configuration) {
    for leg in configuration.legs.iter().filter(|leg| !leg.reachable) {
        tracing::warn!(
            leg = %leg.position,
            "foot target out of reach, angles are a best-effort approximation"
        );
    }
}
