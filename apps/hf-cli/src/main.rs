mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::{CliError, CliResult};
use hf_components::{FittingCatalog, MaterialCatalog};
use hf_core::units::{UnitSystem, m};
use hf_project::ProjectInputs;
use hf_solver::sample_curves;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HeadFlow CLI - pump and pipe operating point solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and references
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Find the operating point and print the pressure profile
    Solve {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Units for printed values
        #[arg(long, value_enum, default_value_t = Units::Si)]
        units: Units,
        /// Print every Nth node of the profile
        #[arg(long, default_value_t = 100)]
        stride: usize,
        /// Print the whole solution as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Tabulate the pump and system curves up to the pump's flow bound
    Curves {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Number of evenly spaced flow samples
        #[arg(long, default_value_t = 21)]
        samples: usize,
        /// Units for printed values
        #[arg(long, value_enum, default_value_t = Units::Si)]
        units: Units,
    },
    /// List built-in pipe materials and fittings
    Catalog,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    Si,
    Us,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Si => UnitSystem::Si,
            Units::Us => UnitSystem::Us,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve {
            project_path,
            units,
            stride,
            json,
        } => cmd_solve(&project_path, units.into(), stride, json),
        Commands::Curves {
            project_path,
            samples,
            units,
        } => cmd_curves(&project_path, samples, units.into()),
        Commands::Catalog => cmd_catalog(),
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = hf_project::load(project_path)?;
    let inputs = ProjectInputs::from_project(&project)?;
    println!("✓ Project is valid ({} mesh nodes)", inputs.mesh.len());
    Ok(())
}

fn cmd_solve(project_path: &Path, units: UnitSystem, stride: usize, json: bool) -> CliResult<()> {
    if stride == 0 {
        return Err(CliError::InvalidArg("stride must be at least 1".to_string()));
    }

    let project = hf_project::load(project_path)?;
    let inputs = ProjectInputs::from_project(&project)?;
    info!(project = %project.name, nodes = inputs.mesh.len(), "solving");
    let mut solver = inputs.solver()?;
    let solution = solver.solve()?;

    if json {
        let out = serde_json::to_string_pretty(solution).map_err(|source| CliError::Encode {
            path: project_path.to_path_buf(),
            source,
        })?;
        println!("{out}");
        return Ok(());
    }

    let mesh = &inputs.mesh;
    let op = &solution.operating_point;
    println!("Project: {}", project.name);
    println!(
        "  Pipe: {} long, {} bore, {} nodes",
        units.format_length(mesh.total_length()),
        units.format_bore(mesh.diameter()),
        mesh.len()
    );
    println!("Operating point:");
    println!("  Flow:        {}", units.format_flow(op.flow));
    println!("  Velocity:    {}", units.format_velocity(op.velocity));
    println!("  Pump head:   {}", units.format_length(op.pump_head));
    println!("  System head: {}", units.format_length(op.system_head));

    println!("Pressure profile ({units}):");
    println!(
        "  {:>14}  {:>14}  {:>16}  {:>14}",
        "position", "elevation", "pressure", "head"
    );
    let heads = solution.pressure.head(&inputs.config);
    let last = mesh.len() - 1;
    for i in (0..mesh.len()).filter(|&i| i % stride == 0 || i == last) {
        println!(
            "  {:>14}  {:>14}  {:>16}  {:>14}",
            units.format_length(m(mesh.position()[i])),
            units.format_length(m(mesh.elevation()[i])),
            units.format_pressure(solution.pressure.pressure[i]),
            units.format_length(m(heads[i])),
        );
    }
    Ok(())
}

fn cmd_curves(project_path: &Path, samples: usize, units: UnitSystem) -> CliResult<()> {
    let project = hf_project::load(project_path)?;
    let inputs = ProjectInputs::from_project(&project)?;
    let curve = sample_curves(
        &inputs.mesh,
        &inputs.config,
        inputs.curve.as_ref(),
        inputs.max_flow,
        samples,
    )?;

    println!("Pump and system curves for {} ({units}):", project.name);
    println!("  {:>16}  {:>12}  {:>12}", "flow", "pump", "system");
    for s in &curve {
        let marker = if s.system_head >= s.pump_head { " *" } else { "" };
        println!(
            "  {:>16}  {:>12}  {:>12}{marker}",
            units.format_flow(s.flow),
            units.format_length(s.pump_head),
            units.format_length(s.system_head),
        );
    }
    Ok(())
}

fn cmd_catalog() -> CliResult<()> {
    println!("Materials:");
    println!("  {:<18} {:<28} {:>6} {:>12}", "id", "name", "C", "roughness");
    for material in MaterialCatalog::builtin().iter() {
        println!(
            "  {:<18} {:<28} {:>6.0} {:>10.2e} m",
            material.id, material.display_name, material.hazen_williams_c, material.roughness_m
        );
    }

    println!("Fittings:");
    println!("  {:<20} {:<30} {:>6}", "id", "name", "K");
    for fitting in FittingCatalog::builtin().iter() {
        println!(
            "  {:<20} {:<30} {:>6.2}",
            fitting.id, fitting.display_name, fitting.k
        );
    }
    Ok(())
}
