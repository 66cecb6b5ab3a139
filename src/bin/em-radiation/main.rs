//! em-radiation command-line interface.
//!
//! Run an engine directly or from a TOML job file; the result is printed as JSON:
//! ```sh
//! em-radiation spectrum --lg-b 3 --pretty
//! em-radiation field --time-index 25 --output field.json
//! em-radiation run job.toml
//! em-radiation validate job.toml
//! ```

mod config;
mod runner;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use em_radiation::fields::FieldParams;
use em_radiation::projectile::ProjectileParams;
use em_radiation::simulation::Simulation;
use em_radiation::synchrotron::SpectrumParams;

#[derive(Parser)]
#[command(name = "em-radiation")]
#[command(about = "Synchrotron spectra and retarded fields of moving charges")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Write the JSON result to this file instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    /// Indent the JSON result.
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchrotron spectrum of a broken power-law electron population.
    Spectrum(SpectrumArgs),
    /// Field magnitude of an oscillating charge on the observation grid.
    Field(FieldArgs),
    /// Drag-free projectile trajectory.
    Projectile(ProjectileArgs),
    /// Run a simulation from a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Validate a job file and its parameters without running it.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
}

#[derive(Args)]
struct SpectrumArgs {
    /// log10 of the minimum electron energy (eV).
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    lg_emin: f64,
    /// log10 of the break energy (eV).
    #[arg(long, default_value_t = 9.0, allow_negative_numbers = true)]
    lg_eb: f64,
    /// log10 of the maximum electron energy (eV).
    #[arg(long, default_value_t = 12.0, allow_negative_numbers = true)]
    lg_emax: f64,
    /// Spectral index below the break.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    p: f64,
    /// Index change across the break.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    dp: f64,
    /// log10 of the break smoothness.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lg_s: f64,
    /// log10 of the cutoff sharpness.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lg_chi: f64,
    /// log10 of the magnetic field (G).
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    lg_b: f64,
    /// log10 of the single highlighted electron energy, used when at most one is shown (eV).
    #[arg(long, default_value_t = 8.0, allow_negative_numbers = true)]
    lg_e_delta: f64,
    /// Number of highlighted single-electron spectra.
    #[arg(long, default_value_t = 1)]
    num_visible_electrons: usize,
    /// log10 of the integration points per decade.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    lg_integration_resolution: f64,
}

impl From<SpectrumArgs> for SpectrumParams {
    fn from(a: SpectrumArgs) -> Self {
        Self {
            lg_emin: a.lg_emin,
            lg_eb: a.lg_eb,
            lg_emax: a.lg_emax,
            p: a.p,
            dp: a.dp,
            lg_s: a.lg_s,
            lg_chi: a.lg_chi,
            lg_b: a.lg_b,
            lg_e_delta: a.lg_e_delta,
            num_visible_electrons: a.num_visible_electrons,
            lg_integration_resolution: a.lg_integration_resolution,
        }
    }
}

#[derive(Args)]
struct FieldArgs {
    /// Sample of the oscillation period to render (0..100).
    #[arg(long, default_value_t = 0)]
    time_index: usize,
    /// log10 of βγ at peak speed.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    lg_gamma: f64,
    /// x amplitude as a fraction of a quarter window.
    #[arg(long, default_value_t = 0.1)]
    frac_amplitude_x: f64,
    /// y amplitude as a fraction of a quarter window.
    #[arg(long, default_value_t = 0.1)]
    frac_amplitude_y: f64,
    /// Field lines drawn by the plotter.
    #[arg(long, default_value_t = 20)]
    num_trajectory_lines: usize,
    /// log10 of the colour-scale ceiling (V/m).
    #[arg(long, default_value_t = -24.0, allow_negative_numbers = true)]
    lg_field_ceiling: f64,
}

impl From<FieldArgs> for FieldParams {
    fn from(a: FieldArgs) -> Self {
        Self {
            time_index: a.time_index,
            lg_gamma: a.lg_gamma,
            frac_amplitude_x: a.frac_amplitude_x,
            frac_amplitude_y: a.frac_amplitude_y,
            num_trajectory_lines: a.num_trajectory_lines,
            lg_field_ceiling: a.lg_field_ceiling,
        }
    }
}

#[derive(Args)]
struct ProjectileArgs {
    /// Launch elevation in degrees.
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true)]
    angle: f64,
    /// Launch speed (m/s).
    #[arg(long, default_value_t = 20.0)]
    speed: f64,
}

impl From<ProjectileArgs> for ProjectileParams {
    fn from(a: ProjectileArgs) -> Self {
        Self { angle_deg: a.angle, speed: a.speed }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (simulation, output, pretty) = match cli.command {
        Commands::Spectrum(args) => (Simulation::Spectrum(args.into()), cli.output, cli.pretty),
        Commands::Field(args) => (Simulation::Field(args.into()), cli.output, cli.pretty),
        Commands::Projectile(args) => (Simulation::Projectile(args.into()), cli.output, cli.pretty),
        Commands::Run { config } => {
            let job = config::load_config(&config)?;
            log::info!("job {}: {} engine", config.display(), job.simulation.name());
            (job.simulation, cli.output.or(job.output.path), cli.pretty || job.output.pretty)
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.simulation.validate()?;
            println!("Configuration is valid: {} ({} engine)", config.display(), job.simulation.name());
            return Ok(());
        }
    };

    let json = runner::run_simulation(&simulation, pretty)?;
    runner::write_output(&json, output.as_deref())
}
