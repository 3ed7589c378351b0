mod report;
mod scenario;
mod viewer;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use orbitsim_core::constants::SECONDS_PER_DAY;
use scenario::{Preset, ScenarioConfig};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use viewer::ScenarioSource;

#[derive(Parser)]
#[command(name = "orbitsim")]
#[command(about = "orbitsim - Newtonian orbital mechanics for small systems of bodies", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print the final state
    Run {
        /// Path to the YAML scenario file
        file: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run one of the built-in scenarios
    Preset {
        preset: Preset,
        #[command(flatten)]
        run: RunArgs,
        /// Print the scenario as YAML instead of running it
        #[arg(long)]
        yaml: bool,
    },
    /// List the built-in scenarios
    Presets,
    /// Open the interactive 2-D viewer
    View {
        /// Path to the YAML scenario file, reloaded when it changes
        #[arg(required_unless_present = "preset")]
        file: Option<PathBuf>,
        /// Built-in scenario to view instead of a file
        #[arg(long, conflicts_with = "file")]
        preset: Option<Preset>,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Step length in seconds, overriding the scenario
    #[arg(long)]
    dt: Option<f64>,

    /// Simulated time in seconds, overriding the scenario
    #[arg(long, conflicts_with = "days")]
    duration: Option<f64>,

    /// Simulated time in days, overriding the scenario
    #[arg(long)]
    days: Option<f64>,

    /// Write the snapshot history (.csv for CSV, anything else for YAML)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the energy and angular momentum series as CSV
    #[arg(long)]
    energies: Option<PathBuf>,
}

impl RunArgs {
    fn apply(&self, scenario: &mut ScenarioConfig) {
        if let Some(dt) = self.dt {
            scenario.run.dt = dt;
        }
        if let Some(duration) = self.duration {
            scenario.run.duration = duration;
        }
        if let Some(days) = self.days {
            scenario.run.duration = days * SECONDS_PER_DAY;
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = dispatch(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run { file, run } => {
            let scenario = ScenarioConfig::load(&file)?;
            run_scenario(scenario, &run)
        }
        Commands::Preset { preset, run, yaml } => {
            let mut scenario = preset.scenario();
            if yaml {
                run.apply(&mut scenario);
                print!("{}", scenario.to_yaml()?);
                return Ok(());
            }
            run_scenario(scenario, &run)
        }
        Commands::Presets => {
            for preset in Preset::value_variants() {
                if let Some(value) = preset.to_possible_value() {
                    let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                    println!("{:<20} {}", value.get_name(), help);
                }
            }
            Ok(())
        }
        Commands::View { file, preset } => {
            let source = match (file, preset) {
                (_, Some(preset)) => ScenarioSource::Preset(preset),
                (Some(file), None) => ScenarioSource::File(file),
                (None, None) => anyhow::bail!("give a scenario file or --preset"),
            };
            viewer::run_viewer(source)
        }
    }
}

fn run_scenario(mut scenario: ScenarioConfig, args: &RunArgs) -> Result<()> {
    args.apply(&mut scenario);

    let mut sim = scenario
        .build_simulation()
        .with_context(|| format!("invalid scenario '{}'", scenario.name))?;
    info!(
        "Loaded scenario '{}' with {} bodies",
        scenario.name,
        sim.body_count()
    );

    sim.run(scenario.run.duration, scenario.run.dt)
        .with_context(|| format!("simulation of '{}' stopped", scenario.name))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_status(&mut out, &scenario.name, &sim)?;
    out.flush()?;

    if let Some(path) = &args.output {
        report::export_history(path, &scenario.name, &sim)?;
        info!("History written to {}", path.display());
    }
    if let Some(path) = &args.energies {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        report::write_energy_csv(&mut out, &sim)?;
        out.flush()?;
        info!("Energy series written to {}", path.display());
    }

    Ok(())
}
