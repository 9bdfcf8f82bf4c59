//! Skullsweep CLI
//!
//! Command-line surface over the planning core.
//!
//! # Commands
//!
//! - `plan`: compute the entry point and insertion length for a target and
//!   print a textual summary
//! - `resolve`: resolve all records against the ultimate reference and
//!   print the table as delimited text

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use skullsweep::geometry::{project_at_angles, resolve, EntryAngles, Target};
use skullsweep::io::load_table;
use skullsweep::report::PlanSummary;

/// Stereotactic implant trajectory planning
#[derive(Parser)]
#[command(name = "skullsweep")]
#[command(version)]
#[command(about = "Plan stereotactic implant trajectories from skull-sweep tables")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the entry point and insertion length for a target
    Plan(PlanArgs),
    /// Resolve all records and print the resolved table
    Resolve(ResolveArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Path to the point table (comma-delimited, header row)
    data: PathBuf,

    /// Target record id, e.g. "VTA"
    target: String,

    /// Entry angle in the sagittal plane, degrees
    #[arg(long, default_value_t = 0.0)]
    yz_angle: f64,

    /// Entry angle in the coronal plane, degrees
    #[arg(long, default_value_t = 0.0)]
    xz_angle: f64,

    /// Measure the yz angle from the posteroanterior axis instead of the
    /// inferosuperior axis
    #[arg(long)]
    pa_style_angle: bool,

    /// Ultimate reference landmark all coordinates are resolved against
    #[arg(long, default_value = "bregma")]
    reference: String,

    /// Also print the augmented point table after the summary
    #[arg(long)]
    table: bool,
}

#[derive(Args)]
struct ResolveArgs {
    /// Path to the point table (comma-delimited, header row)
    data: PathBuf,

    /// Ultimate reference landmark all coordinates are resolved against
    #[arg(long, default_value = "bregma")]
    reference: String,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(command: Commands) -> skullsweep::Result<()> {
    match command {
        Commands::Plan(args) => {
            let raw = load_table(&args.data)?;
            let resolved = resolve(&raw, &args.reference)?;
            let angles = if args.pa_style_angle {
                EntryAngles::from_posteroanterior(args.yz_angle, args.xz_angle)
            } else {
                EntryAngles::new(args.yz_angle, args.xz_angle)
            };
            let target = Target::Id(args.target.clone());
            let (trajectory, augmented) = project_at_angles(&resolved, &target, &angles)?;
            print!(
                "{}",
                PlanSummary::new(
                    args.target.as_str(),
                    args.reference.as_str(),
                    angles,
                    trajectory
                )
            );
            if args.table {
                println!();
                print!("{}", augmented.to_delimited());
            }
        }
        Commands::Resolve(args) => {
            let raw = load_table(&args.data)?;
            let resolved = resolve(&raw, &args.reference)?;
            print!("{}", resolved.to_delimited());
        }
    }
    Ok(())
}
