//! Command-line interface for planning a delivery itinerary.
//!
//! `stopline plan <stops-file>` geocodes one address per line, sequences the
//! stops through an OSRM Trip service and prints the itinerary and map views
//! as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_STOPS_FILE: &str = "stops-file";
pub(crate) const ARG_PLAN_DELAY: &str = "delay";
pub(crate) const ARG_PLAN_NOMINATIM_URL: &str = "nominatim-url";
pub(crate) const ARG_PLAN_OSRM_URL: &str = "osrm-url";
pub(crate) const ARG_PLAN_OSRM_PROFILE: &str = "osrm-profile";
pub(crate) const ARG_PLAN_SKIP_UNRESOLVED: &str = "skip-unresolved";
pub(crate) const ENV_PLAN_STOPS_FILE: &str = "STOPLINE_CMDS_PLAN_STOPS_FILE";

/// Run the Stopline CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// stops file cannot be read, a service adapter cannot be built, sequencing
/// fails, or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "stopline",
    about = "Sequence delivery stops and estimate arrival times",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode and sequence the stops listed in a file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
