//! Plan command implementation for the Stopline CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use stopline_core::{
    DelayPerStop, GeocodeClient, GeocodeError, ItineraryView, MapView, NavigationLinkBuilder,
    RouteOptimizer, SequencingEngine, SequencingReport, StopStore, add_stop,
};
use stopline_data::{
    DEFAULT_NOMINATIM_URL, DEFAULT_OSRM_PROFILE, NominatimGeocoder, OsrmTripOptimizer,
};

use crate::{
    ARG_PLAN_DELAY, ARG_PLAN_NOMINATIM_URL, ARG_PLAN_OSRM_PROFILE, ARG_PLAN_OSRM_URL,
    ARG_PLAN_SKIP_UNRESOLVED, ARG_PLAN_STOPS_FILE, CliError, ENV_PLAN_STOPS_FILE, fs,
};

/// OSRM instance used when no base URL is configured.
pub(crate) const DEFAULT_OSRM_URL: &str = "http://localhost:5000";

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode every address in a stops file, order the stops \
                 through an OSRM Trip service starting from the first line, \
                 and print the itinerary with arrival times and map data as \
                 JSON.",
    about = "Plan an itinerary from a list of addresses"
)]
#[ortho_config(prefix = "STOPLINE")]
pub(crate) struct PlanArgs {
    /// File with one address per line. Blank lines and comment lines (`#`
    /// followed by a space) are skipped.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) stops_file: Option<Utf8PathBuf>,
    /// Minutes spent at each stop, from 0 to 30.
    #[arg(long = ARG_PLAN_DELAY, value_name = "minutes", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) delay: Option<i64>,
    /// Base URL of the Nominatim-compatible geocoder.
    #[arg(long = ARG_PLAN_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Base URL of the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_OSRM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_url: Option<String>,
    /// OSRM routing profile.
    #[arg(long = ARG_PLAN_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Drop addresses that cannot be geocoded instead of failing.
    #[arg(long = ARG_PLAN_SKIP_UNRESOLVED)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) skip_unresolved: bool,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the stops file.
    pub(crate) stops_file: Utf8PathBuf,
    /// Dwell time applied at every stop.
    pub(crate) delay: DelayPerStop,
    /// Geocoder base URL.
    pub(crate) nominatim_url: String,
    /// OSRM base URL.
    pub(crate) osrm_url: String,
    /// OSRM routing profile.
    pub(crate) osrm_profile: String,
    /// Whether unresolved addresses are dropped.
    pub(crate) skip_unresolved: bool,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.stops_file, ARG_PLAN_STOPS_FILE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::ReadStops {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let stops_file = args.stops_file.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_STOPS_FILE,
            env: ENV_PLAN_STOPS_FILE,
        })?;
        let delay = DelayPerStop::new(args.delay.unwrap_or_default())?;

        Ok(Self {
            stops_file,
            delay,
            nominatim_url: args
                .nominatim_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned()),
            osrm_url: args.osrm_url.unwrap_or_else(|| DEFAULT_OSRM_URL.to_owned()),
            osrm_profile: args
                .osrm_profile
                .unwrap_or_else(|| DEFAULT_OSRM_PROFILE.to_owned()),
            skip_unresolved: args.skip_unresolved,
        })
    }
}

/// Builds the external service clients for a plan invocation.
pub(super) trait PlanServiceBuilder {
    fn geocoder(&self, config: &PlanConfig) -> Result<Box<dyn GeocodeClient>, CliError>;
    fn optimizer(&self, config: &PlanConfig) -> Result<Box<dyn RouteOptimizer>, CliError>;
}

pub(super) struct HttpPlanServiceBuilder;

impl PlanServiceBuilder for HttpPlanServiceBuilder {
    fn geocoder(&self, config: &PlanConfig) -> Result<Box<dyn GeocodeClient>, CliError> {
        let geocoder = NominatimGeocoder::new(config.nominatim_url.clone()).map_err(|source| {
            CliError::BuildProvider {
                service: "geocoding",
                base_url: config.nominatim_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }

    fn optimizer(&self, config: &PlanConfig) -> Result<Box<dyn RouteOptimizer>, CliError> {
        let optimizer = OsrmTripOptimizer::new(config.osrm_url.clone())
            .map_err(|source| CliError::BuildProvider {
                service: "routing",
                base_url: config.osrm_url.clone(),
                source,
            })?
            .with_profile(config.osrm_profile.clone());
        Ok(Box::new(optimizer))
    }
}

/// JSON document printed by `stopline plan`.
#[derive(Debug, Serialize)]
pub(crate) struct PlanOutput {
    /// Local time the run started, which is the first stop's ETA.
    pub(crate) started_at: String,
    /// Stops in visiting order with arrival labels.
    pub(crate) itinerary: ItineraryView,
    /// Markers, route line and bounds for a map surface.
    pub(crate) map: MapView,
    /// Addresses dropped because they could not be geocoded.
    pub(crate) skipped: Vec<String>,
}

impl PlanOutput {
    fn render(store: &StopStore, report: &SequencingReport, skipped: Vec<String>) -> Self {
        Self {
            started_at: report.started_at.format("%Y-%m-%d %H:%M").to_string(),
            itinerary: ItineraryView::render(store, &NavigationLinkBuilder::default()),
            map: MapView::render(store),
            skipped,
        }
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = HttpPlanServiceBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let output = execute_plan(&config, builder)?;
    write_plan_output(writer, &output)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanServiceBuilder,
) -> Result<PlanOutput, CliError> {
    let addresses = load_stops(&config.stops_file)?;
    let geocoder = builder.geocoder(config)?;

    let mut store = StopStore::new();
    store.set_delay_per_stop(i64::from(config.delay.minutes()))?;
    for address in &addresses {
        let added = add_stop(&mut store, geocoder.as_ref(), address)?;
        if let Err(source @ GeocodeError::Transient(_)) = added.geocode {
            return Err(CliError::GeocodeUnavailable {
                address: address.clone(),
                source,
            });
        }
    }
    let skipped = settle_unresolved(&mut store, config.skip_unresolved)?;

    let optimizer = builder.optimizer(config)?;
    let engine = SequencingEngine::new(optimizer.as_ref());
    let report = engine.run(&mut store)?;
    info!(
        "planned {} stop(s) from {}",
        report.order.len(),
        config.stops_file
    );
    Ok(PlanOutput::render(&store, &report, skipped))
}

/// Fail on stops the geocoder found no match for, or drop them when `skip`
/// is set.
fn settle_unresolved(store: &mut StopStore, skip: bool) -> Result<Vec<String>, CliError> {
    let unresolved = store.unresolved_ids();
    if unresolved.is_empty() {
        return Ok(Vec::new());
    }
    let addresses: Vec<String> = unresolved
        .iter()
        .filter_map(|id| store.get(*id))
        .map(|stop| stop.address().to_owned())
        .collect();
    if !skip {
        return Err(CliError::UnresolvedStops { addresses });
    }
    for id in unresolved {
        store.remove(id)?;
    }
    warn!(
        "skipping {} stop(s) that could not be geocoded",
        addresses.len()
    );
    Ok(addresses)
}

/// Read addresses from a stops file, one per line.
pub(super) fn load_stops(path: &Utf8Path) -> Result<Vec<String>, CliError> {
    let contents = fs::read_utf8_file(path).map_err(|source| CliError::ReadStops {
        path: path.to_path_buf(),
        source,
    })?;
    let addresses: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !is_blank_or_comment(line))
        .map(str::to_owned)
        .collect();
    if addresses.is_empty() {
        return Err(CliError::NoStops {
            path: path.to_path_buf(),
        });
    }
    Ok(addresses)
}

/// Comments are a lone `#` or `#` followed by whitespace, so addresses such
/// as `#4 Unit Road` are kept.
fn is_blank_or_comment(line: &str) -> bool {
    match line.strip_prefix('#') {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => line.is_empty(),
    }
}

fn write_plan_output(writer: &mut dyn Write, output: &PlanOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
