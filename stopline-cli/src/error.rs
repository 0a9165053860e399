//! Error types emitted by the Stopline CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use stopline_core::{
    DelayOutOfRange, GeocodeError, IntakeError, SequencingError, StopStoreError,
};
use stopline_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Stopline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The configured delay per stop is out of range.
    #[error(transparent)]
    InvalidDelay(#[from] DelayOutOfRange),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the input.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the input.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// Reading the stops file failed.
    #[error("failed to read stops file {path:?}: {source}")]
    ReadStops {
        /// Path of the stops file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The stops file lists no addresses.
    #[error("stops file {path:?} contains no addresses")]
    NoStops {
        /// Path of the stops file.
        path: Utf8PathBuf,
    },
    /// Some addresses could not be geocoded.
    #[error(
        "could not geocode {} address(es): {} (pass --skip-unresolved to plan without them)",
        .addresses.len(),
        .addresses.join("; ")
    )]
    UnresolvedStops {
        /// Addresses without a coordinate, in file order.
        addresses: Vec<String>,
    },
    /// The geocoding service failed for a reason other than a missing match.
    #[error("geocoding service unavailable while resolving {address:?}: {source}")]
    GeocodeUnavailable {
        /// Address whose lookup failed.
        address: String,
        /// Underlying transient failure.
        #[source]
        source: GeocodeError,
    },
    /// Constructing a service adapter failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildProvider {
        /// Which service the adapter talks to.
        service: &'static str,
        /// Configured base URL.
        base_url: String,
        /// Underlying construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Adding a stop was rejected.
    #[error(transparent)]
    Intake(#[from] IntakeError),
    /// Updating the itinerary failed.
    #[error(transparent)]
    Store(#[from] StopStoreError),
    /// The sequencing run failed.
    #[error("sequencing failed: {0}")]
    Sequencing(#[from] SequencingError),
    /// Serialising the plan failed.
    #[error("failed to serialise plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
