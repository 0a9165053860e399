//! Test helpers for writing stops files and stubbing the external services.

use super::*;
use crate::plan::{PlanConfig, PlanServiceBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use stopline_core::test_support::{StubGeocoder, StubOptimizer};
use stopline_core::{GeocodeClient, LatLng, RouteOptimizer};
use tempfile::TempDir;

/// Addresses the stub geocoder can resolve, with their coordinates.
pub(super) const KNOWN_STOPS: [(&str, LatLng); 3] = [
    ("1 Depot Road", LatLng::new(49.28, -123.12)),
    ("22 Bakery Lane", LatLng::new(49.26, -123.10)),
    ("333 Florist Ave", LatLng::new(49.25, -123.14)),
];

/// An address the stub geocoder cannot resolve.
pub(super) const UNKNOWN_STOP: &str = "1 Atlantis Way";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary directory holding a stops file.
#[derive(Debug)]
pub(super) struct StopsFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl StopsFile {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            _dir: dir,
            path: root.join("stops.txt"),
        }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn write_lines(&self, lines: &[&str]) {
        let mut contents = lines.join("\n");
        contents.push('\n');
        write_utf8(&self.path, contents.as_bytes());
    }
}

pub(super) fn stub_geocoder() -> StubGeocoder {
    KNOWN_STOPS
        .iter()
        .fold(StubGeocoder::new(), |geocoder, (address, point)| {
            geocoder.with_match(*address, *point)
        })
}

/// Hands out stub services instead of HTTP clients.
#[derive(Debug, Clone)]
pub(super) struct StubPlanServiceBuilder {
    pub(super) geocoder: StubGeocoder,
    pub(super) optimizer: StubOptimizer,
}

impl Default for StubPlanServiceBuilder {
    fn default() -> Self {
        Self {
            geocoder: stub_geocoder(),
            optimizer: StubOptimizer::identity(),
        }
    }
}

impl PlanServiceBuilder for StubPlanServiceBuilder {
    fn geocoder(&self, _config: &PlanConfig) -> Result<Box<dyn GeocodeClient>, CliError> {
        Ok(Box::new(self.geocoder.clone()))
    }

    fn optimizer(&self, _config: &PlanConfig) -> Result<Box<dyn RouteOptimizer>, CliError> {
        Ok(Box::new(self.optimizer.clone()))
    }
}
