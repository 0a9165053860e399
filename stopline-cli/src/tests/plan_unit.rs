//! Focused unit tests covering plan configuration and stops file parsing.

use super::helpers::{
    KNOWN_STOPS, StopsFile, StubPlanServiceBuilder, UNKNOWN_STOP, stub_geocoder,
};
use super::*;
use crate::plan::{
    DEFAULT_OSRM_URL, PlanArgs, PlanConfig, config_from_layers_for_test, execute_plan, load_stops,
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use stopline_core::test_support::StubOptimizer;
use stopline_core::{DelayPerStop, GeocodeError, TransportError};

#[fixture]
fn stops_file() -> StopsFile {
    StopsFile::new()
}

fn config_for(path: &camino::Utf8Path) -> PlanConfig {
    PlanConfig::try_from(PlanArgs {
        stops_file: Some(path.to_path_buf()),
        ..PlanArgs::default()
    })
    .expect("config should build")
}

#[rstest]
fn converting_plan_without_stops_file_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing stops file");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_STOPS_FILE);
            assert_eq!(env, ENV_PLAN_STOPS_FILE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults() {
    let config = config_for(camino::Utf8Path::new("stops.txt"));

    assert_eq!(config.stops_file, Utf8PathBuf::from("stops.txt"));
    assert_eq!(config.delay, DelayPerStop::default());
    assert_eq!(config.nominatim_url, "https://nominatim.openstreetmap.org");
    assert_eq!(config.osrm_url, DEFAULT_OSRM_URL);
    assert_eq!(config.osrm_profile, "driving");
    assert!(!config.skip_unresolved);
}

#[rstest]
#[case(-1)]
#[case(31)]
fn out_of_range_delay_is_rejected(#[case] minutes: i64) {
    let args = PlanArgs {
        stops_file: Some(Utf8PathBuf::from("stops.txt")),
        delay: Some(minutes),
        ..PlanArgs::default()
    };
    let err = PlanConfig::try_from(args).expect_err("delay out of range");
    match err {
        CliError::InvalidDelay(source) => assert_eq!(source.minutes, minutes),
        other => panic!("expected InvalidDelay, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_stops_file(stops_file: StopsFile) {
    let config = config_for(stops_file.path());
    let err = config.validate_sources().expect_err("file was never written");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_PLAN_STOPS_FILE);
            assert_eq!(path.as_path(), stops_file.path());
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn load_stops_skips_blank_lines_and_comments(stops_file: StopsFile) {
    stops_file.write_lines(&[
        "# morning run",
        "  1 Depot Road  ",
        "",
        "22 Bakery Lane",
        "   # closed on Mondays",
        "#",
        "#4 Unit Road",
    ]);

    let addresses = load_stops(stops_file.path()).expect("stops should load");

    assert_eq!(
        addresses,
        vec!["1 Depot Road", "22 Bakery Lane", "#4 Unit Road"]
    );
}

#[rstest]
fn load_stops_rejects_file_without_addresses(stops_file: StopsFile) {
    stops_file.write_lines(&["# nothing yet", ""]);
    let err = load_stops(stops_file.path()).expect_err("no addresses");
    assert!(matches!(err, CliError::NoStops { .. }));
}

#[rstest]
fn execute_plan_orders_and_stamps_every_stop(stops_file: StopsFile) {
    let addresses: Vec<&str> = KNOWN_STOPS.iter().map(|(address, _)| *address).collect();
    stops_file.write_lines(&addresses);
    let builder = StubPlanServiceBuilder {
        optimizer: StubOptimizer::with_permutation(vec![0, 2, 1]),
        ..StubPlanServiceBuilder::default()
    };

    let output = execute_plan(&config_for(stops_file.path()), &builder).expect("plan succeeds");

    let ordered: Vec<&str> = output
        .itinerary
        .rows
        .iter()
        .map(|row| row.address.as_str())
        .collect();
    assert_eq!(ordered, vec![KNOWN_STOPS[0].0, KNOWN_STOPS[2].0, KNOWN_STOPS[1].0]);
    assert!(output.itinerary.rows.iter().all(|row| row.eta.is_some()));
    assert_eq!(output.map.markers.len(), 3);
    assert!(output.skipped.is_empty());
}

#[rstest]
#[case(false)]
#[case(true)]
fn execute_plan_handles_unresolved_addresses(stops_file: StopsFile, #[case] skip: bool) {
    stops_file.write_lines(&[KNOWN_STOPS[0].0, UNKNOWN_STOP, KNOWN_STOPS[1].0]);
    let config = PlanConfig {
        skip_unresolved: skip,
        ..config_for(stops_file.path())
    };

    let outcome = execute_plan(&config, &StubPlanServiceBuilder::default());

    if skip {
        let output = outcome.expect("unresolved stops are skipped");
        assert_eq!(output.skipped, vec![UNKNOWN_STOP]);
        assert_eq!(output.itinerary.rows.len(), 2);
    } else {
        match outcome {
            Err(CliError::UnresolvedStops { addresses }) => {
                assert_eq!(addresses, vec![UNKNOWN_STOP]);
            }
            other => panic!("expected UnresolvedStops, found {other:?}"),
        }
    }
}

#[rstest]
#[case(false)]
#[case(true)]
fn execute_plan_fails_on_transient_geocoding_errors(stops_file: StopsFile, #[case] skip: bool) {
    stops_file.write_lines(&[KNOWN_STOPS[0].0, KNOWN_STOPS[1].0]);
    let outage = GeocodeError::Transient(TransportError::Timeout {
        url: "http://geocoder.test/search".to_owned(),
        timeout_secs: 30,
    });
    let builder = StubPlanServiceBuilder {
        geocoder: stub_geocoder().with_failure(KNOWN_STOPS[1].0, outage.clone()),
        ..StubPlanServiceBuilder::default()
    };
    let config = PlanConfig {
        skip_unresolved: skip,
        ..config_for(stops_file.path())
    };

    let err = execute_plan(&config, &builder).expect_err("outage is not skippable");

    match err {
        CliError::GeocodeUnavailable { address, source } => {
            assert_eq!(address, KNOWN_STOPS[1].0);
            assert_eq!(source, outage);
        }
        other => panic!("expected GeocodeUnavailable, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "stops_file": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "stops_file": "from-file.txt",
            "osrm_url": "http://from-file:5000",
            "delay": 10,
        }),
        None,
    );
    composer.push_environment(json!({
        "stops_file": "from-env.txt",
        "delay": 15,
    }));
    composer.push_cli(json!({
        "delay": 5,
        "skip_unresolved": true,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.stops_file, Utf8PathBuf::from("from-env.txt"));
    assert_eq!(config.osrm_url, "http://from-file:5000");
    assert_eq!(config.delay.minutes(), 5);
    assert!(config.skip_unresolved);
}
