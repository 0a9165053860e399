//! Behavioural tests for [`NominatimGeocoder`] and [`OsrmTripOptimizer`].
//!
//! Each scenario runs the adapter against a loopback server that serves one
//! canned response, so the full request and decoding path is exercised
//! without a real geocoding or routing service.

mod support;

use std::cell::RefCell;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use stopline_core::{
    GeocodeClient, GeocodeError, LatLng, OptimizeError, OptimizedTrip, RouteOptimizer,
    TransportError,
};
use stopline_data::{NominatimGeocoder, OsrmTripOptimizer};

use support::OneShotServer;

const ADDRESS: &str = "10 Main St, Vancouver";

#[derive(Default)]
struct AdapterWorld {
    server: Option<OneShotServer>,
    request_target: Option<String>,
    geocoded: Option<Result<LatLng, GeocodeError>>,
    optimised: Option<Result<OptimizedTrip, OptimizeError>>,
}

impl AdapterWorld {
    fn base_url(&self) -> String {
        self.server
            .as_ref()
            .map(|server| server.base_url.clone())
            .expect("server must be started")
    }

    fn finish_request(&mut self) {
        let server = self.server.take().expect("server must be started");
        self.request_target = Some(server.request_target());
    }
}

#[fixture]
fn world() -> RefCell<AdapterWorld> {
    RefCell::new(AdapterWorld::default())
}

// --- Given steps ---

#[given("a search service that knows the address")]
fn search_match(#[from(world)] world: &RefCell<AdapterWorld>) {
    world.borrow_mut().server = Some(OneShotServer::respond(
        "200 OK",
        r#"[{"lat": "49.2827", "lon": "-123.1207", "display_name": "10 Main St"}]"#,
    ));
}

#[given("a search service with no matches")]
fn search_empty(#[from(world)] world: &RefCell<AdapterWorld>) {
    world.borrow_mut().server = Some(OneShotServer::respond("200 OK", "[]"));
}

#[given("a search service answering with a server error")]
fn search_failing(#[from(world)] world: &RefCell<AdapterWorld>) {
    world.borrow_mut().server = Some(OneShotServer::respond(
        "503 Service Unavailable",
        r#"{"error": "overloaded"}"#,
    ));
}

#[given("a trip service that visits the last stop second")]
fn trip_reordering(#[from(world)] world: &RefCell<AdapterWorld>) {
    world.borrow_mut().server = Some(OneShotServer::respond(
        "200 OK",
        r#"{
            "code": "Ok",
            "trips": [{
                "geometry": {"type": "LineString", "coordinates": [[-123.12, 49.28], [-123.14, 49.25], [-123.10, 49.26]]},
                "distance": 5321.4,
                "duration": 611.2
            }],
            "waypoints": [
                {"waypoint_index": 0, "trips_index": 0, "location": [-123.12, 49.28]},
                {"waypoint_index": 2, "trips_index": 0, "location": [-123.10, 49.26]},
                {"waypoint_index": 1, "trips_index": 0, "location": [-123.14, 49.25]}
            ]
        }"#,
    ));
}

#[given("a trip service that rejects the request")]
fn trip_rejecting(#[from(world)] world: &RefCell<AdapterWorld>) {
    world.borrow_mut().server = Some(OneShotServer::respond(
        "400 Bad Request",
        r#"{"code": "NoTrips", "message": "No trip visiting all destinations possible."}"#,
    ));
}

// --- When steps ---

#[when("I geocode the Main Street depot")]
fn geocode(#[from(world)] world: &RefCell<AdapterWorld>) {
    let mut state = world.borrow_mut();
    let geocoder = NominatimGeocoder::new(state.base_url()).expect("geocoder should build");
    state.geocoded = Some(geocoder.resolve(ADDRESS));
    state.finish_request();
}

#[when("I optimise three stops from a fixed start")]
fn optimise(#[from(world)] world: &RefCell<AdapterWorld>) {
    let mut state = world.borrow_mut();
    let optimizer = OsrmTripOptimizer::new(state.base_url()).expect("optimiser should build");
    let stops = [
        LatLng::new(49.28, -123.12),
        LatLng::new(49.26, -123.10),
        LatLng::new(49.25, -123.14),
    ];
    state.optimised = Some(optimizer.optimize(&stops, true));
    state.finish_request();
}

// --- Then steps ---

#[then("the coordinate of the first match is returned")]
fn first_match(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    assert_eq!(state.geocoded, Some(Ok(LatLng::new(49.2827, -123.1207))));
}

#[then("the address was sent form encoded")]
fn form_encoded(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    assert_eq!(
        state.request_target.as_deref(),
        Some("/search?format=json&limit=1&q=10+Main+St%2C+Vancouver")
    );
}

#[then("a not found error is returned")]
fn not_found(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    assert_eq!(
        state.geocoded,
        Some(Err(GeocodeError::NotFound {
            address: ADDRESS.to_owned()
        }))
    );
}

#[then("a transient HTTP error is returned")]
fn transient_http(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    assert!(
        matches!(
            state.geocoded,
            Some(Err(GeocodeError::Transient(TransportError::Http {
                status: 503,
                ..
            })))
        ),
        "expected a transient HTTP 503, got {:?}",
        state.geocoded
    );
}

#[then("the visiting order is first, last, middle")]
fn visiting_order(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    let trip = state
        .optimised
        .as_ref()
        .and_then(|outcome| outcome.as_ref().ok())
        .expect("optimisation should succeed");
    assert_eq!(trip.permutation, vec![0, 2, 1]);
}

#[then("the trip geometry is in longitude and latitude order")]
fn wire_geometry(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    let trip = state
        .optimised
        .as_ref()
        .and_then(|outcome| outcome.as_ref().ok())
        .expect("optimisation should succeed");
    assert_eq!(trip.geometry.0.first(), Some(&Coord { x: -123.12, y: 49.28 }));
    assert_eq!(trip.geometry.0.len(), 3);
}

#[then("the trip request fixes the first stop")]
fn fixed_source(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    assert_eq!(
        state.request_target.as_deref(),
        Some(
            "/trip/v1/driving/-123.12,49.28;-123.1,49.26;-123.14,49.25?source=first&roundtrip=false&overview=full&geometries=geojson"
        )
    );
}

#[then("a service error with code NoTrips is returned")]
fn service_error(#[from(world)] world: &RefCell<AdapterWorld>) {
    let state = world.borrow();
    match &state.optimised {
        Some(Err(OptimizeError::Service { code, message })) => {
            assert_eq!(code, "NoTrips");
            assert_eq!(message, "No trip visiting all destinations possible.");
        }
        other => panic!("expected a service error, got {other:?}"),
    }
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/http_adapters.feature", name = $title)]
        fn $fn_name(world: RefCell<AdapterWorld>) {
            let _ = world;
        }
    };
}

register_scenario!(
    geocoding_known_address,
    "geocoding an address through the search service"
);
register_scenario!(
    geocoding_unknown_address,
    "geocoding an address the search service does not know"
);
register_scenario!(
    geocoding_failing_service,
    "geocoding while the search service is failing"
);
register_scenario!(
    optimising_three_stops,
    "optimising three stops through the trip service"
);
register_scenario!(surfacing_trip_rejection, "surfacing a trip service rejection");
