//! Behavioural tests for [`BlockingOsrm`].
//!
//! These tests use [`StubTransport`] to verify behaviour without requiring a
//! running OSRM server.

use osrm_client::test_support::StubTransport;
use osrm_client::{BlockingOsrm, ClientConfig, OsrmError, RequestMethod, TransportError};
use osrm_core::params::{Destination, Roundtrip, Source};
use osrm_core::response::Route;
use osrm_core::service::{RouteRequest, TripRequest};
use osrm_core::{ErrorCode, Path, RequestError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Outcome of a route or trip call, reduced to the routes it produced.
type OutcomeCell = RefCell<Option<Result<Vec<Route>, OsrmError>>>;

const ONE_ROUTE: &str = r#"{
    "code": "Ok",
    "routes": [{"distance": 1886.3, "duration": 250.6, "geometry": "w{_tlAnb_clCfEz@zJf@", "legs": []}],
    "trips": [],
    "waypoints": []
}"#;

#[fixture]
fn transport() -> RefCell<Option<StubTransport>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

fn berlin() -> Path {
    Path::from_lon_lat(&[(13.388_86, 52.517_037), (13.397_634, 52.529_407)])
}

fn client(transport: &RefCell<Option<StubTransport>>) -> BlockingOsrm {
    let guard = transport.borrow();
    let stub = guard.as_ref().expect("transport must be initialised");
    BlockingOsrm::with_transport(ClientConfig::default(), stub.clone())
        .expect("client should build")
}

// --- Given steps ---

#[given("an OSRM server returning one route")]
fn server_ok(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::with_json(200, ONE_ROUTE));
}

#[given("an OSRM server reporting no route")]
fn server_no_route(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::with_json(
        400,
        r#"{"code":"NoRoute","message":"Impossible route between points"}"#,
    ));
}

#[given("an OSRM server failing with an internal error")]
fn server_internal_error(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::with_reply(500, "worker crashed"));
}

#[given("an OSRM server that times out")]
fn server_timeout(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::timing_out());
}

// --- When steps ---

#[when("I request a driving route between two points")]
fn request_route(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    let osrm = client(transport);
    let result = osrm
        .route(&RouteRequest::new("car", berlin()))
        .map(|response| response.routes);
    *outcome.borrow_mut() = Some(result);
}

#[when("I request a one-way trip from any point to any point")]
fn request_unpinned_trip(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    let osrm = client(transport);
    let mut request = TripRequest::new("car", berlin());
    request.roundtrip = Roundtrip::False;
    request.source = Source::Any;
    request.destination = Destination::Any;
    *outcome.borrow_mut() = Some(osrm.trip(&request).map(|response| response.trips));
}

// --- Then steps ---

#[then("one route with its decoded geometry is returned")]
fn then_one_route(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    let routes = borrowed
        .as_ref()
        .expect("a call must have been made")
        .as_ref()
        .expect("expected Ok result");
    let route = routes.first().expect("one route");
    assert!((route.distance - 1886.3).abs() < f64::EPSILON);
    assert_eq!(route.geometry.as_ref().map(Path::len), Some(3));
}

#[then("exactly one GET call was sent")]
fn then_one_get(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    let guard = transport.borrow();
    let calls = guard.as_ref().expect("transport must be initialised").calls();
    assert_eq!(calls.len(), 1, "calls: {calls:?}");
    assert!(calls.iter().all(|call| call.method == RequestMethod::Get));
}

#[then("a NoRoute error is returned")]
fn then_no_route(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    let code = borrowed
        .as_ref()
        .and_then(|result| result.as_ref().err())
        .and_then(OsrmError::api_code);
    assert_eq!(code, Some(&ErrorCode::NoRoute), "got {borrowed:?}");
}

#[then("an unexpected status error carrying the body is returned")]
fn then_unexpected_status(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(OsrmError::Transport(TransportError::UnexpectedStatus { status: 500, body, .. })))
                if body == "worker crashed"
        ),
        "expected UnexpectedStatus, got {borrowed:?}"
    );
}

#[then("a timeout error is returned")]
fn then_timeout(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(OsrmError::Transport(TransportError::Timeout { .. })))
        ),
        "expected Timeout, got {borrowed:?}"
    );
}

#[then("the trip is rejected without calling the server")]
fn then_trip_rejected(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(OsrmError::Request(RequestError::Unsupported { .. })))
        ),
        "expected Unsupported, got {borrowed:?}"
    );
    let guard = transport.borrow();
    let stub = guard.as_ref().expect("transport must be initialised");
    assert!(stub.calls().is_empty());
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/osrm_services.feature", name = $title)]
        fn $fn_name(transport: RefCell<Option<StubTransport>>, outcome: OutcomeCell) {
            let _ = (transport, outcome);
        }
    };
}

register_scenario!(fetching_route, "fetching a route from a healthy server");
register_scenario!(reporting_no_route, "reporting an impossible route");
register_scenario!(
    keeping_unexpected_body,
    "keeping the body of an unexpected status"
);
register_scenario!(timing_out, "timing out");
register_scenario!(rejecting_unsupported_trip, "refusing an unsupported trip locally");
