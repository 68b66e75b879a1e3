#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the matching engine using rstest-bdd.

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use rendezvous_core::test_support::ScriptedProvider;
use rendezvous_core::{
    CompanionId, CompanionRequest, Coordinate, Direction, DriverId, DriverRequest, MatchError,
    MatchOutcome, MatchRequest, MatchingEngine, ProviderError, RoadLeg, Role, Route, TravelMode,
};

const OFFICE: Coordinate = Coordinate::new(12.9352, 77.6245);
const HOME_A: Coordinate = Coordinate::new(12.9784, 77.6408);
const HOME_B: Coordinate = Coordinate::new(12.9166, 77.6101);
const STOP_A: Coordinate = Coordinate::new(12.9560, 77.6320);
const STOP_B: Coordinate = Coordinate::new(12.9250, 77.6170);
const FLAT_1: Coordinate = Coordinate::new(12.9571, 77.6331);
const FLAT_2: Coordinate = Coordinate::new(12.9602, 77.6290);
const FLAT_3: Coordinate = Coordinate::new(12.9241, 77.6188);

/// World state for matching scenarios.
#[derive(Debug)]
struct MatchingWorld {
    provider: RefCell<ScriptedProvider>,
    request: RefCell<MatchRequest>,
    outcome: RefCell<Option<Result<MatchOutcome, MatchError>>>,
}

#[fixture]
fn world() -> MatchingWorld {
    MatchingWorld {
        provider: RefCell::new(
            ScriptedProvider::new()
                .with_geocode("Koramangala office", OFFICE)
                .with_geocode("Indiranagar", HOME_A)
                .with_geocode("HSR Layout", HOME_B)
                .with_geocode("Domlur", FLAT_1)
                .with_geocode("Ejipura", FLAT_2)
                .with_geocode("Agara", FLAT_3),
        ),
        request: RefCell::new(MatchRequest {
            direction: Direction::FromOffice,
            office: "Koramangala office".into(),
            drivers: Vec::new(),
            companions: Vec::new(),
        }),
        outcome: RefCell::new(None),
    }
}

fn leg(km: f64, minutes: u64) -> RoadLeg {
    RoadLeg::new(km, Duration::from_secs(minutes * 60), format!("{minutes} mins"))
}

fn script(world: &MatchingWorld, edit: impl FnOnce(ScriptedProvider) -> ScriptedProvider) {
    let provider = world.provider.take();
    world.provider.replace(edit(provider));
}

fn add_driver(world: &MatchingWorld, name: &str, address: &str, capacity: u32) {
    world.request.borrow_mut().drivers.push(DriverRequest {
        name: name.into(),
        address: address.into(),
        capacity,
    });
}

fn add_companion(world: &MatchingWorld, name: &str, address: &str) {
    world
        .request
        .borrow_mut()
        .companions
        .push(CompanionRequest {
            name: name.into(),
            address: address.into(),
        });
}

fn with_outcome(world: &MatchingWorld, check: impl FnOnce(&MatchOutcome)) {
    let borrowed = world.outcome.borrow();
    let outcome = borrowed
        .as_ref()
        .expect("the engine should have run")
        .as_ref()
        .expect("matching should succeed");
    check(outcome);
}

fn carried_by(outcome: &MatchOutcome, driver: &str) -> Vec<String> {
    outcome
        .assignment
        .pickups(&DriverId::new(driver))
        .unwrap_or_default()
        .iter()
        .map(|pickup| pickup.companion.to_string())
        .collect()
}

#[given("two drivers heading home with two seats and one seat")]
fn given_drivers_heading_home(world: &MatchingWorld) {
    world.request.borrow_mut().direction = Direction::FromOffice;
    add_driver(world, "asha", "Indiranagar", 2);
    add_driver(world, "bilal", "HSR Layout", 1);
    script(world, |provider| {
        provider
            .with_route(OFFICE, HOME_A, Route::new(vec![OFFICE, STOP_A, HOME_A], 6.1))
            .with_route(OFFICE, HOME_B, Route::new(vec![OFFICE, STOP_B, HOME_B], 3.4))
    });
}

#[given("three companions near their routes")]
fn given_three_companions(world: &MatchingWorld) {
    add_companion(world, "chitra", "Domlur");
    add_companion(world, "dev", "Ejipura");
    add_companion(world, "esha", "Agara");
    script(world, |provider| {
        provider
            .with_leg(FLAT_1, STOP_A, TravelMode::Walking, leg(1.0, 12))
            .with_leg(FLAT_2, STOP_A, TravelMode::Walking, leg(1.5, 18))
            .with_leg(FLAT_3, STOP_B, TravelMode::Walking, leg(0.5, 6))
            .with_leg(FLAT_2, STOP_B, TravelMode::Walking, leg(2.0, 24))
    });
}

#[given("the second driver has no route home")]
fn given_second_driver_without_route(world: &MatchingWorld) {
    script(world, |provider| {
        provider.with_route_error(
            OFFICE,
            HOME_B,
            ProviderError::RouteUnavailable {
                status: "ZERO_RESULTS".into(),
                message: String::new(),
            },
        )
    });
}

#[given("a fourth companion with an unknown address")]
fn given_unknown_companion(world: &MatchingWorld) {
    add_companion(world, "farah", "Atlantis");
}

#[given("only a companion with an unknown address")]
fn given_only_unknown_companion(world: &MatchingWorld) {
    add_companion(world, "farah", "Atlantis");
}

#[given("two drivers whose homes cannot be found")]
fn given_drivers_without_homes(world: &MatchingWorld) {
    world.request.borrow_mut().direction = Direction::FromOffice;
    add_driver(world, "asha", "Atlantis", 2);
    add_driver(world, "bilal", "Lemuria", 1);
}

#[given("the office cannot be found")]
fn given_unknown_office(world: &MatchingWorld) {
    world.request.borrow_mut().office = "Atlantis HQ".into();
}

#[given("two drivers heading to the office")]
fn given_drivers_heading_to_office(world: &MatchingWorld) {
    world.request.borrow_mut().direction = Direction::ToOffice;
    add_driver(world, "asha", "Indiranagar", 3);
    add_driver(world, "bilal", "HSR Layout", 3);
    script(world, |provider| {
        provider
            .with_route(HOME_A, OFFICE, Route::new(vec![HOME_A, STOP_A, OFFICE], 6.1))
            .with_route(HOME_B, OFFICE, Route::new(vec![HOME_B, STOP_B, OFFICE], 3.4))
    });
}

#[given("one companion who can only reach the first driver in time")]
fn given_companion_reaching_first_driver(world: &MatchingWorld) {
    add_companion(world, "chitra", "Domlur");
    script(world, |provider| {
        provider
            .with_leg(FLAT_1, STOP_A, TravelMode::Driving, leg(1.2, 9))
            .with_leg(FLAT_1, STOP_B, TravelMode::Driving, leg(0.9, 30))
            .with_leg(HOME_A, STOP_A, TravelMode::Driving, leg(2.5, 7))
            .with_leg(HOME_B, STOP_B, TravelMode::Driving, leg(1.0, 4))
    });
}

#[when("the engine matches the request")]
fn when_engine_matches(world: &MatchingWorld) {
    let provider = world.provider.borrow();
    let engine = MatchingEngine::new(&*provider, &*provider);
    let result = engine.run(&world.request.borrow());
    world.outcome.replace(Some(result));
}

#[then("the first driver carries the first and second companions")]
fn then_first_driver_carries_two(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert_eq!(carried_by(outcome, "asha"), vec!["chitra", "dev"]);
    });
}

#[then("the second driver carries the third companion")]
fn then_second_driver_carries_third(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert_eq!(carried_by(outcome, "bilal"), vec!["esha"]);
    });
}

#[then("nobody is left unassigned")]
fn then_nobody_unassigned(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert!(outcome.unassigned().is_empty(), "{:?}", outcome.unassigned());
    });
}

#[then("the second driver is excluded")]
fn then_second_driver_excluded(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert!(
            outcome
                .exclusions
                .iter()
                .any(|exclusion| exclusion.participant == "bilal" && exclusion.role == Role::Driver)
        );
        assert!(!outcome.routes.contains_key(&DriverId::new("bilal")));
    });
}

#[then("the third companion is left unassigned")]
fn then_third_companion_unassigned(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert_eq!(outcome.unassigned(), vec![&CompanionId::new("esha")]);
    });
}

#[then("the fourth companion is excluded")]
fn then_fourth_companion_excluded(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert_eq!(outcome.exclusions.len(), 1);
        let exclusion = &outcome.exclusions[0];
        assert_eq!(exclusion.participant, "farah");
        assert_eq!(exclusion.role, Role::Companion);
        assert!(!outcome.companions.contains_key(&CompanionId::new("farah")));
    });
}

#[then("the assignment is empty")]
fn then_assignment_empty(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert!(outcome.assignment.is_empty());
        assert_eq!(outcome.exclusions.len(), 1);
    });
}

#[then("both drivers are excluded")]
fn then_both_drivers_excluded(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        let excluded: Vec<(&str, Role)> = outcome
            .exclusions
            .iter()
            .map(|exclusion| (exclusion.participant.as_str(), exclusion.role))
            .collect();
        assert_eq!(excluded, vec![("asha", Role::Driver), ("bilal", Role::Driver)]);
        assert!(outcome.drivers.is_empty());
    });
}

#[then("the office is excluded")]
fn then_office_excluded(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert_eq!(outcome.office, None);
        assert_eq!(outcome.exclusions.len(), 1);
        assert_eq!(outcome.exclusions[0].participant, "Atlantis HQ");
        assert_eq!(outcome.exclusions[0].role, Role::Office);
    });
}

#[then("every companion is left unassigned")]
fn then_every_companion_unassigned(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert!(outcome.assignment.is_empty());
        assert!(outcome.routes.is_empty());
        assert_eq!(outcome.unassigned().len(), 3);
    });
}

#[then("the first driver carries the companion")]
fn then_first_driver_carries_companion(world: &MatchingWorld) {
    with_outcome(world, |outcome| {
        assert_eq!(carried_by(outcome, "asha"), vec!["chitra"]);
        assert!(outcome.assignment.pickups(&DriverId::new("bilal")).is_none());
    });
}

#[scenario(path = "tests/features/matching.feature", index = 0)]
fn drivers_share_seats_greedily(world: MatchingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matching.feature", index = 1)]
fn driver_without_route_is_excluded(world: MatchingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matching.feature", index = 2)]
fn ungeocodable_companion_is_excluded(world: MatchingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matching.feature", index = 3)]
fn all_companions_excluded(world: MatchingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matching.feature", index = 4)]
fn closest_feasible_driver_on_the_way_to_work(world: MatchingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matching.feature", index = 5)]
fn all_drivers_excluded(world: MatchingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matching.feature", index = 6)]
fn ungeocodable_office_is_excluded(world: MatchingWorld) {
    let _ = world;
}
