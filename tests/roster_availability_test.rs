// ==========================================
// Eligibility and roster availability integration tests
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use league_availability::{ApiError, AvailabilityStatus, PrecedenceTier};
use std::collections::BTreeSet;
use test_helpers::{add_to_roster, date, insert_division, insert_fixture, insert_team, TestEnv};

fn ids<'a>(players: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    players.map(str::to_string).collect()
}

#[test]
fn test_registered_and_rostered_player_appears_once() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;
    let p = env.player("Ana", "Lopez");

    api.add_player_division(&p, league.division_id, league.season_id)
        .unwrap();
    add_to_roster(&env.conn, &p, league.home_team_id, league.season_id, true).unwrap();
    api.set_general_availability(&p, "Thursday", league.season_id, "available", "")
        .unwrap();

    let available = api.available_players_for_fixture(league.fixture_id).unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].player.id, p);
    assert_eq!(available[0].tier, PrecedenceTier::General);
}

#[test]
fn test_available_set_matches_per_player_resolution() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;
    let fixture = league.fixture_id;

    // registered only: weekly Available
    let a = env.player("Ana", "Abbott");
    api.add_player_division(&a, league.division_id, league.season_id)
        .unwrap();
    api.set_general_availability(&a, "Thursday", league.season_id, "available", "")
        .unwrap();

    // rostered only: weekly Available hidden by an Unavailable exception
    let b = env.player("Ben", "Baker");
    add_to_roster(&env.conn, &b, league.away_team_id, league.season_id, true).unwrap();
    api.set_general_availability(&b, "Thursday", league.season_id, "available", "")
        .unwrap();
    api.create_exception(&b, date(2025, 6, 10), date(2025, 6, 14), "unavailable", "")
        .unwrap();

    // rostered: Unavailable exception overridden for the fixture
    let c = env.player("Cleo", "Clark");
    add_to_roster(&env.conn, &c, league.home_team_id, league.season_id, true).unwrap();
    api.create_exception(&c, date(2025, 6, 12), date(2025, 6, 12), "unavailable", "")
        .unwrap();
    api.set_fixture_availability(&c, fixture, "available", "").unwrap();

    // registered: Available exception beaten by an Unavailable override
    let d = env.player("Dev", "Dunn");
    api.add_player_division(&d, league.division_id, league.season_id)
        .unwrap();
    api.create_exception(&d, date(2025, 6, 12), date(2025, 6, 12), "available", "")
        .unwrap();
    api.set_fixture_availability(&d, fixture, "unavailable", "").unwrap();

    // registered: if-needed is not Available
    let e = env.player("Eve", "Ellis");
    api.add_player_division(&e, league.division_id, league.season_id)
        .unwrap();
    api.set_general_availability(&e, "Thursday", league.season_id, "if-needed", "")
        .unwrap();

    // registered: no signals at all
    let f = env.player("Finn", "Ford");
    api.add_player_division(&f, league.division_id, league.season_id)
        .unwrap();

    // not eligible: Available override but no registration or roster spot
    let g = env.player("Gus", "Gray");
    api.set_fixture_availability(&g, fixture, "available", "").unwrap();

    let available = api.available_players_for_fixture(fixture).unwrap();
    let got = ids(available.iter().map(|ap| ap.player.id.as_str()));

    let eligible = [&a, &b, &c, &d, &e, &f];
    let expected: BTreeSet<String> = eligible
        .iter()
        .filter(|p| {
            api.resolve(p.as_str(), fixture).unwrap().status == AvailabilityStatus::Available
        })
        .map(|p| p.to_string())
        .collect();

    assert_eq!(got, expected);
    assert_eq!(got, ids([a.as_str(), c.as_str()].into_iter()));

    let c_entry = available.iter().find(|ap| ap.player.id == c).unwrap();
    assert_eq!(c_entry.tier, PrecedenceTier::Fixture);
}

#[test]
fn test_inactive_roster_entries_are_not_eligible() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;
    let p = env.player("Hana", "Berg");

    add_to_roster(&env.conn, &p, league.home_team_id, league.season_id, false).unwrap();
    api.set_general_availability(&p, "Thursday", league.season_id, "available", "")
        .unwrap();

    assert!(api
        .available_players_for_fixture(league.fixture_id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_other_division_players_are_not_eligible() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;
    let other_division = insert_division(&env.conn, league.season_id, "Division 2").unwrap();
    let other_team = insert_team(&env.conn, other_division, league.season_id, "Hillside C").unwrap();

    let registered = env.player("Ida", "Hill");
    api.add_player_division(&registered, other_division, league.season_id)
        .unwrap();
    let rostered = env.player("Jon", "Vale");
    add_to_roster(&env.conn, &rostered, other_team, league.season_id, true).unwrap();

    for p in [&registered, &rostered] {
        api.set_fixture_availability(p, league.fixture_id, "available", "")
            .unwrap();
    }

    assert!(api
        .available_players_for_fixture(league.fixture_id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_team_roster_lists_every_active_member_with_status() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;

    let zed = env.player("Zed", "Young");
    let amy = env.player("Amy", "Adams");
    let bob = env.player("Bob", "Adams");
    let gone = env.player("Old", "Timer");
    for p in [&zed, &amy, &bob] {
        add_to_roster(&env.conn, p, league.home_team_id, league.season_id, true).unwrap();
    }
    add_to_roster(&env.conn, &gone, league.home_team_id, league.season_id, false).unwrap();

    api.set_fixture_availability(&zed, league.fixture_id, "unavailable", "")
        .unwrap();
    api.set_general_availability(&amy, "Thursday", league.season_id, "if-needed", "")
        .unwrap();

    let roster = api
        .team_roster_availability(league.home_team_id, league.fixture_id)
        .unwrap();
    let names: Vec<(&str, &str)> = roster
        .iter()
        .map(|r| (r.player.first_name.as_str(), r.player.last_name.as_str()))
        .collect();
    assert_eq!(names, vec![("Amy", "Adams"), ("Bob", "Adams"), ("Zed", "Young")]);

    assert_eq!(roster[0].status, AvailabilityStatus::IfNeeded);
    assert_eq!(roster[0].tier, Some(PrecedenceTier::General));
    assert_eq!(roster[1].status, AvailabilityStatus::Unknown);
    assert_eq!(roster[1].tier, None);
    assert_eq!(roster[2].status, AvailabilityStatus::Unavailable);
    assert_eq!(roster[2].tier, Some(PrecedenceTier::Fixture));
}

#[test]
fn test_team_roster_for_unknown_team_is_not_found() {
    let env = TestEnv::new();
    let err = env
        .api()
        .team_roster_availability(777, env.league.fixture_id)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)), "{:?}", err);
}

#[test]
fn test_fixture_date_with_time_component_resolves_by_day() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;
    let evening = insert_fixture(
        &env.conn,
        league.season_id,
        league.division_id,
        league.away_team_id,
        league.home_team_id,
        "2025-06-19 18:30:00",
    )
    .unwrap();

    let p = env.player("Kai", "Lund");
    api.add_player_division(&p, league.division_id, league.season_id)
        .unwrap();
    api.create_exception(&p, date(2025, 6, 19), date(2025, 6, 19), "available", "")
        .unwrap();

    let available = api.available_players_for_fixture(evening).unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].tier, PrecedenceTier::Exception);
}

#[test]
fn test_upcoming_fixtures_carry_player_status() {
    let env = TestEnv::new();
    let api = env.api();
    let league = &env.league;
    let later = insert_fixture(
        &env.conn,
        league.season_id,
        league.division_id,
        league.away_team_id,
        league.home_team_id,
        "2025-06-26",
    )
    .unwrap();
    insert_fixture(
        &env.conn,
        league.season_id,
        league.division_id,
        league.home_team_id,
        league.away_team_id,
        "2025-05-29",
    )
    .unwrap();

    let p = env.player("Lea", "Moor");
    api.set_general_availability(&p, "Thursday", league.season_id, "available", "")
        .unwrap();
    api.set_fixture_availability(&p, later, "unavailable", "wedding")
        .unwrap();

    let fixtures = api
        .fixtures_with_player_availability(league.division_id, &p, date(2025, 6, 1))
        .unwrap();
    let ids: Vec<i64> = fixtures.iter().map(|f| f.fixture.fixture_id).collect();
    assert_eq!(ids, vec![league.fixture_id, later]);
    assert_eq!(fixtures[0].status, AvailabilityStatus::Available);
    assert_eq!(fixtures[1].status, AvailabilityStatus::Unavailable);
    assert_eq!(fixtures[1].tier, Some(PrecedenceTier::Fixture));
}
