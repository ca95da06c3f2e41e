use ipl_terminal::batting::{player_batting, top_strike_rates};
use ipl_terminal::bowling::best_economy;
use ipl_terminal::compare::compare_teams;
use ipl_terminal::dataset::{Dataset, DeliveryRecord, DismissalKind, MatchRecord, TossDecision};
use ipl_terminal::duel::player_vs_player;
use ipl_terminal::awards::season_awards;
use ipl_terminal::error::QueryError;
use ipl_terminal::filter::{MatchFilter, filter_deliveries};
use ipl_terminal::rank::Ranked;
use ipl_terminal::synthetic::synthetic_dataset;
use ipl_terminal::team::{head_to_head, team_record};

fn match_row(id: u64, season: &str, t1: &str, t2: &str, winner: Option<&str>, venue: &str) -> MatchRecord {
    MatchRecord {
        id,
        season: season.to_string(),
        date: None,
        venue: venue.to_string(),
        team1: t1.to_string(),
        team2: t2.to_string(),
        toss_winner: t1.to_string(),
        toss_decision: TossDecision::Field,
        winner: winner.map(str::to_string),
        player_of_match: None,
    }
}

fn delivery(match_id: u64, batter: &str, bowler: &str, runs: u32, out: Option<DismissalKind>) -> DeliveryRecord {
    DeliveryRecord {
        match_id,
        batting_team: "A".to_string(),
        bowling_team: "B".to_string(),
        batter: batter.to_string(),
        bowler: bowler.to_string(),
        ball: "1".to_string(),
        batsman_runs: runs,
        total_runs: runs,
        dismissal_kind: out,
    }
}

#[test]
fn single_match_scenario() {
    let ds = Dataset::new(
        vec![match_row(1, "2020", "A", "B", Some("A"), "X")],
        vec![
            delivery(1, "P1", "Q1", 6, None),
            delivery(1, "P1", "Q1", 4, None),
        ],
    );

    let p1 = player_batting(&ds, "P1").unwrap();
    assert_eq!(p1.runs, 10);
    assert_eq!(p1.balls_faced, 2);
    assert_eq!(p1.strike_rate, 500.0);
    assert_eq!(p1.sixes, 1);
    assert_eq!(p1.fours, 1);

    let a = team_record(&ds, "A").unwrap();
    assert_eq!(a.total_matches, 1);
    assert_eq!(a.wins, 1);
    assert_eq!(a.win_pct, 100.0);
}

#[test]
fn empty_duel_is_all_zero() {
    let ds = Dataset::new(
        vec![match_row(1, "2020", "A", "B", Some("A"), "X")],
        vec![delivery(1, "P1", "Q1", 6, None)],
    );
    let duel = player_vs_player(&ds, "P1", "Nobody").unwrap();
    assert_eq!(duel.balls, 0);
    assert_eq!(duel.runs, 0);
    assert_eq!(duel.strike_rate, 0.0);
    assert_eq!(duel.dismissals, 0);
}

#[test]
fn duel_requires_both_players_on_the_same_ball() {
    let ds = Dataset::new(
        Vec::new(),
        vec![
            delivery(1, "P1", "Q1", 4, None),
            delivery(1, "P1", "Q2", 6, None),
            delivery(1, "P2", "Q1", 6, None),
            delivery(1, "P1", "Q1", 0, Some(DismissalKind::Stumped)),
            delivery(1, "P1", "Q1", 0, Some(DismissalKind::RunOut)),
        ],
    );
    let duel = player_vs_player(&ds, "P1", "Q1").unwrap();
    assert_eq!(duel.balls, 3);
    assert_eq!(duel.runs, 4);
    assert_eq!(duel.fours, 1);
    assert_eq!(duel.sixes, 0);
    assert_eq!(duel.dismissals, 1);
    assert!((duel.strike_rate - 400.0 / 3.0).abs() < 1e-9);
}

#[test]
fn strike_rate_threshold_excludes_short_innings() {
    // B1: 300 balls at 50; B2: 150 balls at 90.
    let mut rows = Vec::new();
    for i in 0..300 {
        rows.push(delivery(1, "B1", "Q", if i % 2 == 0 { 1 } else { 0 }, None));
    }
    for i in 0..150 {
        rows.push(delivery(1, "B2", "Q", if i % 10 == 9 { 0 } else { 1 }, None));
    }
    let ranked = top_strike_rates(&rows, 200, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name, "B1");
}

#[test]
fn economy_never_reports_non_finite_values() {
    let ds = synthetic_dataset(11, 2, 20);
    let rows = best_economy(&ds.deliveries, 0, usize::MAX);
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.value.is_finite()));
    assert!(rows.windows(2).all(|w| w[0].value <= w[1].value));
}

#[test]
fn team_win_pct_is_bounded_for_every_team() {
    let ds = synthetic_dataset(3, 3, 40);
    for team in ds.teams() {
        let rec = team_record(&ds, &team).unwrap();
        assert!(rec.wins <= rec.total_matches);
        assert!((0.0..=100.0).contains(&rec.win_pct));
    }
}

#[test]
fn head_to_head_is_symmetric() {
    let ds = synthetic_dataset(5, 2, 40);
    let teams = ds.teams();
    let ab = head_to_head(&ds, &teams[0], &teams[1]).unwrap();
    let ba = head_to_head(&ds, &teams[1], &teams[0]).unwrap();
    assert_eq!(ab.matches, ba.matches);
    assert_eq!(ab.wins_for(&teams[0]), ba.wins_for(&teams[0]));
    assert_eq!(
        ab.wins_for(&teams[0]) + ab.wins_for(&teams[1]) + ab.no_result,
        ab.matches.len() as u64
    );
}

#[test]
fn queries_are_idempotent() {
    let ds = synthetic_dataset(9, 2, 30);
    let teams = ds.teams();
    let first = compare_teams(&ds, &teams[0], &teams[1]).unwrap();
    let second = compare_teams(&ds, &teams[0], &teams[1]).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.a.avg_runs_per_match.to_bits(),
        second.a.avg_runs_per_match.to_bits()
    );
}

#[test]
fn comparing_a_team_with_itself_is_rejected() {
    let ds = synthetic_dataset(9, 1, 10);
    let team = ds.teams()[0].clone();
    assert_eq!(
        compare_teams(&ds, &team, &team),
        Err(QueryError::SameTeam(team.clone()))
    );
    assert_eq!(
        compare_teams(&ds, "", &team),
        Err(QueryError::MissingParameter("team_a"))
    );
}

#[test]
fn orphan_deliveries_never_join() {
    let ds = Dataset::new(
        vec![match_row(1, "2020", "A", "B", Some("A"), "X")],
        vec![
            delivery(1, "P1", "Q1", 1, None),
            delivery(99, "P1", "Q1", 6, None),
        ],
    );
    assert_eq!(ds.orphan_delivery_count(), 1);
    let joined = filter_deliveries(&ds, &MatchFilter::new().season("2020"));
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].batsman_runs, 1);
    // Unjoined per-player stats still see every row.
    assert_eq!(player_batting(&ds, "P1").unwrap().balls_faced, 2);
}

#[test]
fn awards_are_scoped_to_the_season() {
    let mut matches = vec![
        match_row(1, "2019", "A", "B", Some("A"), "X"),
        match_row(2, "2020", "A", "B", Some("B"), "X"),
        match_row(3, "2020", "A", "B", Some("A"), "X"),
        match_row(4, "2020", "A", "B", None, "X"),
    ];
    matches[0].player_of_match = Some("Dhoni".to_string());
    matches[1].player_of_match = Some("Rohit".to_string());
    matches[2].player_of_match = Some("Dhoni".to_string());
    let ds = Dataset::new(matches, Vec::new());

    let awards = season_awards(&ds, "2020", 5).unwrap();
    assert_eq!(
        awards,
        vec![Ranked::new("Rohit", 1u64), Ranked::new("Dhoni", 1u64)]
    );
    assert!(season_awards(&ds, "1999", 5).unwrap().is_empty());
    assert_eq!(
        season_awards(&ds, "", 5),
        Err(QueryError::MissingParameter("season"))
    );
}
