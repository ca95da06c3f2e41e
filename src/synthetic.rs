use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{Dataset, DeliveryRecord, DismissalKind, MatchRecord, TossDecision};

const TEAMS: &[(&str, &str)] = &[
    ("Chennai Super Kings", "CSK"),
    ("Mumbai Indians", "MI"),
    ("Kolkata Knight Riders", "KKR"),
    ("Royal Challengers Bangalore", "RCB"),
    ("Rajasthan Royals", "RR"),
    ("Sunrisers Hyderabad", "SRH"),
    ("Delhi Capitals", "DC"),
    ("Punjab Kings", "PBKS"),
];

const VENUES: &[&str] = &[
    "Wankhede Stadium",
    "Eden Gardens",
    "M Chinnaswamy Stadium",
    "MA Chidambaram Stadium",
    "Sawai Mansingh Stadium",
    "Rajiv Gandhi International Stadium",
    "Arun Jaitley Stadium",
    "Punjab Cricket Association Stadium",
];

const SQUAD_SIZE: usize = 11;
const BALLS_PER_INNINGS: u32 = 120;
const FIRST_BOWLER_SLOT: usize = 6;

/// Reproducible random league for demos and benches. Every delivery points
/// at an existing match.
pub fn synthetic_dataset(seed: u64, seasons: u32, matches_per_season: u32) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matches = Vec::new();
    let mut deliveries = Vec::new();
    let mut next_id = 1u64;

    for season_idx in 0..seasons {
        let season = (2008 + season_idx).to_string();
        for _ in 0..matches_per_season {
            let id = next_id;
            next_id += 1;

            let home = rng.gen_range(0..TEAMS.len());
            let mut away = rng.gen_range(0..TEAMS.len() - 1);
            if away >= home {
                away += 1;
            }
            let team1 = TEAMS[home].0;
            let team2 = TEAMS[away].0;

            let toss_winner = if rng.gen_bool(0.5) { team1 } else { team2 };
            let toss_decision = if rng.gen_bool(0.6) {
                TossDecision::Field
            } else {
                TossDecision::Bat
            };
            let bats_first = match (&toss_decision, toss_winner == team1) {
                (TossDecision::Bat, true) | (TossDecision::Field, false) => home,
                _ => away,
            };
            let bats_second = if bats_first == home { away } else { home };

            let first = simulate_innings(&mut rng, id, bats_first, bats_second, &mut deliveries);
            let second = simulate_innings(&mut rng, id, bats_second, bats_first, &mut deliveries);

            let winner_idx = if rng.gen_bool(0.03) {
                None
            } else if first > second {
                Some(bats_first)
            } else if second > first {
                Some(bats_second)
            } else if rng.gen_bool(0.5) {
                Some(bats_first)
            } else {
                Some(bats_second)
            };
            let player_of_match =
                winner_idx.map(|idx| player_name(idx, rng.gen_range(0..SQUAD_SIZE)));

            matches.push(MatchRecord {
                id,
                season: season.clone(),
                date: chrono::NaiveDate::from_ymd_opt(2008 + season_idx as i32, 4, 1)
                    .and_then(|d| d.checked_add_days(chrono::Days::new(id % 50))),
                venue: VENUES[rng.gen_range(0..VENUES.len())].to_string(),
                team1: team1.to_string(),
                team2: team2.to_string(),
                toss_winner: toss_winner.to_string(),
                toss_decision,
                winner: winner_idx.map(|idx| TEAMS[idx].0.to_string()),
                player_of_match,
            });
        }
    }

    Dataset::new(matches, deliveries)
}

fn simulate_innings(
    rng: &mut StdRng,
    match_id: u64,
    batting: usize,
    bowling: usize,
    out: &mut Vec<DeliveryRecord>,
) -> u64 {
    let mut striker = 0usize;
    let mut wickets = 0usize;
    let mut total = 0u64;

    for ball_no in 0..BALLS_PER_INNINGS {
        if wickets >= SQUAD_SIZE - 1 {
            break;
        }
        let over = (ball_no / 6) as usize;
        let bowler_slot = FIRST_BOWLER_SLOT + over % (SQUAD_SIZE - FIRST_BOWLER_SLOT);

        let batsman_runs = match rng.gen_range(0..100) {
            0..=34 => 0,
            35..=69 => 1,
            70..=79 => 2,
            80..=81 => 3,
            82..=94 => 4,
            _ => 6,
        };
        let extras = u32::from(rng.gen_bool(0.05));
        let dismissal_kind = if batsman_runs == 0 && rng.gen_bool(0.15) {
            Some(random_dismissal(rng))
        } else {
            None
        };

        out.push(DeliveryRecord {
            match_id,
            batting_team: TEAMS[batting].0.to_string(),
            bowling_team: TEAMS[bowling].0.to_string(),
            batter: player_name(batting, striker),
            bowler: player_name(bowling, bowler_slot),
            ball: format!("{over}.{}", ball_no % 6 + 1),
            batsman_runs,
            total_runs: batsman_runs + extras,
            dismissal_kind: dismissal_kind.clone(),
        });
        total += u64::from(batsman_runs + extras);

        if dismissal_kind.is_some() {
            wickets += 1;
            striker = wickets + 1;
        } else if batsman_runs % 2 == 1 {
            striker = if striker == wickets { wickets + 1 } else { wickets };
        }
        striker = striker.min(SQUAD_SIZE - 1);
    }
    total
}

fn random_dismissal(rng: &mut StdRng) -> DismissalKind {
    match rng.gen_range(0..20) {
        0..=9 => DismissalKind::Caught,
        10..=12 => DismissalKind::Bowled,
        13..=14 => DismissalKind::Lbw,
        15..=16 => DismissalKind::RunOut,
        17 => DismissalKind::Stumped,
        18 => DismissalKind::CaughtAndBowled,
        _ => DismissalKind::HitWicket,
    }
}

fn player_name(team: usize, slot: usize) -> String {
    format!("{} Player {}", TEAMS[team].1, slot + 1)
}
