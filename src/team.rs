use serde::Serialize;

use crate::batting::top_run_scorers;
use crate::bowling::top_wicket_takers;
use crate::dataset::{Dataset, MatchRecord};
use crate::error::{QueryResult, require};
use crate::rank::{Ranked, count_values, percentage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord {
    pub team: String,
    pub total_matches: u64,
    pub wins: u64,
    pub win_pct: f64,
    pub avg_runs_per_match: f64,
    pub avg_wickets_per_match: f64,
    pub top_batter: Option<Ranked<u64>>,
    pub top_bowler: Option<Ranked<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub team_a: String,
    pub team_b: String,
    pub matches: Vec<MatchRecord>,
    /// Wins per team, most first. Teams without a win are absent.
    pub wins: Vec<Ranked<u64>>,
    pub no_result: u64,
}

impl HeadToHead {
    pub fn wins_for(&self, team: &str) -> u64 {
        self.wins
            .iter()
            .find(|r| r.name == team)
            .map(|r| r.value)
            .unwrap_or(0)
    }
}

/// Wins per team across every match. No-result rows are ignored.
pub fn overall_wins(dataset: &Dataset) -> Vec<Ranked<u64>> {
    count_values(dataset.matches.iter().filter_map(|m| m.winner.as_deref()))
}

pub fn toss_decisions(dataset: &Dataset) -> Vec<Ranked<u64>> {
    count_values(
        dataset
            .matches
            .iter()
            .map(|m| m.toss_decision.label())
            .filter(|label| !label.is_empty()),
    )
}

/// Averages divide all of the team's delivery totals by its match count.
pub fn team_record(dataset: &Dataset, team: &str) -> QueryResult<TeamRecord> {
    let team = require(team, "team")?;

    let mut total_matches = 0u64;
    let mut wins = 0u64;
    for m in dataset.matches.iter().filter(|m| m.involves(team)) {
        total_matches += 1;
        if m.won_by(team) {
            wins += 1;
        }
    }

    let batting = dataset
        .deliveries
        .iter()
        .filter(|d| d.batting_team == team)
        .collect::<Vec<_>>();
    let bowling = dataset
        .deliveries
        .iter()
        .filter(|d| d.bowling_team == team)
        .collect::<Vec<_>>();

    let total_runs: u64 = batting.iter().map(|d| u64::from(d.total_runs)).sum();
    let total_wickets = bowling.iter().filter(|d| d.is_bowler_wicket()).count() as u64;

    Ok(TeamRecord {
        team: team.to_string(),
        total_matches,
        wins,
        win_pct: percentage(wins, total_matches),
        avg_runs_per_match: per_match(total_runs, total_matches),
        avg_wickets_per_match: per_match(total_wickets, total_matches),
        top_batter: top_run_scorers(batting.iter().copied(), 1).into_iter().next(),
        top_bowler: top_wicket_takers(bowling.iter().copied(), 1)
            .into_iter()
            .next(),
    })
}

fn per_match(total: u64, matches: u64) -> f64 {
    if matches == 0 {
        0.0
    } else {
        total as f64 / matches as f64
    }
}

pub fn head_to_head(dataset: &Dataset, team_a: &str, team_b: &str) -> QueryResult<HeadToHead> {
    let team_a = require(team_a, "team_a")?;
    let team_b = require(team_b, "team_b")?;
    let matches = dataset
        .matches
        .iter()
        .filter(|m| m.is_between(team_a, team_b))
        .cloned()
        .collect::<Vec<_>>();
    let wins = count_values(matches.iter().filter_map(|m| m.winner.as_deref()));
    let no_result = matches.iter().filter(|m| m.winner.is_none()).count() as u64;
    Ok(HeadToHead {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        matches,
        wins,
        no_result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DeliveryRecord, DismissalKind, TossDecision};
    use crate::error::QueryError;

    fn m(id: u64, t1: &str, t2: &str, winner: Option<&str>, toss: TossDecision) -> MatchRecord {
        MatchRecord {
            id,
            season: "2020".to_string(),
            date: None,
            venue: "X".to_string(),
            team1: t1.to_string(),
            team2: t2.to_string(),
            toss_winner: t1.to_string(),
            toss_decision: toss,
            winner: winner.map(str::to_string),
            player_of_match: None,
        }
    }

    fn d(bat: &str, bowl: &str, batter: &str, bowler: &str, runs: u32, out: Option<DismissalKind>) -> DeliveryRecord {
        DeliveryRecord {
            match_id: 1,
            batting_team: bat.to_string(),
            bowling_team: bowl.to_string(),
            batter: batter.to_string(),
            bowler: bowler.to_string(),
            ball: "1".to_string(),
            batsman_runs: runs,
            total_runs: runs + 1,
            dismissal_kind: out,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                m(1, "A", "B", Some("A"), TossDecision::Field),
                m(2, "B", "A", Some("B"), TossDecision::Bat),
                m(3, "A", "C", None, TossDecision::Field),
                m(4, "C", "B", Some("C"), TossDecision::Field),
            ],
            vec![
                d("A", "B", "a1", "b1", 4, None),
                d("A", "B", "a2", "b1", 0, Some(DismissalKind::Bowled)),
                d("B", "A", "b2", "a3", 6, Some(DismissalKind::RunOut)),
            ],
        )
    }

    #[test]
    fn record_counts_matches_and_averages() {
        let ds = sample();
        let rec = team_record(&ds, "A").unwrap();
        assert_eq!(rec.total_matches, 3);
        assert_eq!(rec.wins, 1);
        assert!((rec.win_pct - 100.0 / 3.0).abs() < 1e-9);
        assert!((rec.avg_runs_per_match - 6.0 / 3.0).abs() < 1e-9);
        assert_eq!(rec.avg_wickets_per_match, 0.0);
        assert_eq!(rec.top_batter, Some(Ranked::new("a1", 4u64)));
        assert_eq!(rec.top_bowler, None);
    }

    #[test]
    fn unknown_team_is_all_zero() {
        let rec = team_record(&sample(), "Nobody").unwrap();
        assert_eq!(rec.total_matches, 0);
        assert_eq!(rec.win_pct, 0.0);
        assert_eq!(rec.avg_runs_per_match, 0.0);
        assert!(rec.top_batter.is_none());
    }

    #[test]
    fn blank_team_is_rejected() {
        assert_eq!(
            team_record(&sample(), " "),
            Err(QueryError::MissingParameter("team"))
        );
    }

    #[test]
    fn head_to_head_counts_both_slots() {
        let h2h = head_to_head(&sample(), "B", "A").unwrap();
        assert_eq!(h2h.matches.len(), 2);
        assert_eq!(h2h.wins_for("A"), 1);
        assert_eq!(h2h.wins_for("B"), 1);
        assert_eq!(h2h.no_result, 0);
    }

    #[test]
    fn overall_wins_and_toss() {
        let ds = sample();
        let wins = overall_wins(&ds);
        assert_eq!(wins.iter().map(|r| r.value).sum::<u64>(), 3);
        let toss = toss_decisions(&ds);
        assert_eq!(toss[0], Ranked::new("field", 3u64));
        assert_eq!(toss[1], Ranked::new("bat", 1u64));
    }

    #[test]
    fn missing_toss_decisions_are_not_counted() {
        let ds = Dataset::new(
            vec![
                m(1, "A", "B", Some("A"), TossDecision::parse("NA")),
                m(2, "A", "B", Some("A"), TossDecision::parse("")),
                m(3, "A", "B", Some("B"), TossDecision::parse("bat")),
            ],
            Vec::new(),
        );
        assert_eq!(toss_decisions(&ds), vec![Ranked::new("bat", 1u64)]);
    }
}
