use serde::Serialize;

use crate::dataset::{Dataset, DeliveryRecord};
use crate::error::{QueryResult, require};
use crate::rank::{OrderedGroups, Ranked, rank_ascending, rank_descending, top_n};

pub const DEFAULT_MIN_BALLS_BOWLED: u64 = 300;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerBowlingStats {
    pub balls_bowled: u64,
    pub runs_conceded: u64,
    pub wickets: u64,
    /// Runs per six-ball over. `None` until a ball has been bowled.
    pub economy: Option<f64>,
}

impl PlayerBowlingStats {
    fn record(&mut self, d: &DeliveryRecord) {
        self.balls_bowled += 1;
        self.runs_conceded += u64::from(d.total_runs);
        if d.is_bowler_wicket() {
            self.wickets += 1;
        }
    }

    fn finish(mut self) -> Self {
        self.economy = economy(self.runs_conceded, self.balls_bowled);
        self
    }
}

pub fn economy(runs: u64, balls: u64) -> Option<f64> {
    if balls == 0 {
        None
    } else {
        Some(runs as f64 / (balls as f64 / 6.0))
    }
}

pub fn bowling_totals<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> PlayerBowlingStats {
    let mut stats = PlayerBowlingStats::default();
    for d in deliveries {
        stats.record(d);
    }
    stats.finish()
}

/// Per-bowler totals in first-encountered order.
pub fn bowling_by_player<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> Vec<(&'a str, PlayerBowlingStats)> {
    let mut groups: OrderedGroups<'a, PlayerBowlingStats> = OrderedGroups::default();
    for d in deliveries {
        groups.entry(d.bowler.as_str()).record(d);
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(name, stats)| (name, stats.finish()))
        .collect()
}

pub fn player_bowling(dataset: &Dataset, bowler: &str) -> QueryResult<PlayerBowlingStats> {
    let bowler = require(bowler, "bowler")?;
    Ok(bowling_totals(
        dataset.deliveries.iter().filter(|d| d.bowler == bowler),
    ))
}

/// Bowlers ranked by wickets. Bowlers without a wicket are not listed.
pub fn top_wicket_takers<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    n: usize,
) -> Vec<Ranked<u64>> {
    let mut rows = bowling_by_player(deliveries)
        .into_iter()
        .filter(|(_, s)| s.wickets > 0)
        .map(|(name, s)| Ranked::new(name, s.wickets))
        .collect::<Vec<_>>();
    rank_descending(&mut rows);
    top_n(rows, n)
}

/// Lowest economy first. Qualification by `min_balls` happens before ranking
/// and bowlers with no balls never appear.
pub fn best_economy<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    min_balls: u64,
    n: usize,
) -> Vec<Ranked<f64>> {
    let mut rows = bowling_by_player(deliveries)
        .into_iter()
        .filter(|(_, s)| s.balls_bowled >= min_balls)
        .filter_map(|(name, s)| s.economy.map(|e| Ranked::new(name, e)))
        .collect::<Vec<_>>();
    rank_ascending(&mut rows);
    top_n(rows, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DismissalKind;

    fn ball(bowler: &str, runs: u32, dismissal: Option<DismissalKind>) -> DeliveryRecord {
        DeliveryRecord {
            match_id: 1,
            batting_team: "A".to_string(),
            bowling_team: "B".to_string(),
            batter: "P1".to_string(),
            bowler: bowler.to_string(),
            ball: "1".to_string(),
            batsman_runs: runs,
            total_runs: runs,
            dismissal_kind: dismissal,
        }
    }

    #[test]
    fn run_outs_are_not_bowler_wickets() {
        let rows = vec![
            ball("q", 0, Some(DismissalKind::RunOut)),
            ball("q", 0, Some(DismissalKind::Lbw)),
            ball("q", 0, Some(DismissalKind::RetiredHurt)),
            ball("q", 0, Some(DismissalKind::CaughtAndBowled)),
        ];
        assert_eq!(bowling_totals(&rows).wickets, 2);
        assert_eq!(top_wicket_takers(&rows, 10), vec![Ranked::new("q", 2u64)]);
    }

    #[test]
    fn economy_is_runs_per_over() {
        let rows: Vec<_> = (0..12).map(|_| ball("q", 1, None)).collect();
        assert_eq!(bowling_totals(&rows).economy, Some(6.0));
        assert_eq!(bowling_totals(std::iter::empty()).economy, None);
    }

    #[test]
    fn economy_ranks_ascending_after_qualification() {
        let mut rows = Vec::new();
        rows.extend((0..6).map(|_| ball("tight", 0, None)));
        rows.extend((0..12).map(|_| ball("loose", 2, None)));
        rows.extend((0..12).map(|_| ball("medium", 1, None)));
        let ranked = best_economy(&rows, 12, 10);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["medium", "loose"]);
        assert!(ranked.iter().all(|r| r.value.is_finite()));
    }

    #[test]
    fn player_bowling_scopes_to_one_bowler() {
        let ds = Dataset::new(
            Vec::new(),
            vec![
                ball("q", 4, Some(DismissalKind::Bowled)),
                ball("q", 2, None),
                ball("r", 6, None),
            ],
        );
        let q = player_bowling(&ds, " q ").unwrap();
        assert_eq!(q.balls_bowled, 2);
        assert_eq!(q.runs_conceded, 6);
        assert_eq!(q.wickets, 1);
        assert_eq!(q.economy, Some(18.0));

        let nobody = player_bowling(&ds, "nobody").unwrap();
        assert_eq!(nobody, PlayerBowlingStats::default());
        assert_eq!(
            player_bowling(&ds, ""),
            Err(crate::error::QueryError::MissingParameter("bowler"))
        );
    }
}
