use serde::Serialize;

use crate::dataset::{Dataset, DeliveryRecord};
use crate::error::{QueryResult, require};
use crate::rank::{OrderedGroups, Ranked, rank_descending, top_n};

pub const DEFAULT_MIN_BALLS_FACED: u64 = 200;

/// Every delivery row counts as a ball faced, extras included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerBattingStats {
    pub runs: u64,
    pub balls_faced: u64,
    pub strike_rate: f64,
    pub fours: u64,
    pub sixes: u64,
}

impl PlayerBattingStats {
    fn record(&mut self, d: &DeliveryRecord) {
        self.runs += u64::from(d.batsman_runs);
        self.balls_faced += 1;
        match d.batsman_runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }

    fn finish(mut self) -> Self {
        self.strike_rate = strike_rate(self.runs, self.balls_faced);
        self
    }
}

/// Runs per 100 balls; 0 when no balls were faced.
pub fn strike_rate(runs: u64, balls: u64) -> f64 {
    if balls == 0 {
        0.0
    } else {
        runs as f64 / balls as f64 * 100.0
    }
}

pub fn batting_totals<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> PlayerBattingStats {
    let mut stats = PlayerBattingStats::default();
    for d in deliveries {
        stats.record(d);
    }
    stats.finish()
}

/// Per-batter totals in first-encountered order.
pub fn batting_by_player<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> Vec<(&'a str, PlayerBattingStats)> {
    let mut groups: OrderedGroups<'a, PlayerBattingStats> = OrderedGroups::default();
    for d in deliveries {
        groups.entry(d.batter.as_str()).record(d);
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(name, stats)| (name, stats.finish()))
        .collect()
}

pub fn player_batting(dataset: &Dataset, batter: &str) -> QueryResult<PlayerBattingStats> {
    let batter = require(batter, "batter")?;
    Ok(batting_totals(
        dataset.deliveries.iter().filter(|d| d.batter == batter),
    ))
}

fn leaderboard<'a, T: PartialOrd>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    n: usize,
    metric: impl Fn(&PlayerBattingStats) -> Option<T>,
) -> Vec<Ranked<T>> {
    let mut rows = batting_by_player(deliveries)
        .into_iter()
        .filter_map(|(name, stats)| metric(&stats).map(|v| Ranked::new(name, v)))
        .collect::<Vec<_>>();
    rank_descending(&mut rows);
    top_n(rows, n)
}

pub fn top_run_scorers<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    n: usize,
) -> Vec<Ranked<u64>> {
    leaderboard(deliveries, n, |s| Some(s.runs))
}

/// Batters under `min_balls` are dropped before ranking.
pub fn top_strike_rates<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    min_balls: u64,
    n: usize,
) -> Vec<Ranked<f64>> {
    leaderboard(deliveries, n, |s| {
        (s.balls_faced >= min_balls).then_some(s.strike_rate)
    })
}

pub fn most_sixes<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    n: usize,
) -> Vec<Ranked<u64>> {
    leaderboard(deliveries, n, |s| (s.sixes > 0).then_some(s.sixes))
}

pub fn most_fours<'a>(
    deliveries: impl IntoIterator<Item = &'a DeliveryRecord>,
    n: usize,
) -> Vec<Ranked<u64>> {
    leaderboard(deliveries, n, |s| (s.fours > 0).then_some(s.fours))
}
