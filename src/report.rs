use serde::Serialize;

use crate::awards::season_awards;
use crate::batting::{most_fours, most_sixes, top_run_scorers, top_strike_rates};
use crate::bowling::{best_economy, top_wicket_takers};
use crate::compare::{TeamComparison, compare_teams};
use crate::config::Config;
use crate::dataset::{Dataset, MatchRecord};
use crate::duel::{DuelStats, player_vs_player};
use crate::error::QueryResult;
use crate::filter::team_season_matches;
use crate::player::{PlayerProfile, player_profile};
use crate::rank::Ranked;
use crate::team::{HeadToHead, head_to_head, overall_wins, toss_decisions};
use crate::venue::{VenueStats, team_venue_stats, venue_match_counts};

/// Parameters for one dashboard snapshot. Sections whose parameters are unset
/// are left out of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub team: Option<String>,
    pub season: Option<String>,
    pub head_to_head: Option<(String, String)>,
    pub compare: Option<(String, String)>,
    pub player: Option<String>,
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub venue_team: Option<String>,
    pub min_balls_faced: u64,
    pub min_balls_bowled: u64,
    pub top_n: usize,
    pub awards_top_n: usize,
}

impl DashboardQuery {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            team: None,
            season: None,
            head_to_head: None,
            compare: None,
            player: None,
            batter: None,
            bowler: None,
            venue_team: None,
            min_balls_faced: cfg.min_balls_faced,
            min_balls_bowled: cfg.min_balls_bowled,
            top_n: cfg.top_n,
            awards_top_n: cfg.awards_top_n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub wins: Vec<Ranked<u64>>,
    pub toss_decisions: Vec<Ranked<u64>>,
    pub venue_matches: Vec<Ranked<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingBoards {
    pub top_runs: Vec<Ranked<u64>>,
    pub top_strike_rate: Vec<Ranked<f64>>,
    pub most_sixes: Vec<Ranked<u64>>,
    pub most_fours: Vec<Ranked<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingBoards {
    pub top_wickets: Vec<Ranked<u64>>,
    pub best_economy: Vec<Ranked<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamVenues {
    pub team: String,
    pub venues: Vec<VenueStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub overview: Overview,
    pub batting: BattingBoards,
    pub bowling: BowlingBoards,
    pub season_matches: Option<Vec<MatchRecord>>,
    pub season_awards: Option<Vec<Ranked<u64>>>,
    pub head_to_head: Option<HeadToHead>,
    pub comparison: Option<TeamComparison>,
    pub player: Option<PlayerProfile>,
    pub venues: Option<TeamVenues>,
    pub duel: Option<DuelStats>,
}

pub fn overview(dataset: &Dataset) -> Overview {
    Overview {
        wins: overall_wins(dataset),
        toss_decisions: toss_decisions(dataset),
        venue_matches: venue_match_counts(dataset),
    }
}

pub fn batting_boards(dataset: &Dataset, min_balls: u64, n: usize) -> BattingBoards {
    let rows = &dataset.deliveries;
    BattingBoards {
        top_runs: top_run_scorers(rows, n),
        top_strike_rate: top_strike_rates(rows, min_balls, n),
        most_sixes: most_sixes(rows, n),
        most_fours: most_fours(rows, n),
    }
}

pub fn bowling_boards(dataset: &Dataset, min_balls: u64, n: usize) -> BowlingBoards {
    let rows = &dataset.deliveries;
    BowlingBoards {
        top_wickets: top_wicket_takers(rows, n),
        best_economy: best_economy(rows, min_balls, n),
    }
}

/// Builds every requested section. The leaderboards and the parameterised
/// sections are independent reads, so they run on the rayon pool.
pub fn build_report(dataset: &Dataset, query: &DashboardQuery) -> QueryResult<DashboardReport> {
    let ((overview, batting), (bowling, selected)) = rayon::join(
        || {
            rayon::join(
                || overview(dataset),
                || batting_boards(dataset, query.min_balls_faced, query.top_n),
            )
        },
        || {
            rayon::join(
                || bowling_boards(dataset, query.min_balls_bowled, query.top_n),
                || selected_sections(dataset, query),
            )
        },
    );
    let selected = selected?;

    Ok(DashboardReport {
        overview,
        batting,
        bowling,
        season_matches: selected.season_matches,
        season_awards: selected.season_awards,
        head_to_head: selected.head_to_head,
        comparison: selected.comparison,
        player: selected.player,
        venues: selected.venues,
        duel: selected.duel,
    })
}

struct SelectedSections {
    season_matches: Option<Vec<MatchRecord>>,
    season_awards: Option<Vec<Ranked<u64>>>,
    head_to_head: Option<HeadToHead>,
    comparison: Option<TeamComparison>,
    player: Option<PlayerProfile>,
    venues: Option<TeamVenues>,
    duel: Option<DuelStats>,
}

fn selected_sections(dataset: &Dataset, query: &DashboardQuery) -> QueryResult<SelectedSections> {
    let season_matches = match (&query.team, &query.season) {
        (Some(team), Some(season)) => Some(
            team_season_matches(dataset, team, season)?
                .into_iter()
                .cloned()
                .collect(),
        ),
        _ => None,
    };
    let season_awards = query
        .season
        .as_deref()
        .map(|season| season_awards(dataset, season, query.awards_top_n))
        .transpose()?;
    let head_to_head = query
        .head_to_head
        .as_ref()
        .map(|(a, b)| head_to_head(dataset, a, b))
        .transpose()?;
    let comparison = query
        .compare
        .as_ref()
        .map(|(a, b)| compare_teams(dataset, a, b))
        .transpose()?;
    let player = query
        .player
        .as_deref()
        .map(|p| player_profile(dataset, p))
        .transpose()?;
    let venues = query
        .venue_team
        .as_deref()
        .map(|team| {
            team_venue_stats(dataset, team).map(|venues| TeamVenues {
                team: team.trim().to_string(),
                venues,
            })
        })
        .transpose()?;
    let duel = match (&query.batter, &query.bowler) {
        (Some(batter), Some(bowler)) => Some(player_vs_player(dataset, batter, bowler)?),
        _ => None,
    };

    Ok(SelectedSections {
        season_matches,
        season_awards,
        head_to_head,
        comparison,
        player,
        venues,
        duel,
    })
}

pub fn report_to_json(report: &DashboardReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
