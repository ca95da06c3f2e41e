use std::collections::HashSet;

use serde::Serialize;

use crate::batting::{PlayerBattingStats, player_batting};
use crate::bowling::{PlayerBowlingStats, player_bowling};
use crate::dataset::Dataset;
use crate::error::{QueryResult, require};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: String,
    pub batting: PlayerBattingStats,
    pub bowling: PlayerBowlingStats,
    /// Distinct matches in which the player batted or bowled.
    pub matches_played: u64,
}

pub fn player_profile(dataset: &Dataset, player: &str) -> QueryResult<PlayerProfile> {
    let player = require(player, "player")?;
    let matches_played = dataset
        .deliveries
        .iter()
        .filter(|d| d.batter == player || d.bowler == player)
        .map(|d| d.match_id)
        .collect::<HashSet<_>>()
        .len() as u64;

    Ok(PlayerProfile {
        player: player.to_string(),
        batting: player_batting(dataset, player)?,
        bowling: player_bowling(dataset, player)?,
        matches_played,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DeliveryRecord, DismissalKind};

    fn d(match_id: u64, batter: &str, bowler: &str, runs: u32) -> DeliveryRecord {
        DeliveryRecord {
            match_id,
            batting_team: "A".to_string(),
            bowling_team: "B".to_string(),
            batter: batter.to_string(),
            bowler: bowler.to_string(),
            ball: "1".to_string(),
            batsman_runs: runs,
            total_runs: runs,
            dismissal_kind: (runs == 0).then_some(DismissalKind::Caught),
        }
    }

    #[test]
    fn all_rounder_profile_merges_both_roles() {
        let ds = Dataset::new(
            Vec::new(),
            vec![
                d(1, "jadeja", "x", 4),
                d(1, "jadeja", "x", 6),
                d(2, "y", "jadeja", 0),
                d(3, "y", "jadeja", 1),
                d(3, "z", "w", 1),
            ],
        );
        let p = player_profile(&ds, "jadeja").unwrap();
        assert_eq!(p.batting.runs, 10);
        assert_eq!(p.batting.balls_faced, 2);
        assert_eq!(p.bowling.balls_bowled, 2);
        assert_eq!(p.bowling.wickets, 1);
        assert_eq!(p.matches_played, 3);
    }

    #[test]
    fn unknown_player_is_empty() {
        let p = player_profile(&Dataset::default(), "nobody").unwrap();
        assert_eq!(p.matches_played, 0);
        assert_eq!(p.batting.strike_rate, 0.0);
        assert_eq!(p.bowling.economy, None);
    }
}
