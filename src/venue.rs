use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{QueryResult, require};
use crate::rank::{OrderedGroups, Ranked, count_values, percentage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueStats {
    pub venue: String,
    pub matches_at_venue: u64,
    pub wins: u64,
    pub win_pct: f64,
}

#[derive(Debug, Default)]
struct VenueTally {
    matches: u64,
    wins: u64,
}

pub fn venue_match_counts(dataset: &Dataset) -> Vec<Ranked<u64>> {
    count_values(dataset.matches.iter().map(|m| m.venue.as_str()))
}

/// Win % at every venue the team played, best first. Venues without a win
/// stay in the list at 0%.
pub fn team_venue_stats(dataset: &Dataset, team: &str) -> QueryResult<Vec<VenueStats>> {
    let team = require(team, "team")?;
    let mut groups: OrderedGroups<'_, VenueTally> = OrderedGroups::default();
    for m in dataset.matches.iter().filter(|m| m.involves(team)) {
        let tally = groups.entry(m.venue.as_str());
        tally.matches += 1;
        if m.won_by(team) {
            tally.wins += 1;
        }
    }

    let mut rows = groups
        .into_entries()
        .into_iter()
        .map(|(venue, t)| VenueStats {
            venue: venue.to_string(),
            matches_at_venue: t.matches,
            wins: t.wins,
            win_pct: percentage(t.wins, t.matches),
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| b.win_pct.total_cmp(&a.win_pct));
    Ok(rows)
}
