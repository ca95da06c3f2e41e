use crate::dataset::{Dataset, DeliveryRecord, MatchRecord};
use crate::error::{QueryResult, require};

/// Unordered team pair; `(a, b)` and `(b, a)` select the same matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHeadPair {
    pub a: String,
    pub b: String,
}

/// Match predicates combined with logical AND. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub season: Option<String>,
    pub team: Option<String>,
    pub venue: Option<String>,
    pub pair: Option<HeadToHeadPair>,
}

impl MatchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn between(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.pair = Some(HeadToHeadPair {
            a: a.into(),
            b: b.into(),
        });
        self
    }

    pub fn matches(&self, m: &MatchRecord) -> bool {
        if let Some(season) = &self.season
            && m.season != *season
        {
            return false;
        }
        if let Some(team) = &self.team
            && !m.involves(team)
        {
            return false;
        }
        if let Some(venue) = &self.venue
            && m.venue != *venue
        {
            return false;
        }
        if let Some(pair) = &self.pair
            && !m.is_between(&pair.a, &pair.b)
        {
            return false;
        }
        true
    }
}

/// Matching rows in source order.
pub fn filter_matches<'a>(dataset: &'a Dataset, filter: &MatchFilter) -> Vec<&'a MatchRecord> {
    dataset.matches.iter().filter(|m| filter.matches(m)).collect()
}

/// Deliveries from the filtered matches. Orphan deliveries never qualify.
pub fn filter_deliveries<'a>(
    dataset: &'a Dataset,
    filter: &MatchFilter,
) -> Vec<&'a DeliveryRecord> {
    dataset
        .joined_deliveries()
        .filter(|(m, _)| filter.matches(m))
        .map(|(_, d)| d)
        .collect()
}

/// Matches a team played in one season.
pub fn team_season_matches<'a>(
    dataset: &'a Dataset,
    team: &str,
    season: &str,
) -> QueryResult<Vec<&'a MatchRecord>> {
    let team = require(team, "team")?;
    let season = require(season, "season")?;
    Ok(filter_matches(
        dataset,
        &MatchFilter::new().team(team).season(season),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TossDecision;
    use crate::error::QueryError;

    fn m(id: u64, season: &str, t1: &str, t2: &str, venue: &str) -> MatchRecord {
        MatchRecord {
            id,
            season: season.to_string(),
            date: None,
            venue: venue.to_string(),
            team1: t1.to_string(),
            team2: t2.to_string(),
            toss_winner: t1.to_string(),
            toss_decision: TossDecision::Bat,
            winner: Some(t1.to_string()),
            player_of_match: None,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                m(1, "2019", "A", "B", "X"),
                m(2, "2019", "B", "C", "Y"),
                m(3, "2020", "B", "A", "X"),
                m(4, "2020", "C", "A", "Y"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn predicates_are_anded() {
        let ds = sample();
        let rows = filter_matches(&ds, &MatchFilter::new().team("A").venue("X").season("2020"));
        assert_eq!(rows.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn pair_is_symmetric() {
        let ds = sample();
        let ab = filter_matches(&ds, &MatchFilter::new().between("A", "B"));
        let ba = filter_matches(&ds, &MatchFilter::new().between("B", "A"));
        assert_eq!(ab, ba);
        assert_eq!(ab.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn team_season_requires_both_params() {
        let ds = sample();
        assert_eq!(
            team_season_matches(&ds, "", "2019"),
            Err(QueryError::MissingParameter("team"))
        );
        assert_eq!(team_season_matches(&ds, "B", "2019").unwrap().len(), 2);
        assert!(team_season_matches(&ds, "Nobody", "2019").unwrap().is_empty());
    }
}
