use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{QueryError, QueryResult, require};
use crate::team::{HeadToHead, TeamRecord, head_to_head, team_record};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub a: TeamRecord,
    pub b: TeamRecord,
    pub head_to_head: HeadToHead,
}

pub fn compare_teams(dataset: &Dataset, team_a: &str, team_b: &str) -> QueryResult<TeamComparison> {
    let team_a = require(team_a, "team_a")?;
    let team_b = require(team_b, "team_b")?;
    if team_a == team_b {
        return Err(QueryError::SameTeam(team_a.to_string()));
    }
    Ok(TeamComparison {
        a: team_record(dataset, team_a)?,
        b: team_record(dataset, team_b)?,
        head_to_head: head_to_head(dataset, team_a, team_b)?,
    })
}
