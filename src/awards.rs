use crate::dataset::Dataset;
use crate::error::{QueryResult, require};
use crate::rank::{Ranked, count_values, top_n};

pub const DEFAULT_AWARDS_TOP_N: usize = 5;

/// Player-of-the-match counts within one season, most first.
pub fn season_awards(dataset: &Dataset, season: &str, n: usize) -> QueryResult<Vec<Ranked<u64>>> {
    let season = require(season, "season")?;
    let rows = count_values(
        dataset
            .matches
            .iter()
            .filter(|m| m.season == season)
            .filter_map(|m| m.player_of_match.as_deref()),
    );
    Ok(top_n(rows, n))
}
