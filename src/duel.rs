use serde::Serialize;

use crate::batting::strike_rate;
use crate::dataset::Dataset;
use crate::error::{QueryResult, require};

/// One batter against one bowler. An empty pairing is all zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelStats {
    pub batter: String,
    pub bowler: String,
    pub balls: u64,
    pub runs: u64,
    pub fours: u64,
    pub sixes: u64,
    pub strike_rate: f64,
    pub dismissals: u64,
}

pub fn player_vs_player(dataset: &Dataset, batter: &str, bowler: &str) -> QueryResult<DuelStats> {
    let batter = require(batter, "batter")?;
    let bowler = require(bowler, "bowler")?;

    let mut out = DuelStats {
        batter: batter.to_string(),
        bowler: bowler.to_string(),
        balls: 0,
        runs: 0,
        fours: 0,
        sixes: 0,
        strike_rate: 0.0,
        dismissals: 0,
    };
    for d in dataset
        .deliveries
        .iter()
        .filter(|d| d.batter == batter && d.bowler == bowler)
    {
        out.balls += 1;
        out.runs += u64::from(d.batsman_runs);
        match d.batsman_runs {
            4 => out.fours += 1,
            6 => out.sixes += 1,
            _ => {}
        }
        if d.is_bowler_wicket() {
            out.dismissals += 1;
        }
    }
    out.strike_rate = strike_rate(out.runs, out.balls);
    Ok(out)
}
