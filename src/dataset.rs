use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

/// Dismissal kinds that credit the bowler with a wicket.
pub const BOWLER_DISMISSALS: [DismissalKind; 6] = [
    DismissalKind::Bowled,
    DismissalKind::Caught,
    DismissalKind::Lbw,
    DismissalKind::Stumped,
    DismissalKind::CaughtAndBowled,
    DismissalKind::HitWicket,
];

const MAX_LOGGED_ERRORS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
    Other(String),
}

impl TossDecision {
    /// Blank and NA cells become an empty `Other`, which summaries skip.
    pub fn parse(raw: &str) -> Self {
        if is_null_cell(raw) {
            return TossDecision::Other(String::new());
        }
        match raw.trim().to_ascii_lowercase().as_str() {
            "bat" | "batting" => TossDecision::Bat,
            "field" | "fielding" | "bowl" => TossDecision::Field,
            other => TossDecision::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TossDecision::Bat => "bat",
            TossDecision::Field => "field",
            TossDecision::Other(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    Stumped,
    CaughtAndBowled,
    HitWicket,
    RunOut,
    RetiredHurt,
    RetiredOut,
    ObstructingTheField,
    Other(String),
}

impl DismissalKind {
    /// Returns `None` for the empty/NA cells that mean "no dismissal".
    pub fn parse(raw: &str) -> Option<Self> {
        if is_null_cell(raw) {
            return None;
        }
        let kind = match raw.trim().to_ascii_lowercase().as_str() {
            "bowled" => DismissalKind::Bowled,
            "caught" => DismissalKind::Caught,
            "lbw" => DismissalKind::Lbw,
            "stumped" => DismissalKind::Stumped,
            "caught and bowled" => DismissalKind::CaughtAndBowled,
            "hit wicket" => DismissalKind::HitWicket,
            "run out" => DismissalKind::RunOut,
            "retired hurt" => DismissalKind::RetiredHurt,
            "retired out" => DismissalKind::RetiredOut,
            "obstructing the field" => DismissalKind::ObstructingTheField,
            other => DismissalKind::Other(other.to_string()),
        };
        Some(kind)
    }

    pub fn label(&self) -> &str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::Lbw => "lbw",
            DismissalKind::Stumped => "stumped",
            DismissalKind::CaughtAndBowled => "caught and bowled",
            DismissalKind::HitWicket => "hit wicket",
            DismissalKind::RunOut => "run out",
            DismissalKind::RetiredHurt => "retired hurt",
            DismissalKind::RetiredOut => "retired out",
            DismissalKind::ObstructingTheField => "obstructing the field",
            DismissalKind::Other(raw) => raw,
        }
    }

    pub fn credits_bowler(&self) -> bool {
        BOWLER_DISMISSALS.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub id: u64,
    pub season: String,
    pub date: Option<NaiveDate>,
    pub venue: String,
    pub team1: String,
    pub team2: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    pub winner: Option<String>,
    pub player_of_match: Option<String>,
}

impl MatchRecord {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn won_by(&self, team: &str) -> bool {
        self.winner.as_deref() == Some(team)
    }

    /// Symmetric in slot order: {team1, team2} == {a, b}.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.team1 == a && self.team2 == b) || (self.team1 == b && self.team2 == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryRecord {
    pub match_id: u64,
    pub batting_team: String,
    pub bowling_team: String,
    pub batter: String,
    pub bowler: String,
    /// Ball identifier as written in the source ("3", "0.1", ...). Never parsed.
    pub ball: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    pub dismissal_kind: Option<DismissalKind>,
}

impl DeliveryRecord {
    pub fn is_bowler_wicket(&self) -> bool {
        self.dismissal_kind
            .as_ref()
            .is_some_and(DismissalKind::credits_bowler)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub errors: Vec<String>,
}

impl LoadSummary {
    fn skip(&mut self, line: usize, err: anyhow::Error) {
        self.rows_skipped += 1;
        if self.errors.len() < MAX_LOGGED_ERRORS {
            self.errors.push(format!("row {line}: {err:#}"));
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub matches: LoadSummary,
    pub deliveries: LoadSummary,
    pub orphan_deliveries: usize,
}

/// Both base tables. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub matches: Vec<MatchRecord>,
    pub deliveries: Vec<DeliveryRecord>,
}

impl Dataset {
    pub fn new(matches: Vec<MatchRecord>, deliveries: Vec<DeliveryRecord>) -> Self {
        Self {
            matches,
            deliveries,
        }
    }

    pub fn load(matches_path: &Path, deliveries_path: &Path) -> Result<(Self, LoadReport)> {
        let (matches, match_summary) = load_matches_csv(matches_path)?;
        let (deliveries, delivery_summary) = load_deliveries_csv(deliveries_path)?;
        let dataset = Self::new(matches, deliveries);
        let orphan_deliveries = dataset.orphan_delivery_count();
        Ok((
            dataset,
            LoadReport {
                matches: match_summary,
                deliveries: delivery_summary,
                orphan_deliveries,
            },
        ))
    }

    pub fn match_index(&self) -> HashMap<u64, usize> {
        self.matches
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.id, idx))
            .collect()
    }

    pub fn deliveries_for_match(&self, id: u64) -> impl Iterator<Item = &DeliveryRecord> + '_ {
        self.deliveries.iter().filter(move |d| d.match_id == id)
    }

    /// Inner join on match id. Deliveries without a match are dropped.
    pub fn joined_deliveries(&self) -> impl Iterator<Item = (&MatchRecord, &DeliveryRecord)> + '_ {
        let index = self.match_index();
        self.deliveries
            .iter()
            .filter_map(move |d| index.get(&d.match_id).map(|&idx| (&self.matches[idx], d)))
    }

    pub fn orphan_delivery_count(&self) -> usize {
        let index = self.match_index();
        self.deliveries
            .iter()
            .filter(|d| !index.contains_key(&d.match_id))
            .count()
    }

    pub fn teams(&self) -> Vec<String> {
        sorted_distinct(
            self.matches
                .iter()
                .flat_map(|m| [m.team1.as_str(), m.team2.as_str()]),
        )
    }

    pub fn seasons(&self) -> Vec<String> {
        sorted_distinct(self.matches.iter().map(|m| m.season.as_str()))
    }

    pub fn venues(&self) -> Vec<String> {
        sorted_distinct(self.matches.iter().map(|m| m.venue.as_str()))
    }

    pub fn batters(&self) -> Vec<String> {
        sorted_distinct(self.deliveries.iter().map(|d| d.batter.as_str()))
    }

    pub fn bowlers(&self) -> Vec<String> {
        sorted_distinct(self.deliveries.iter().map(|d| d.bowler.as_str()))
    }

    pub fn players(&self) -> Vec<String> {
        sorted_distinct(
            self.deliveries
                .iter()
                .flat_map(|d| [d.batter.as_str(), d.bowler.as_str()]),
        )
    }
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Header normalization applied at the loading boundary.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

pub fn load_matches_csv(path: &Path) -> Result<(Vec<MatchRecord>, LoadSummary)> {
    let file = File::open(path).with_context(|| format!("open matches csv {}", path.display()))?;
    read_matches(file).with_context(|| format!("read matches csv {}", path.display()))
}

pub fn load_deliveries_csv(path: &Path) -> Result<(Vec<DeliveryRecord>, LoadSummary)> {
    let file =
        File::open(path).with_context(|| format!("open deliveries csv {}", path.display()))?;
    read_deliveries(file).with_context(|| format!("read deliveries csv {}", path.display()))
}

struct MatchColumns {
    id: usize,
    season: usize,
    date: Option<usize>,
    venue: usize,
    team1: usize,
    team2: usize,
    toss_winner: Option<usize>,
    toss_decision: Option<usize>,
    winner: usize,
    player_of_match: Option<usize>,
}

pub fn read_matches<R: Read>(reader: R) -> Result<(Vec<MatchRecord>, LoadSummary)> {
    let mut csv = csv_reader(reader);
    let header = HeaderMap::new(csv.headers().context("read matches header")?);
    let cols = MatchColumns {
        id: header.require(&["id", "match_id"])?,
        season: header.require(&["season"])?,
        date: header.optional(&["date"]),
        venue: header.require(&["venue"])?,
        team1: header.require(&["team1"])?,
        team2: header.require(&["team2"])?,
        toss_winner: header.optional(&["toss_winner"]),
        toss_decision: header.optional(&["toss_decision"]),
        winner: header.require(&["winner"])?,
        player_of_match: header.optional(&["player_of_match"]),
    };

    let mut out = Vec::new();
    let mut summary = LoadSummary::default();
    for (idx, row) in csv.records().enumerate() {
        summary.rows_read += 1;
        let line = idx + 2;
        let parsed = row
            .context("malformed csv row")
            .and_then(|row| parse_match_row(&row, &cols));
        match parsed {
            Ok(m) => out.push(m),
            Err(err) => summary.skip(line, err),
        }
    }
    Ok((out, summary))
}

fn parse_match_row(row: &StringRecord, cols: &MatchColumns) -> Result<MatchRecord> {
    let id = parse_count(cell(row, cols.id)).ok_or_else(|| anyhow!("invalid match id"))?;
    let team1 = cell(row, cols.team1).to_string();
    let team2 = cell(row, cols.team2).to_string();
    if team1.is_empty() || team2.is_empty() {
        return Err(anyhow!("match {id} is missing a team name"));
    }
    Ok(MatchRecord {
        id,
        season: cell(row, cols.season).to_string(),
        date: cols.date.and_then(|c| parse_date(cell(row, c))),
        venue: cell(row, cols.venue).to_string(),
        team1,
        team2,
        toss_winner: cols
            .toss_winner
            .map(|c| cell(row, c).to_string())
            .unwrap_or_default(),
        toss_decision: cols
            .toss_decision
            .map(|c| TossDecision::parse(cell(row, c)))
            .unwrap_or_else(|| TossDecision::Other(String::new())),
        winner: opt_cell(row, Some(cols.winner)),
        player_of_match: opt_cell(row, cols.player_of_match),
    })
}

struct DeliveryColumns {
    match_id: usize,
    batting_team: usize,
    bowling_team: usize,
    batter: usize,
    bowler: usize,
    ball: usize,
    batsman_runs: usize,
    total_runs: usize,
    dismissal_kind: Option<usize>,
}

pub fn read_deliveries<R: Read>(reader: R) -> Result<(Vec<DeliveryRecord>, LoadSummary)> {
    let mut csv = csv_reader(reader);
    let header = HeaderMap::new(csv.headers().context("read deliveries header")?);
    let cols = DeliveryColumns {
        match_id: header.require(&["match_id"])?,
        batting_team: header.require(&["batting_team"])?,
        bowling_team: header.require(&["bowling_team"])?,
        batter: header.require(&["batter", "batsman"])?,
        bowler: header.require(&["bowler"])?,
        ball: header.require(&["ball"])?,
        batsman_runs: header.require(&["batsman_runs"])?,
        total_runs: header.require(&["total_runs"])?,
        dismissal_kind: header.optional(&["dismissal_kind"]),
    };

    let mut out = Vec::new();
    let mut summary = LoadSummary::default();
    for (idx, row) in csv.records().enumerate() {
        summary.rows_read += 1;
        let line = idx + 2;
        let parsed = row
            .context("malformed csv row")
            .and_then(|row| parse_delivery_row(&row, &cols));
        match parsed {
            Ok(d) => out.push(d),
            Err(err) => summary.skip(line, err),
        }
    }
    Ok((out, summary))
}

fn parse_delivery_row(row: &StringRecord, cols: &DeliveryColumns) -> Result<DeliveryRecord> {
    let match_id = parse_count(cell(row, cols.match_id)).ok_or_else(|| anyhow!("invalid match_id"))?;
    let number = |idx: usize, name: &str| -> Result<u32> {
        parse_count(cell(row, idx))
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| anyhow!("invalid {name} {:?}", cell(row, idx)))
    };
    Ok(DeliveryRecord {
        match_id,
        batting_team: cell(row, cols.batting_team).to_string(),
        bowling_team: cell(row, cols.bowling_team).to_string(),
        batter: cell(row, cols.batter).to_string(),
        bowler: cell(row, cols.bowler).to_string(),
        ball: cell(row, cols.ball).to_string(),
        batsman_runs: number(cols.batsman_runs, "batsman_runs")?,
        total_runs: number(cols.total_runs, "total_runs")?,
        dismissal_kind: cols
            .dismissal_kind
            .and_then(|c| DismissalKind::parse(cell(row, c))),
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

struct HeaderMap {
    index: HashMap<String, usize>,
}

impl HeaderMap {
    fn new(headers: &StringRecord) -> Self {
        let mut index = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            // Keep the first occurrence when a header repeats after normalization.
            index.entry(normalize_header(name)).or_insert(idx);
        }
        Self { index }
    }

    fn optional(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|a| self.index.get(*a).copied())
    }

    fn require(&self, aliases: &[&str]) -> Result<usize> {
        self.optional(aliases)
            .ok_or_else(|| anyhow!("missing required column {:?}", aliases[0]))
    }
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).map(str::trim).unwrap_or_default()
}

fn opt_cell(row: &StringRecord, idx: Option<usize>) -> Option<String> {
    let raw = cell(row, idx?);
    if is_null_cell(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

fn is_null_cell(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty()
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
}

fn parse_count(raw: &str) -> Option<u64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    // Exports sometimes write integer columns as floats ("6.0").
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 {
        Some(f as u64)
    } else {
        None
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
    let s = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
