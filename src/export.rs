use std::fmt::Display;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dataset::MatchRecord;
use crate::rank::Ranked;
use crate::report::DashboardReport;
use crate::team::TeamRecord;

pub struct ExportReport {
    pub sheets: usize,
    pub rows: usize,
}

pub fn export_report_xlsx(path: &Path, report: &DashboardReport) -> Result<ExportReport> {
    let mut sheets: Vec<(&str, Vec<Vec<String>>)> = vec![
        ("Wins", ranked_rows("Team", "Wins", &report.overview.wins)),
        (
            "Toss",
            ranked_rows("Decision", "Matches", &report.overview.toss_decisions),
        ),
        (
            "Venues",
            ranked_rows("Venue", "Matches", &report.overview.venue_matches),
        ),
        ("TopRuns", ranked_rows("Batter", "Runs", &report.batting.top_runs)),
        (
            "StrikeRate",
            ranked_rows("Batter", "Strike Rate", &report.batting.top_strike_rate),
        ),
        ("Sixes", ranked_rows("Batter", "Sixes", &report.batting.most_sixes)),
        ("Fours", ranked_rows("Batter", "Fours", &report.batting.most_fours)),
        (
            "Wickets",
            ranked_rows("Bowler", "Wickets", &report.bowling.top_wickets),
        ),
        (
            "Economy",
            ranked_rows("Bowler", "Economy", &report.bowling.best_economy),
        ),
    ];

    if let Some(matches) = &report.season_matches {
        sheets.push(("SeasonMatches", match_rows(matches.iter())));
    }
    if let Some(awards) = &report.season_awards {
        sheets.push(("Awards", ranked_rows("Player", "Awards", awards)));
    }
    if let Some(h2h) = &report.head_to_head {
        sheets.push(("HeadToHead", match_rows(h2h.matches.iter())));
    }
    if let Some(cmp) = &report.comparison {
        let mut rows = vec![team_header()];
        rows.push(team_row(&cmp.a));
        rows.push(team_row(&cmp.b));
        sheets.push(("Comparison", rows));
    }
    if let Some(p) = &report.player {
        sheets.push((
            "Player",
            vec![
                header(&[
                    "Player",
                    "Runs",
                    "Balls Faced",
                    "Strike Rate",
                    "4s",
                    "6s",
                    "Balls Bowled",
                    "Runs Conceded",
                    "Wickets",
                    "Economy",
                    "Matches",
                ]),
                vec![
                    p.player.clone(),
                    p.batting.runs.to_string(),
                    p.batting.balls_faced.to_string(),
                    format!("{:.2}", p.batting.strike_rate),
                    p.batting.fours.to_string(),
                    p.batting.sixes.to_string(),
                    p.bowling.balls_bowled.to_string(),
                    p.bowling.runs_conceded.to_string(),
                    p.bowling.wickets.to_string(),
                    opt_to_string(p.bowling.economy.map(|e| format!("{e:.2}"))),
                    p.matches_played.to_string(),
                ],
            ],
        ));
    }
    if let Some(v) = &report.venues {
        let mut rows = vec![header(&["Team", "Venue", "Matches", "Wins", "Win %"])];
        for s in &v.venues {
            rows.push(vec![
                v.team.clone(),
                s.venue.clone(),
                s.matches_at_venue.to_string(),
                s.wins.to_string(),
                format!("{:.2}", s.win_pct),
            ]);
        }
        sheets.push(("TeamVenues", rows));
    }
    if let Some(d) = &report.duel {
        sheets.push((
            "Duel",
            vec![
                header(&[
                    "Batter", "Bowler", "Balls", "Runs", "Strike Rate", "4s", "6s", "Dismissals",
                ]),
                vec![
                    d.batter.clone(),
                    d.bowler.clone(),
                    d.balls.to_string(),
                    d.runs.to_string(),
                    format!("{:.2}", d.strike_rate),
                    d.fours.to_string(),
                    d.sixes.to_string(),
                    d.dismissals.to_string(),
                ],
            ],
        ));
    }

    let mut workbook = Workbook::new();
    let mut rows_written = 0usize;
    for (name, rows) in &sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        write_rows(sheet, rows)?;
        rows_written += rows.len().saturating_sub(1);
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        sheets: sheets.len(),
        rows: rows_written,
    })
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn ranked_rows<T: Display>(name_col: &str, value_col: &str, rows: &[Ranked<T>]) -> Vec<Vec<String>> {
    let mut out = vec![header(&["#", name_col, value_col])];
    for (idx, row) in rows.iter().enumerate() {
        out.push(vec![
            (idx + 1).to_string(),
            row.name.clone(),
            row.value.to_string(),
        ]);
    }
    out
}

fn match_rows<'a>(matches: impl Iterator<Item = &'a MatchRecord>) -> Vec<Vec<String>> {
    let mut out = vec![header(&[
        "Match ID", "Season", "Date", "Team 1", "Team 2", "Winner", "Venue",
    ])];
    for m in matches {
        out.push(vec![
            m.id.to_string(),
            m.season.clone(),
            opt_to_string(m.date),
            m.team1.clone(),
            m.team2.clone(),
            m.winner.clone().unwrap_or_default(),
            m.venue.clone(),
        ]);
    }
    out
}

fn team_header() -> Vec<String> {
    header(&[
        "Team",
        "Matches",
        "Wins",
        "Win %",
        "Avg Runs/Match",
        "Avg Wickets/Match",
        "Top Batter",
        "Top Bowler",
    ])
}

fn team_row(rec: &TeamRecord) -> Vec<String> {
    vec![
        rec.team.clone(),
        rec.total_matches.to_string(),
        rec.wins.to_string(),
        format!("{:.2}", rec.win_pct),
        format!("{:.1}", rec.avg_runs_per_match),
        format!("{:.1}", rec.avg_wickets_per_match),
        opt_to_string(
            rec.top_batter
                .as_ref()
                .map(|r| format!("{} ({} runs)", r.name, r.value)),
        ),
        opt_to_string(
            rec.top_bowler
                .as_ref()
                .map(|r| format!("{} ({} wickets)", r.name, r.value)),
        ),
    ]
}

fn opt_to_string<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
