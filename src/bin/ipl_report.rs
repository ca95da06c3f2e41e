use std::path::PathBuf;

use anyhow::{Context, Result};

use ipl_terminal::config::{Config, arg_value, has_flag};
use ipl_terminal::dataset::Dataset;
use ipl_terminal::export::export_report_xlsx;
use ipl_terminal::rank::Ranked;
use ipl_terminal::report::{DashboardQuery, DashboardReport, build_report, report_to_json};
use ipl_terminal::synthetic::synthetic_dataset;

fn main() -> Result<()> {
    let config = Config::from_env_and_args();
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let dataset = if config.demo {
        synthetic_dataset(2008, 5, 60)
    } else {
        let (dataset, load) = Dataset::load(&config.matches_csv, &config.deliveries_csv)?;
        for (label, summary) in [("matches", &load.matches), ("deliveries", &load.deliveries)] {
            if summary.rows_skipped > 0 {
                eprintln!(
                    "[WARN] skipped {}/{} {label} rows",
                    summary.rows_skipped, summary.rows_read
                );
                for err in &summary.errors {
                    eprintln!("   - {err}");
                }
            }
        }
        if load.orphan_deliveries > 0 {
            eprintln!(
                "[WARN] {} deliveries reference unknown matches",
                load.orphan_deliveries
            );
        }
        dataset
    };

    let (query, warnings) = query_from_args(&config, &args);
    for warning in &warnings {
        eprintln!("{warning}");
    }
    let report = build_report(&dataset, &query).context("invalid report query")?;

    if let Some(path) = arg_value(&args, "--xlsx").map(PathBuf::from) {
        let summary = export_report_xlsx(&path, &report)?;
        eprintln!(
            "[INFO] wrote {} sheets ({} rows) to {}",
            summary.sheets,
            summary.rows,
            path.display()
        );
    }

    if has_flag(&args, "--json") {
        println!("{}", report_to_json(&report).context("serialize report")?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn query_from_args(config: &Config, args: &[String]) -> (DashboardQuery, Vec<String>) {
    let mut warnings = Vec::new();
    let mut q = DashboardQuery::from_config(config);
    q.team = arg_value(args, "--team");
    q.season = arg_value(args, "--season");
    match (&q.team, arg_value(args, "--opponent")) {
        (Some(team), Some(opponent)) => {
            q.head_to_head = Some((team.clone(), opponent.clone()));
            q.compare = Some((team.clone(), opponent));
        }
        (None, Some(opponent)) => warnings.push(format!(
            "[WARN] --opponent {opponent:?} ignored without --team"
        )),
        _ => {}
    }
    q.venue_team = q.team.clone();
    q.player = arg_value(args, "--player");
    q.batter = arg_value(args, "--batter");
    q.bowler = arg_value(args, "--bowler");
    if q.batter.is_some() != q.bowler.is_some() {
        warnings.push("[WARN] duel needs both --batter and --bowler".to_string());
    }
    (q, warnings)
}

fn print_report(report: &DashboardReport) {
    print_ranked("Total wins", &report.overview.wins, |v| v.to_string());
    print_ranked("Toss decisions", &report.overview.toss_decisions, |v| {
        v.to_string()
    });
    print_ranked("Top batters (runs)", &report.batting.top_runs, |v| {
        v.to_string()
    });
    print_ranked(
        "Top batters (strike rate)",
        &report.batting.top_strike_rate,
        |v| format!("{v:.2}"),
    );
    print_ranked("Most sixes", &report.batting.most_sixes, |v| v.to_string());
    print_ranked("Most fours", &report.batting.most_fours, |v| v.to_string());
    print_ranked("Top bowlers (wickets)", &report.bowling.top_wickets, |v| {
        v.to_string()
    });
    print_ranked("Top bowlers (economy)", &report.bowling.best_economy, |v| {
        format!("{v:.2}")
    });

    if let Some(matches) = &report.season_matches {
        println!("\nSeason matches: {}", matches.len());
        for m in matches {
            println!(
                "  {} {} vs {} -> {} @ {}",
                m.date.map(|d| d.to_string()).unwrap_or_default(),
                m.team1,
                m.team2,
                m.winner.as_deref().unwrap_or("no result"),
                m.venue
            );
        }
    }
    if let Some(awards) = &report.season_awards {
        print_ranked("Player of the match awards", awards, |v| v.to_string());
    }
    if let Some(cmp) = &report.comparison {
        println!("\nComparison");
        for rec in [&cmp.a, &cmp.b] {
            println!(
                "  {}: {} wins / {} matches ({:.2}%), avg runs {:.1}, avg wickets {:.1}",
                rec.team,
                rec.wins,
                rec.total_matches,
                rec.win_pct,
                rec.avg_runs_per_match,
                rec.avg_wickets_per_match
            );
        }
        let h2h = &cmp.head_to_head;
        println!(
            "  head-to-head: {} matches, {} {} / {} {}",
            h2h.matches.len(),
            h2h.team_a,
            h2h.wins_for(&h2h.team_a),
            h2h.team_b,
            h2h.wins_for(&h2h.team_b)
        );
    }
    if let Some(v) = &report.venues {
        println!("\n{} win % by venue", v.team);
        for s in &v.venues {
            println!(
                "  {:<40} {:>3}/{:<3} {:.2}%",
                s.venue, s.wins, s.matches_at_venue, s.win_pct
            );
        }
    }
    if let Some(p) = &report.player {
        println!(
            "\n{}: {} runs off {} balls (SR {:.2}), {} wickets, {} matches",
            p.player,
            p.batting.runs,
            p.batting.balls_faced,
            p.batting.strike_rate,
            p.bowling.wickets,
            p.matches_played
        );
    }
    if let Some(d) = &report.duel {
        println!(
            "\n{} vs {}: {} balls, {} runs, SR {:.2}, 4s {}, 6s {}, dismissals {}",
            d.batter, d.bowler, d.balls, d.runs, d.strike_rate, d.fours, d.sixes, d.dismissals
        );
    }
}

fn print_ranked<T>(title: &str, rows: &[Ranked<T>], fmt: impl Fn(&T) -> String) {
    println!("\n{title}");
    if rows.is_empty() {
        println!("  (none)");
    }
    for (idx, row) in rows.iter().enumerate() {
        println!("  {:>2}. {:<32} {}", idx + 1, row.name, fmt(&row.value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn opponent_without_team_warns() {
        let (q, warnings) = query_from_args(
            &Config::default(),
            &args(&["--opponent", "Mumbai Indians"]),
        );
        assert!(q.head_to_head.is_none());
        assert!(q.compare.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("[WARN]"));
        assert!(warnings[0].contains("--opponent"));
    }

    #[test]
    fn team_and_opponent_build_both_sections() {
        let (q, warnings) = query_from_args(
            &Config::default(),
            &args(&["--team=Chennai Super Kings", "--opponent", "Mumbai Indians"]),
        );
        let pair = Some((
            "Chennai Super Kings".to_string(),
            "Mumbai Indians".to_string(),
        ));
        assert_eq!(q.head_to_head, pair);
        assert_eq!(q.compare, pair);
        assert_eq!(q.venue_team.as_deref(), Some("Chennai Super Kings"));
        assert!(warnings.is_empty());
    }
}
