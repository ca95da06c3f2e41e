use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ipl_terminal::batting::{top_run_scorers, top_strike_rates};
use ipl_terminal::bowling::{best_economy, top_wicket_takers};
use ipl_terminal::config::Config;
use ipl_terminal::dataset::{Dataset, read_deliveries};
use ipl_terminal::report::{DashboardQuery, build_report};
use ipl_terminal::synthetic::synthetic_dataset;
use ipl_terminal::team::{head_to_head, team_record};

fn league() -> Dataset {
    // Roughly one full era of IPL: 10 seasons, 60 matches each.
    synthetic_dataset(2008, 10, 60)
}

fn deliveries_csv(ds: &Dataset) -> String {
    let mut out = String::from(
        "match_id,batting_team,bowling_team,ball,batter,bowler,batsman_runs,total_runs,dismissal_kind\n",
    );
    for d in &ds.deliveries {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            d.match_id,
            d.batting_team,
            d.bowling_team,
            d.ball,
            d.batter,
            d.bowler,
            d.batsman_runs,
            d.total_runs,
            d.dismissal_kind.as_ref().map(|k| k.label()).unwrap_or("NA"),
        ));
    }
    out
}

fn bench_leaderboards(c: &mut Criterion) {
    let ds = league();
    c.bench_function("leaderboards", |b| {
        b.iter(|| {
            let rows = black_box(&ds.deliveries);
            black_box(top_run_scorers(rows, 10));
            black_box(top_strike_rates(rows, 200, 10));
            black_box(top_wicket_takers(rows, 10));
            black_box(best_economy(rows, 300, 10));
        })
    });
}

fn bench_team_queries(c: &mut Criterion) {
    let ds = league();
    let teams = ds.teams();
    c.bench_function("team_record_all", |b| {
        b.iter(|| {
            for team in &teams {
                black_box(team_record(&ds, team).unwrap());
            }
        })
    });
    c.bench_function("head_to_head", |b| {
        b.iter(|| black_box(head_to_head(&ds, &teams[0], &teams[1]).unwrap()))
    });
}

fn bench_build_report(c: &mut Criterion) {
    let ds = league();
    let teams = ds.teams();
    let mut q = DashboardQuery::from_config(&Config::default());
    q.team = Some(teams[0].clone());
    q.season = ds.seasons().first().cloned();
    q.head_to_head = Some((teams[0].clone(), teams[1].clone()));
    q.compare = q.head_to_head.clone();
    q.venue_team = q.team.clone();
    q.player = ds.players().first().cloned();
    q.batter = ds.batters().first().cloned();
    q.bowler = ds.bowlers().first().cloned();

    c.bench_function("build_report", |b| {
        b.iter(|| black_box(build_report(black_box(&ds), &q).unwrap()))
    });
}

fn bench_csv_ingest(c: &mut Criterion) {
    let raw = deliveries_csv(&synthetic_dataset(2008, 2, 60));
    c.bench_function("deliveries_csv_ingest", |b| {
        b.iter(|| {
            let (rows, _) = read_deliveries(black_box(raw.as_bytes())).unwrap();
            black_box(rows.len());
        })
    });
}

criterion_group!(
    benches,
    bench_leaderboards,
    bench_team_queries,
    bench_build_report,
    bench_csv_ingest
);
criterion_main!(benches);
