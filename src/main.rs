use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};

use ipl_terminal::config::Config;
use ipl_terminal::dataset::{Dataset, LoadReport, MatchRecord};
use ipl_terminal::rank::Ranked;
use ipl_terminal::report::DashboardReport;
use ipl_terminal::state::{AppState, Selector, Tab};
use ipl_terminal::synthetic::synthetic_dataset;
use ipl_terminal::team::TeamRecord;

const DEMO_SEED: u64 = 2008;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let selection = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Right => {
                self.state.tab = self.state.tab.next();
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.state.tab = self.state.tab.prev();
                None
            }
            KeyCode::Char('t') => Some((Selector::Team, true)),
            KeyCode::Char('T') => Some((Selector::Team, false)),
            KeyCode::Char('o') => Some((Selector::Opponent, true)),
            KeyCode::Char('O') => Some((Selector::Opponent, false)),
            KeyCode::Char('s') => Some((Selector::Season, true)),
            KeyCode::Char('S') => Some((Selector::Season, false)),
            KeyCode::Char('p') => Some((Selector::Player, true)),
            KeyCode::Char('P') => Some((Selector::Player, false)),
            KeyCode::Char('a') => Some((Selector::Batter, true)),
            KeyCode::Char('A') => Some((Selector::Batter, false)),
            KeyCode::Char('w') => Some((Selector::Bowler, true)),
            KeyCode::Char('W') => Some((Selector::Bowler, false)),
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                None
            }
            _ => None,
        };
        if let Some((selector, forward)) = selection {
            self.state.cycle(selector, forward);
            self.state.refresh();
        }
    }
}

fn main() -> Result<()> {
    let config = Config::from_env_and_args();
    let (dataset, load_logs) = load_dataset(&config)?;

    let mut state = AppState::new(dataset, config);
    for line in load_logs {
        state.push_log(line);
    }
    state.refresh();
    let mut app = App::new(state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn load_dataset(config: &Config) -> Result<(Dataset, Vec<String>)> {
    if config.demo {
        let dataset = synthetic_dataset(DEMO_SEED, 5, 60);
        let line = format!(
            "[INFO] Demo data: {} matches, {} deliveries",
            dataset.matches.len(),
            dataset.deliveries.len()
        );
        return Ok((dataset, vec![line]));
    }
    let (dataset, report) = Dataset::load(&config.matches_csv, &config.deliveries_csv)
        .context("load match data (pass --demo to use generated data)")?;
    Ok((dataset, load_log_lines(&report)))
}

fn load_log_lines(report: &LoadReport) -> Vec<String> {
    let mut out = vec![format!(
        "[INFO] Loaded {} matches, {} deliveries",
        report.matches.rows_read - report.matches.rows_skipped,
        report.deliveries.rows_read - report.deliveries.rows_skipped
    )];
    for (label, summary) in [("matches", &report.matches), ("deliveries", &report.deliveries)] {
        if summary.rows_skipped > 0 {
            out.push(format!(
                "[WARN] Skipped {} {label} rows",
                summary.rows_skipped
            ));
            for err in &summary.errors {
                out.push(format!("[WARN]   {err}"));
            }
        }
    }
    if report.orphan_deliveries > 0 {
        out.push(format!(
            "[WARN] {} deliveries reference unknown matches",
            report.orphan_deliveries
        ));
    }
    out
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.report {
        Some(report) => match app.state.tab {
            Tab::Overview => render_overview(frame, chunks[1], report),
            Tab::Batting => render_batting(frame, chunks[1], report, &app.state),
            Tab::Bowling => render_bowling(frame, chunks[1], report, &app.state),
            Tab::Team => render_team(frame, chunks[1], report, &app.state),
            Tab::Venue => render_venue(frame, chunks[1], report),
            Tab::Player => render_player(frame, chunks[1], report, &app.state),
            Tab::Duel => render_duel(frame, chunks[1], report),
        },
        None => {
            let empty =
                Paragraph::new("No data loaded").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, chunks[1]);
        }
    }

    render_logs(frame, chunks[2], &app.state);

    let footer = Paragraph::new(
        "Tab/←/→ Section | t Team | o Opponent | s Season | p Player | a Batter | w Bowler | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let tabs = Tab::ALL
        .iter()
        .map(|t| {
            if *t == state.tab {
                format!("[{}]", t.label())
            } else {
                t.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let line1 = format!("  IPL TERMINAL | {tabs}");
    let line2 = format!(
        "  Team: {} | Opponent: {} | Season: {}",
        state.selected_team().unwrap_or("-"),
        state.selected_opponent().unwrap_or("-"),
        state.selected_season().unwrap_or("-"),
    );
    format!("{line1}\n{line2}")
}

fn render_overview(frame: &mut Frame, area: Rect, report: &DashboardReport) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(1)])
        .split(cols[1]);

    frame.render_widget(
        ranked_bar_chart("Total Wins by Each Team", &report.overview.wins),
        cols[0],
    );
    frame.render_widget(
        ranked_bar_chart("Toss Decision: Bat vs Field", &report.overview.toss_decisions),
        right[0],
    );
    frame.render_widget(
        ranked_list(
            "Matches Played at Each Venue",
            &report.overview.venue_matches,
            |v| v.to_string(),
        ),
        right[1],
    );
}

fn render_batting(frame: &mut Frame, area: Rect, report: &DashboardReport, state: &AppState) {
    let quads = quadrants(area);
    frame.render_widget(
        ranked_bar_chart("Top Batters (by Runs)", &report.batting.top_runs),
        quads[0],
    );
    frame.render_widget(
        ranked_list(
            &format!(
                "Top Batters by Strike Rate (min {} balls)",
                state.config.min_balls_faced
            ),
            &report.batting.top_strike_rate,
            |v| format!("{v:.2}"),
        ),
        quads[1],
    );
    frame.render_widget(
        ranked_bar_chart("Most Sixes", &report.batting.most_sixes),
        quads[2],
    );
    frame.render_widget(
        ranked_bar_chart("Most Fours", &report.batting.most_fours),
        quads[3],
    );
}

fn render_bowling(frame: &mut Frame, area: Rect, report: &DashboardReport, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    frame.render_widget(
        ranked_bar_chart("Top Bowlers (by Wickets)", &report.bowling.top_wickets),
        cols[0],
    );
    frame.render_widget(
        ranked_list(
            &format!(
                "Top Bowlers by Economy (min {} balls)",
                state.config.min_balls_bowled
            ),
            &report.bowling.best_economy,
            |v| format!("{v:.2}"),
        ),
        cols[1],
    );
}

fn render_team(frame: &mut Frame, area: Rect, report: &DashboardReport, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let title = format!(
        "Matches Played by {} in {}",
        state.selected_team().unwrap_or("-"),
        state.selected_season().unwrap_or("-")
    );
    let matches = report.season_matches.as_deref().unwrap_or_default();
    frame.render_widget(match_table(&title, matches), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(rows[1]);

    match &report.comparison {
        Some(cmp) => {
            frame.render_widget(team_card(&cmp.a, Color::Yellow), cols[0]);
            frame.render_widget(team_card(&cmp.b, Color::Cyan), cols[1]);
        }
        None => {
            let hint = Paragraph::new("Select two different teams (t / o) to compare")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Team Comparison").borders(Borders::ALL));
            frame.render_widget(hint, cols[0]);
        }
    }

    if let Some(h2h) = &report.head_to_head {
        let title = format!("Head-to-Head: {} vs {}", h2h.team_a, h2h.team_b);
        let mut lines = vec![format!("Matches: {}", h2h.matches.len())];
        for row in &h2h.wins {
            lines.push(format!("{}: {} wins", row.name, row.value));
        }
        if h2h.no_result > 0 {
            lines.push(format!("No result: {}", h2h.no_result));
        }
        let widget = Paragraph::new(lines.join("\n"))
            .wrap(Wrap { trim: true })
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(widget, cols[2]);
    }
}

fn render_venue(frame: &mut Frame, area: Rect, report: &DashboardReport) {
    let Some(venues) = &report.venues else {
        frame.render_widget(Paragraph::new("No team selected"), area);
        return;
    };
    let rows = venues
        .venues
        .iter()
        .map(|v| Ranked::new(v.venue.clone(), v.win_pct.round() as u64))
        .collect::<Vec<_>>();
    frame.render_widget(
        ranked_bar_chart(&format!("{} Win % at Venues", venues.team), &rows),
        area,
    );
}

fn render_player(frame: &mut Frame, area: Rect, report: &DashboardReport, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    if let Some(p) = &report.player {
        let text = [
            format!("Total Runs:     {}", p.batting.runs),
            format!("Total Wickets:  {}", p.bowling.wickets),
            format!("Balls Faced:    {}", p.batting.balls_faced),
            format!("Strike Rate:    {:.2}", p.batting.strike_rate),
            format!("4s / 6s:        {} / {}", p.batting.fours, p.batting.sixes),
            format!("Balls Bowled:   {}", p.bowling.balls_bowled),
            format!(
                "Economy:        {}",
                p.bowling
                    .economy
                    .map(|e| format!("{e:.2}"))
                    .unwrap_or_else(|| "-".to_string())
            ),
            format!("Matches Played: {}", p.matches_played),
        ]
        .join("\n");
        let widget = Paragraph::new(text).block(
            Block::default()
                .title(format!("Stats for: {}", p.player))
                .borders(Borders::ALL),
        );
        frame.render_widget(widget, cols[0]);
    }

    let awards = report.season_awards.as_deref().unwrap_or_default();
    frame.render_widget(
        ranked_bar_chart(
            &format!(
                "Player of the Match Awards {}",
                state.selected_season().unwrap_or("-")
            ),
            awards,
        ),
        cols[1],
    );
}

fn render_duel(frame: &mut Frame, area: Rect, report: &DashboardReport) {
    let Some(d) = &report.duel else {
        frame.render_widget(Paragraph::new("Select a batter (a) and bowler (w)"), area);
        return;
    };
    let text = [
        format!("Balls Faced:  {}", d.balls),
        format!("Runs Scored:  {}", d.runs),
        format!("Strike Rate:  {:.2}", d.strike_rate),
        format!("4s:           {}", d.fours),
        format!("6s:           {}", d.sixes),
        format!("Dismissals:   {}", d.dismissals),
    ]
    .join("\n");
    let widget = Paragraph::new(text).block(
        Block::default()
            .title(format!("{} vs {}", d.batter, d.bowler))
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, area);
}

fn render_logs(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.logs.len().saturating_sub(visible);
    let text = state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().title("Log").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn quadrants(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let mut out = Vec::with_capacity(4);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        out.extend(cols.iter().copied());
    }
    out
}

fn ranked_bar_chart<'a>(title: &str, rows: &[Ranked<u64>]) -> BarChart<'a> {
    let bars = rows
        .iter()
        .map(|r| {
            Bar::default()
                .value(r.value)
                .label(Line::from(r.name.clone()))
                .text_value(r.value.to_string())
                .style(Style::default().fg(Color::Green))
        })
        .collect::<Vec<_>>();
    BarChart::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().add_modifier(Modifier::BOLD))
}

fn ranked_list<'a, T>(
    title: &str,
    rows: &[Ranked<T>],
    fmt: impl Fn(&T) -> String,
) -> Paragraph<'a> {
    let text = if rows.is_empty() {
        "No qualifying entries".to_string()
    } else {
        rows.iter()
            .enumerate()
            .map(|(idx, r)| format!("{:>2}. {:<32} {}", idx + 1, r.name, fmt(&r.value)))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Paragraph::new(text).block(Block::default().title(title.to_string()).borders(Borders::ALL))
}

fn match_table<'a>(title: &str, matches: &[MatchRecord]) -> Paragraph<'a> {
    let mut lines = vec![format!(
        "{:<12} {:<28} {:<28} {:<28} {}",
        "Date", "Team 1", "Team 2", "Winner", "Venue"
    )];
    for m in matches {
        lines.push(format!(
            "{:<12} {:<28} {:<28} {:<28} {}",
            m.date.map(|d| d.to_string()).unwrap_or_default(),
            m.team1,
            m.team2,
            m.winner.as_deref().unwrap_or("-"),
            m.venue
        ));
    }
    Paragraph::new(lines.join("\n"))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
}

fn team_card<'a>(rec: &TeamRecord, color: Color) -> Paragraph<'a> {
    let mut lines = vec![
        format!("Total Wins:        {}", rec.wins),
        format!("Win %:             {:.2}%", rec.win_pct),
        format!("Avg Runs/Match:    {:.1}", rec.avg_runs_per_match),
        format!("Avg Wickets/Match: {:.1}", rec.avg_wickets_per_match),
    ];
    if let Some(b) = &rec.top_batter {
        lines.push(format!("Top Batter:        {} ({} runs)", b.name, b.value));
    }
    if let Some(b) = &rec.top_bowler {
        lines.push(format!("Top Bowler:        {} ({} wickets)", b.name, b.value));
    }
    Paragraph::new(lines.join("\n"))
        .style(Style::default().fg(color))
        .block(Block::default().title(rec.team.clone()).borders(Borders::ALL))
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "IPL Terminal - Help",
        "",
        "Sections:",
        "  Tab / →      Next section",
        "  Shift-Tab / ← Previous section",
        "",
        "Selectors (shift reverses):",
        "  t            Team",
        "  o            Opponent (head-to-head, comparison)",
        "  s            Season",
        "  p            Player",
        "  a            Batter (duel)",
        "  w            Bowler (duel)",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
