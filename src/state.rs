use std::collections::VecDeque;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::report::{DashboardQuery, DashboardReport, build_report};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Batting,
    Bowling,
    Team,
    Venue,
    Player,
    Duel,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Overview,
        Tab::Batting,
        Tab::Bowling,
        Tab::Team,
        Tab::Venue,
        Tab::Player,
        Tab::Duel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Batting => "Batting",
            Tab::Bowling => "Bowling",
            Tab::Team => "Team",
            Tab::Venue => "Venue",
            Tab::Player => "Player",
            Tab::Duel => "Duel",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Team,
    Opponent,
    Season,
    Player,
    Batter,
    Bowler,
}

pub struct AppState {
    pub dataset: Dataset,
    pub config: Config,
    pub tab: Tab,
    pub teams: Vec<String>,
    pub seasons: Vec<String>,
    pub players: Vec<String>,
    pub batters: Vec<String>,
    pub bowlers: Vec<String>,
    pub team_idx: usize,
    pub opponent_idx: usize,
    pub season_idx: usize,
    pub player_idx: usize,
    pub batter_idx: usize,
    pub bowler_idx: usize,
    pub report: Option<DashboardReport>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config) -> Self {
        let teams = dataset.teams();
        let opponent_idx = usize::from(teams.len() > 1);
        Self {
            seasons: dataset.seasons(),
            players: dataset.players(),
            batters: dataset.batters(),
            bowlers: dataset.bowlers(),
            teams,
            dataset,
            config,
            tab: Tab::Overview,
            team_idx: 0,
            opponent_idx,
            season_idx: 0,
            player_idx: 0,
            batter_idx: 0,
            bowler_idx: 0,
            report: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn selected_team(&self) -> Option<&str> {
        self.teams.get(self.team_idx).map(String::as_str)
    }

    pub fn selected_opponent(&self) -> Option<&str> {
        self.teams.get(self.opponent_idx).map(String::as_str)
    }

    pub fn selected_season(&self) -> Option<&str> {
        self.seasons.get(self.season_idx).map(String::as_str)
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.players.get(self.player_idx).map(String::as_str)
    }

    pub fn selected_batter(&self) -> Option<&str> {
        self.batters.get(self.batter_idx).map(String::as_str)
    }

    pub fn selected_bowler(&self) -> Option<&str> {
        self.bowlers.get(self.bowler_idx).map(String::as_str)
    }

    pub fn cycle(&mut self, selector: Selector, forward: bool) {
        let (idx, len) = match selector {
            Selector::Team => (&mut self.team_idx, self.teams.len()),
            Selector::Opponent => (&mut self.opponent_idx, self.teams.len()),
            Selector::Season => (&mut self.season_idx, self.seasons.len()),
            Selector::Player => (&mut self.player_idx, self.players.len()),
            Selector::Batter => (&mut self.batter_idx, self.batters.len()),
            Selector::Bowler => (&mut self.bowler_idx, self.bowlers.len()),
        };
        if len == 0 {
            return;
        }
        *idx = if forward {
            (*idx + 1) % len
        } else {
            (*idx + len - 1) % len
        };
    }

    /// The comparison section is only requested for two different teams.
    pub fn query(&self) -> DashboardQuery {
        let mut q = DashboardQuery::from_config(&self.config);
        let team = self.selected_team().map(str::to_string);
        let opponent = self.selected_opponent().map(str::to_string);
        q.season = self.selected_season().map(str::to_string);
        if let (Some(a), Some(b)) = (&team, &opponent) {
            q.head_to_head = Some((a.clone(), b.clone()));
            if a != b {
                q.compare = Some((a.clone(), b.clone()));
            }
        }
        q.venue_team = team.clone();
        q.team = team;
        q.player = self.selected_player().map(str::to_string);
        q.batter = self.selected_batter().map(str::to_string);
        q.bowler = self.selected_bowler().map(str::to_string);
        q
    }

    pub fn refresh(&mut self) {
        let query = self.query();
        if query.compare.is_none() && query.head_to_head.is_some() {
            self.push_log("[INFO] Pick two different teams to compare");
        }
        match build_report(&self.dataset, &query) {
            Ok(report) => self.report = Some(report),
            Err(err) => self.push_log(format!("[WARN] Query rejected: {err}")),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
