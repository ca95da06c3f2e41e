use std::path::PathBuf;

use crate::awards::DEFAULT_AWARDS_TOP_N;
use crate::batting::DEFAULT_MIN_BALLS_FACED;
use crate::bowling::DEFAULT_MIN_BALLS_BOWLED;

pub const DEFAULT_TOP_N: usize = 10;
const DEFAULT_MATCHES_CSV: &str = "matches.csv";
const DEFAULT_DELIVERIES_CSV: &str = "deliveries.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub matches_csv: PathBuf,
    pub deliveries_csv: PathBuf,
    pub min_balls_faced: u64,
    pub min_balls_bowled: u64,
    pub top_n: usize,
    pub awards_top_n: usize,
    pub demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matches_csv: PathBuf::from(DEFAULT_MATCHES_CSV),
            deliveries_csv: PathBuf::from(DEFAULT_DELIVERIES_CSV),
            min_balls_faced: DEFAULT_MIN_BALLS_FACED,
            min_balls_bowled: DEFAULT_MIN_BALLS_BOWLED,
            top_n: DEFAULT_TOP_N,
            awards_top_n: DEFAULT_AWARDS_TOP_N,
            demo: false,
        }
    }
}

impl Config {
    /// Reads `.env.local`/`.env`, then the process environment, then CLI flags.
    pub fn from_env_and_args() -> Self {
        load_dotenv();
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    /// Flags win over env vars, env vars win over defaults.
    pub fn from_sources(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Self {
        let mut cfg = Self::default();

        if let Some(path) = env_path(&env, "IPL_MATCHES_CSV") {
            cfg.matches_csv = path;
        }
        if let Some(path) = env_path(&env, "IPL_DELIVERIES_CSV") {
            cfg.deliveries_csv = path;
        }
        if let Some(n) = env_number(&env, "IPL_MIN_BALLS_FACED") {
            cfg.min_balls_faced = n;
        }
        if let Some(n) = env_number(&env, "IPL_MIN_BALLS_BOWLED") {
            cfg.min_balls_bowled = n;
        }
        if let Some(n) = env_number(&env, "IPL_TOP_N") {
            cfg.top_n = (n as usize).max(1);
        }
        if let Some(n) = env_number(&env, "IPL_AWARDS_TOP_N") {
            cfg.awards_top_n = (n as usize).max(1);
        }

        if let Some(path) = arg_value(args, "--matches") {
            cfg.matches_csv = PathBuf::from(path);
        }
        if let Some(path) = arg_value(args, "--deliveries") {
            cfg.deliveries_csv = PathBuf::from(path);
        }
        if let Some(n) = arg_value(args, "--min-balls-faced").and_then(|v| v.parse().ok()) {
            cfg.min_balls_faced = n;
        }
        if let Some(n) = arg_value(args, "--min-balls-bowled").and_then(|v| v.parse().ok()) {
            cfg.min_balls_bowled = n;
        }
        if let Some(n) = arg_value(args, "--top").and_then(|v| v.parse::<usize>().ok()) {
            cfg.top_n = n.max(1);
        }
        cfg.demo = has_flag(args, "--demo");
        cfg
    }
}

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

/// Accepts `--name=value` and `--name value`. Blank values are ignored.
pub fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn env_path(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    env(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn env_number(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    env(key).and_then(|v| v.trim().parse::<u64>().ok())
}
