pub mod awards;
pub mod batting;
pub mod bowling;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod duel;
pub mod error;
pub mod export;
pub mod filter;
pub mod player;
pub mod rank;
pub mod report;
pub mod state;
pub mod synthetic;
pub mod team;
pub mod venue;
