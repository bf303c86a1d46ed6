pub mod client;
pub mod models;
pub mod strings;

pub use client::{StatsClient, StatsError};
pub use models::{LeaderboardEntry, LeaderboardKind, MatchRecord, Outcome, Participant};
pub use strings::StringTable;
