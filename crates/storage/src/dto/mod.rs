pub mod claim;
pub mod common;
pub mod leaderboard;
pub mod student;
