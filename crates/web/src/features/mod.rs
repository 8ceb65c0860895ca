pub mod claims;
pub mod health;
pub mod leaderboard;
pub mod students;
