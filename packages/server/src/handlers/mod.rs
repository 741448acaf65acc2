pub mod admin;
pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod photo;
pub mod vote;
