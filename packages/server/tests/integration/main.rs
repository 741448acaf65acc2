mod common;

mod admin;
mod leaderboard;
mod vote;
