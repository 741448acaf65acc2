pub mod photo;
pub mod user;
pub mod vote;
