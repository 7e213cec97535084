pub mod club;
pub mod common;
pub mod competition;
pub mod schedule;
pub mod standings;
