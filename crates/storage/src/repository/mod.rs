pub mod club;
pub mod competition;
pub mod schedule;
