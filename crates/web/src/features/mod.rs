pub mod clubs;
pub mod competitions;
pub mod schedules;
pub mod standings;
