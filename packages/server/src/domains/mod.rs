// Business domains
pub mod scouting;
