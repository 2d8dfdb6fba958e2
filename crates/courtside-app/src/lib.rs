// Courtside: configuration and the draft runner behind the `courtside` binary.

pub mod config;
pub mod runner;
