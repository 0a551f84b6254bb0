//! Chaos Brawler - deterministic combat core for a 2D side-scrolling brawler

pub mod actor;
pub mod core;
pub mod encounter;
pub mod enemy;
pub mod player;
