//! Domain model: the narrative script, player progress, and outcome resolution.

pub mod commands;
pub mod game;
pub mod hustle;
pub mod progress;
pub mod resolver;
pub mod script;
