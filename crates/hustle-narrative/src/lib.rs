//! Choose Your Hustle — the SMS narrative game engine.
//!
//! Responsible for interpreting a player's text reply against the current
//! narrative node, applying net worth effects, detecting wins and deaths, and
//! composing the next prompt.

pub mod application;
pub mod domain;
