//! Hustle Core — shared abstractions.
//!
//! This crate defines the traits and types the game engine and its
//! collaborators agree on: the progress store, the outbound messaging
//! gateway, time, and the error taxonomy. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod messaging;
pub mod repository;
