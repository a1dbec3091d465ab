//! Hustle API — HTTP surface of the SMS hustle game engine.
//!
//! Receives inbound SMS webhooks, drives one game turn per message, and
//! delivers replies through the configured SMS provider.

pub mod config;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod state;
