//! Shared test mocks and utilities for the SMS hustle game engine.

mod clock;
mod gateway;
mod repository;

pub use clock::FixedClock;
pub use gateway::{FailingGateway, RecordingGateway};
pub use repository::{FailingProgressRepository, InMemoryProgressRepository};
