//! Application layer: turn orchestration and read-only queries.

pub mod command_handlers;
pub mod query_handlers;
