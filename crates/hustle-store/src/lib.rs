//! PostgreSQL persistence for player progress.
//!
//! The table is created by the migrations under `migrations/` at the
//! workspace root.

pub mod pg_progress_repository;
