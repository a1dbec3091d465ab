//! Route modules.

pub mod health;
pub mod players;
pub mod sms;
