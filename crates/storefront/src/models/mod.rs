//! Domain models for local accounts.

pub mod user;

pub use user::UserRecord;
