//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Local accounts: signup, login, profile and password changes

pub mod auth;
