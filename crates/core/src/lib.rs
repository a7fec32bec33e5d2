//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `storefront` - Catalog client, state store and local account flows
//! - `cli` - Terminal front end for browsing the catalog and managing accounts
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, mobile numbers,
//!   request statuses, pagination and form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
