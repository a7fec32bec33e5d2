//! Shopfront Storefront library.
//!
//! Everything behind the terminal front end: configuration, the remote
//! catalog client, the catalog state store and its controller, the local
//! account store and the navigation routes.
//!
//! # Modules
//!
//! - [`catalog`] - HTTP client for the product catalog API
//! - [`store`] - Catalog state, reducer and controller
//! - [`db`] - Key-value persistence and the user repository
//! - [`services`] - Account flows over the persisted users
//! - [`routes`] - Navigation paths and the views they resolve to

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
