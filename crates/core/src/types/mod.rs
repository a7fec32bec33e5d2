//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod mobile;
pub mod pagination;
pub mod price;
pub mod status;
pub mod validation;

pub use email::{Email, EmailError};
pub use id::*;
pub use mobile::{Mobile, MobileError};
pub use pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZES, page_count, skip_for_page};
pub use price::Price;
pub use status::*;
pub use validation::{FieldError, MIN_PASSWORD_LENGTH};
