//! # Query Building
//!
//! Pure helpers that turn request input into SQL:
//! - column identifier normalization for JSON keys
//! - string literal quoting
//! - statement templates for the catalog routes

mod normalize;
mod quote;
mod statement;

pub use normalize::to_camel_case;
pub use quote::{like_contains, quote};
pub use statement::{Binding, InvalidIdentifier, SqlIdentifier, Statement};
