//! Utility functions.
//!
//! Collection of helpers used across the crate.

pub mod snowflake;

pub use snowflake::parse_snowflake;
