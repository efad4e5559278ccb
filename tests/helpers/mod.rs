//! Test helpers module
//!
//! Builders for request and model values, and PostgreSQL test database setup.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
