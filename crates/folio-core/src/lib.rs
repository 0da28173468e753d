//! Core domain types and the [`store::PortfolioStore`] trait.
//!
//! This crate knows nothing about HTTP or SQL. The API and storage crates
//! both depend on it and meet only through the trait.

pub mod education;
pub mod error;
pub mod experience;
pub mod profile;
pub mod project;
pub mod skill;
pub mod store;

pub use error::{Error, Result};
