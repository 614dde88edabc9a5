//! Merchant statistics API client for adstat
//!
//! This crate wraps the two read endpoints adstat consumes: the campaign
//! list of a merchant account and the per-category cost/click breakdown of
//! one campaign over a date range.

pub mod campaign;
pub mod client;

pub use campaign::Campaign;
pub use client::{DEFAULT_BASE_URL, StatisticsClient};
