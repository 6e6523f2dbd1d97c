//! Top users by quota consumption over a bounded reporting window.
//!
//! [`services::StatsView`] ties the pieces together: the time range
//! controller clamps the window, the query builder turns it into request
//! parameters, the fetcher runs the request and keeps the latest result set,
//! and the presenter derives per-user balance rows.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use errors::{AppError, Result};
