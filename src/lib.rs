pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
