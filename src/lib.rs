pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod export;
pub mod import;
pub mod models;

pub use error::{AppError, Result};
