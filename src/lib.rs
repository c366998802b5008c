// Main library entry point for Delineate.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use application::{delineate, DelineateUsecase};
pub use config::DelineateConfig;
pub use error::DelineateError;
