pub mod app_error;
pub mod config;
pub mod identity;
pub mod lookup;
pub mod sources;
pub mod upload;
pub mod web;

pub use crate::config::AppConfig;
