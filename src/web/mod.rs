pub mod app;
pub mod handlers;
pub mod session_store;
pub mod state;
pub mod templates;
