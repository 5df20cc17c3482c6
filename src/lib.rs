pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod logging;
pub mod setup;
pub mod templates;
