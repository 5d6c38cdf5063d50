pub mod admin;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod server;
pub mod session;
pub mod store;
pub mod types;
