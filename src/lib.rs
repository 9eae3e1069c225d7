//! # Notifications Library
//!
//! Core of the Notifications service: a tenant- and recipient-scoped
//! notification store exposed over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
