//! Invite Admin library.
//!
//! The admin dashboard as a library, so the CLI can reuse password hashing
//! and integration tests can drive the router directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
