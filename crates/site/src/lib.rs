//! Invite Site library.
//!
//! The public invitation pages as a library, so the router can be driven
//! from integration tests without binding a port.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::app;
