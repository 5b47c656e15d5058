//! Invite Core - Shared domain library for the party invitation site.
//!
//! This crate provides the types and rules used by every component:
//! - `site` - Public invitation pages and the RSVP flow
//! - `admin` - Password-gated dashboard
//! - `cli` - Operator tooling (password hashing, schema check, seeding)
//!
//! # Architecture
//!
//! Everything outside [`backend`] is pure: no I/O, no HTTP clients. The
//! [`backend`] module (enabled with the `gateway` feature) is the only place
//! that talks to the hosted PostgREST service.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, party sizes and age bands
//! - [`models`] - Rows of the `confirmations`, `admin_settings` and `gifts` tables
//! - [`rsvp`] - RSVP validation and the derived confirmation columns
//! - [`links`] - Event details, the RSVP message and outbound deep links
//! - [`summary`] - Attendance aggregates shown on the dashboard
//! - [`guest_list`] - Printable guest-list rows and name collation
//! - [`gifts`] - Built-in gift suggestions and sort-order helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

#[cfg(feature = "gateway")]
pub mod backend;
pub mod gifts;
pub mod guest_list;
pub mod links;
pub mod models;
pub mod rsvp;
pub mod summary;
pub mod types;

pub use links::{EventDetails, Venue};
pub use models::*;
pub use rsvp::{Attendance, Companion, Rsvp, RsvpError, RsvpForm};
pub use summary::GuestSummary;
pub use types::*;
