//! Core types for the invitation site.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod age_band;
pub mod id;
pub mod party_size;

pub use age_band::AgeBand;
pub use id::*;
pub use party_size::{PartySize, PartySizeError};
