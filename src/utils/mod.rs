//! Utility modules for the ticketscout application.
//!
//! This module contains common helpers used throughout the application.
//! They are pure functions with no side effects so they can be unit
//! tested in isolation.
//!
//! # Available Utilities
//!
//! - [`text`] - Label escaping, truncation, and keyword extraction

pub mod text;
