//! Ticketscout - a terminal search sidebar for Zendesk-style
//! ticketing platforms
//!
//! This library provides a terminal panel for searching tickets,
//! users, and organizations on a ticketing platform, anchored to an
//! optional context ticket the way an embedded sidebar app is. Its
//! centerpiece is the [`ui::components::DropdownWithTags`]
//! multi-select control.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`i18n`] - Translation catalog and lookup
//! * [`platform`] - The ticketing platform's RPC-like client boundary
//! * [`search`] - Query assembly, execution, and pagination
//! * [`storage`] - Small persisted key-value state
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Translation lookup
pub mod i18n;

/// Logging setup
pub mod logger;

/// Ticketing platform client boundary
pub mod platform;

/// Search feature: queries, results, pagination
pub mod search;

/// Persisted key-value state between runs
pub mod storage;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions and helpers
pub mod utils;
