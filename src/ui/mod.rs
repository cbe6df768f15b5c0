//! UI module for ticketscout
//!
//! This module handles the panel components, rendering, and user
//! interactions.

pub mod app;
pub mod components;
pub mod core;
pub mod renderer;

pub use app::SearchPanel;
pub use renderer::run_app;
