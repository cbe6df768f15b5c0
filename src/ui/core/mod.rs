//! Core UI functionality for the ticketscout panel.
//!
//! This module contains the building blocks the panel components sit
//! on: the [`Component`] trait, the [`Action`] enum describing state
//! transitions, and the [`EventHandler`] polling loop.

pub mod actions;
pub mod component;
pub mod event_handler;

pub use actions::Action;
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
