//! Shared UI components.

pub mod guard;
pub mod modal;
pub mod navbar;
