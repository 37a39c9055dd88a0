//! # Utilities Module
//!
//! Utility functions shared by the game core.

pub mod math;

pub use math::*;
