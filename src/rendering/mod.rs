//! # Rendering Module
//!
//! Macroquad front-end: drawing the session, caching textures and playing sound cues.

pub mod audio;
pub mod display;
pub mod textures;
pub mod ui;

pub use audio::*;
pub use display::*;
pub use textures::*;
pub use ui::*;
