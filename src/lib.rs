//! Circle Snake - snake in a circular arena, played in the terminal
//!
//! This library provides:
//! - Core game logic and food placement (game module)
//! - Canvas rendering of the arena (render module)
//! - Keyboard mapping (input module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
