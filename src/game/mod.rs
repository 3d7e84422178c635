//! Core game logic for snake in a circular arena
//!
//! Nothing in here touches the terminal. The engine mutates an owned
//! `GameState` and announces changes over a watch channel.

pub mod action;
pub mod config;
pub mod engine;
pub mod sampler;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use sampler::{FoodSampler, Occupancy, RetryPolicy};
pub use state::{Arena, CollisionType, GameState, GameStatus, Position, Snake};
