//! Food placement by rejection sampling inside the arena

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Arena, Position, Snake};

/// Default number of draws before occupancy stops being checked
pub const MAX_ATTEMPTS: u32 = 100;

/// How the retry loop behaves once `max_attempts` draws have been made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Stop checking occupancy after `max_attempts`, but keep rejecting
    /// draws outside the circle until one lands inside.
    #[default]
    Faithful,
    /// Stop after `max_attempts` draws no matter what. Returns the last
    /// in-circle draw, or the origin if none landed inside.
    Strict,
}

/// Anything that can say whether a cell is taken
pub trait Occupancy {
    fn is_occupied(&self, pos: Position) -> bool;
}

impl Occupancy for Snake {
    fn is_occupied(&self, pos: Position) -> bool {
        self.occupies(pos)
    }
}

impl Occupancy for [Position] {
    fn is_occupied(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

/// Bounded-retry random position generator for food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSampler {
    pub max_attempts: u32,
    pub policy: RetryPolicy,
}

impl FoodSampler {
    pub fn new(max_attempts: u32, policy: RetryPolicy) -> Self {
        Self {
            max_attempts,
            policy,
        }
    }

    /// Draw a cell inside `arena` that is not in `occupied`.
    ///
    /// Occupancy is best effort: once attempts run out the last in-circle
    /// draw is returned even if the snake sits on it.
    pub fn sample<R, O>(&self, rng: &mut R, occupied: &O, arena: Arena) -> Position
    where
        R: Rng + ?Sized,
        O: Occupancy + ?Sized,
    {
        match self.policy {
            RetryPolicy::Faithful => self.sample_faithful(rng, occupied, arena),
            RetryPolicy::Strict => self.sample_strict(rng, occupied, arena),
        }
    }

    fn sample_faithful<R, O>(&self, rng: &mut R, occupied: &O, arena: Arena) -> Position
    where
        R: Rng + ?Sized,
        O: Occupancy + ?Sized,
    {
        let mut attempts = 0u32;
        loop {
            let pos = draw(rng, arena);
            attempts = attempts.saturating_add(1);

            if !arena.contains(pos) {
                continue;
            }
            if occupied.is_occupied(pos) && attempts < self.max_attempts {
                continue;
            }
            if occupied.is_occupied(pos) {
                tracing::debug!(attempts, ?pos, "food sampler exhausted, placing on snake");
            }
            return pos;
        }
    }

    fn sample_strict<R, O>(&self, rng: &mut R, occupied: &O, arena: Arena) -> Position
    where
        R: Rng + ?Sized,
        O: Occupancy + ?Sized,
    {
        let mut last_inside = None;
        for _ in 0..self.max_attempts {
            let pos = draw(rng, arena);
            if !arena.contains(pos) {
                continue;
            }
            if !occupied.is_occupied(pos) {
                return pos;
            }
            last_inside = Some(pos);
        }

        tracing::debug!(
            attempts = self.max_attempts,
            ?last_inside,
            "food sampler exhausted"
        );
        last_inside.unwrap_or(Position::ORIGIN)
    }
}

impl Default for FoodSampler {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, RetryPolicy::default())
    }
}

/// Uniform integer pair in [-R, R] x [-R, R]
fn draw<R: Rng + ?Sized>(rng: &mut R, arena: Arena) -> Position {
    // Cells are i32, so larger radii are clamped to what a Position can hold
    let r = i32::try_from(arena.radius()).unwrap_or(i32::MAX);
    Position::new(rng.gen_range(-r..=r), rng.gen_range(-r..=r))
}
