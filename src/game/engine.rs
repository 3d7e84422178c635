use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;

use super::{
    action::Direction,
    config::GameConfig,
    sampler::FoodSampler,
    state::{Arena, CollisionType, GameState, GameStatus, Position, Snake},
};

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game not running, nothing changed
    Idle,
    /// Snake moved one cell
    Moved,
    /// Snake moved onto the food and grew by one
    Grew,
    /// Snake hit something; the game is over
    GameOver(CollisionType),
}

/// The game engine that handles all game logic
pub struct GameEngine {
    arena: Arena,
    sampler: FoodSampler,
    prevent_reversal: bool,
    rng: StdRng,
    revision: watch::Sender<u64>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (revision, _) = watch::channel(0);

        Self {
            arena: Arena::new(config.circle_radius),
            sampler: FoodSampler::new(config.max_attempts, config.retry_policy),
            prevent_reversal: config.prevent_reversal,
            rng,
            revision,
        }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// A fresh game waiting for `start`
    pub fn new_game(&mut self) -> GameState {
        let food = self.place_food(&Snake::default());
        GameState::new(self.arena, food)
    }

    /// Reset everything and begin running, whatever the current status
    pub fn start(&mut self, state: &mut GameState) {
        state.snake = Snake::default();
        state.direction = Direction::default();
        state.arena = self.arena;
        state.food = self.place_food(&state.snake);
        state.status = GameStatus::Running;
        state.ticks = 0;

        tracing::info!(radius = self.arena.radius(), food = ?state.food, "game started");
        self.notify();
    }

    /// Steer the snake; takes effect on the next tick
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) {
        if self.prevent_reversal
            && state.snake.len() > 1
            && state.direction.is_opposite(direction)
        {
            return;
        }
        state.direction = direction;
    }

    /// Advance the game by one step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::Idle;
        }

        let new_head = state.next_head();

        if let Some(collision) = self.check_collision(state, new_head) {
            state.status = GameStatus::Over;
            tracing::info!(
                ?collision,
                score = state.score(),
                ticks = state.ticks,
                "game over"
            );
            self.notify();
            return TickOutcome::GameOver(collision);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.ticks += 1;

        let outcome = if ate_food {
            state.food = self.place_food(&state.snake);
            tracing::debug!(length = state.snake.len(), food = ?state.food, "snake grew");
            TickOutcome::Grew
        } else {
            TickOutcome::Moved
        };

        self.notify();
        outcome
    }

    /// Receiver that changes whenever there is something new to draw
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Tell subscribers the state changed
    pub fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.arena.contains(pos) {
            return Some(CollisionType::Boundary);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn place_food(&mut self, snake: &Snake) -> Position {
        self.sampler.sample(&mut self.rng, snake, self.arena)
    }
}
