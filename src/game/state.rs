use super::action::Direction;

/// A cell on the game grid, relative to the arena centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The circular playing field, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    radius: u32,
}

impl Arena {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// x² + y² ≤ R², boundary included
    pub fn contains(&self, pos: Position) -> bool {
        let (x, y, r) = (i128::from(pos.x), i128::from(pos.y), i128::from(self.radius));
        x * x + y * y <= r * r
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(Position::ORIGIN)
    }
}

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Over,
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the arena
    Boundary,
    /// Head landed on the snake's own body
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Position,
    pub arena: Arena,
    pub status: GameStatus,
    pub ticks: u32,
}

impl GameState {
    /// A not-yet-started game with the canonical snake and the given food
    pub fn new(arena: Arena, food: Position) -> Self {
        Self {
            snake: Snake::default(),
            direction: Direction::default(),
            food,
            arena,
            status: GameStatus::NotStarted,
            ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Food eaten so far
    pub fn score(&self) -> u32 {
        self.snake.len().saturating_sub(1) as u32
    }

    /// The cell the head would move to on the next tick
    pub fn next_head(&self) -> Position {
        self.snake.head().moved_in_direction(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn test_arena_membership() {
        let arena = Arena::new(1);
        assert!(arena.contains(Position::ORIGIN));
        assert!(arena.contains(Position::new(1, 0)));
        assert!(arena.contains(Position::new(0, -1)));
        assert!(!arena.contains(Position::new(1, 1)));
        assert!(!arena.contains(Position::new(2, 0)));

        let arena = Arena::new(20);
        assert!(arena.contains(Position::new(12, 16))); // 144 + 256 = 400
        assert!(!arena.contains(Position::new(12, 17)));
    }

    #[test]
    fn test_arena_does_not_overflow() {
        let arena = Arena::new(u32::MAX);
        assert!(arena.contains(Position::new(i32::MAX, 0)));
        assert!(!Arena::new(10).contains(Position::new(i32::MIN, i32::MIN)));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::default();
        snake.advance(Position::new(1, 0), false);
        assert_eq!(snake.body, vec![Position::new(1, 0)]);

        snake.advance(Position::new(2, 0), true);
        assert_eq!(snake.body, vec![Position::new(2, 0), Position::new(1, 0)]);
        assert_eq!(snake.head(), Position::new(2, 0));
        assert_eq!(snake.tail(), Position::new(1, 0));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake = Snake {
            body: vec![Position::new(0, 0), Position::new(-1, 0), Position::new(-2, 0)],
        };
        assert!(snake.occupies(Position::new(0, 0)));
        assert!(snake.occupies(Position::new(-2, 0)));
        assert!(!snake.occupies(Position::new(1, 0)));
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(Arena::new(20), Position::new(5, 5));
        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.snake.body, vec![Position::ORIGIN]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score(), 0);
        assert_eq!(state.next_head(), Position::new(1, 0));
    }

    #[test]
    fn test_score_of_empty_body_is_zero() {
        let mut state = GameState::new(Arena::new(5), Position::new(1, 1));
        state.snake.body.clear();
        assert_eq!(state.score(), 0);
    }
}
