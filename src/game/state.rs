use super::action::Direction;

/// A pixel-aligned cell on the board; both coordinates are multiples of the block size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
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
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a single-segment snake heading in `direction`
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// The segment right behind the head, if the snake has one
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    ///
    /// The tail counts even though it is about to move away this tick.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Current bait; `None` only when the snake fills the board
    pub food: Option<Position>,
    pub block_size: i32,
    /// Board width in pixels
    pub width: i32,
    /// Board height in pixels
    pub height: i32,
    pub score: u32,
    /// Number of baits eaten
    pub baits: u32,
    pub steps: u32,
    pub game_over: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, block_size: i32, width: i32, height: i32) -> Self {
        Self {
            snake,
            food,
            block_size,
            width,
            height,
            score: 0,
            baits: 0,
            steps: 0,
            game_over: false,
        }
    }

    /// Current velocity as a unit vector
    pub fn velocity(&self) -> (i32, i32) {
        self.snake.direction.velocity()
    }

    /// Wrap a position that stepped at most one cell off the board back onto it
    pub fn wrap(&self, pos: Position) -> Position {
        let wrap_axis = |v: i32, size: i32| {
            if v < 0 {
                size - self.block_size
            } else if v >= size {
                0
            } else {
                v
            }
        };

        Position::new(wrap_axis(pos.x, self.width), wrap_axis(pos.y, self.height))
    }

    /// Cell one step from `pos` in `direction`, wrapped onto the board
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Position {
        let (vx, vy) = direction.velocity();
        self.wrap(pos.moved_by(vx * self.block_size, vy * self.block_size))
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
