use super::{
    action::Direction,
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// What a single tick did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Snake moved one cell, length unchanged
    Moved,
    /// Snake moved onto the bait at `cell` and grew by one
    Ate { cell: Position },
    /// New head hit the body; the game is now over
    Collided,
    /// Game was already over, nothing changed
    Halted,
}

impl StepOutcome {
    /// Whether the game is over after this step
    pub fn terminated(&self) -> bool {
        matches!(self, StepOutcome::Collided | StepOutcome::Halted)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let (cx, cy) = self.config.start_cell;
        let block = self.config.block_size;
        let snake = Snake::new(Position::new(cx * block, cy * block), Direction::Right);
        let food = self.place_food(&snake);

        GameState::new(
            snake,
            food,
            block,
            self.config.board_width(),
            self.config.board_height(),
        )
    }

    /// Change heading unless it would send the head straight into the neck
    ///
    /// Returns whether the direction was accepted.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if let Some(neck) = state.snake.neck() {
            if state.neighbor(state.snake.head(), direction) == neck {
                return false;
            }
        }

        state.snake.direction = direction;
        true
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        if state.game_over {
            return StepOutcome::Halted;
        }

        let new_head = state.neighbor(state.snake.head(), state.snake.direction);

        if state.snake.collides_with_body(new_head) {
            state.game_over = true;
            state.steps += 1;
            return StepOutcome::Collided;
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += self.config.score_per_food;
            state.baits += 1;
            state.food = self.place_food(&state.snake);
            return StepOutcome::Ate { cell: new_head };
        }

        StepOutcome::Moved
    }

    /// Pick a random free cell for the bait
    ///
    /// Rejection sampling is tried first; once the board is crowded enough for
    /// that to stall, the free cells are listed and one is chosen uniformly.
    pub fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        let block = self.config.block_size;
        let attempts = self.config.cell_count() * 4;

        for _ in 0..attempts {
            let x = self.rng.gen_range(0..self.config.cols) * block;
            let y = self.rng.gen_range(0..self.config.rows) * block;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                tracing::debug!(x, y, "bait placed");
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..self.config.rows)
            .flat_map(|row| (0..self.config.cols).map(move |col| Position::new(col * block, row * block)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        let food = free.choose(&mut self.rng).copied();
        match food {
            Some(pos) => tracing::debug!(x = pos.x, y = pos.y, free = free.len(), "bait placed after scan"),
            None => tracing::warn!("board is full, no cell left for bait"),
        }
        food
    }
}
