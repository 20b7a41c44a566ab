//! The game session: owns every piece of mutable state for one player
//!
//! Lifecycle is `new → frame* → (game over) → restart → frame* → …`. The host
//! loop feeds it elapsed wall time once per rendered frame and reacts to the
//! returned [`GameEvent`]s (sounds, logging); drawing reads the session
//! through its accessors only.
//!
//! ```
//! use std::time::Duration;
//! use neon_snake::game::GameConfig;
//! use neon_snake::session::GameSession;
//!
//! let mut session = GameSession::with_seed(GameConfig::default(), 42).unwrap();
//! session.frame(Duration::from_millis(100));
//! assert_eq!(session.state().steps, 1);
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::effects::{ParticleSystem, ScreenShake};
use crate::game::{
    ConfigError, Direction, GameConfig, GameEngine, GameState, Position, StepOutcome,
    TickScheduler,
};

/// Something the host should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten { at: Position, score: u32 },
    GameOver { final_score: u32 },
}

pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    scheduler: TickScheduler,
    particles: ParticleSystem,
    shake: ScreenShake,
    fx_rng: StdRng,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = GameEngine::new(config);
        Ok(Self::from_engine(engine, StdRng::from_entropy()))
    }

    /// Session whose food placement and effects are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = GameEngine::with_seed(config, seed);
        Ok(Self::from_engine(engine, StdRng::seed_from_u64(seed.wrapping_add(1))))
    }

    fn from_engine(mut engine: GameEngine, fx_rng: StdRng) -> Self {
        let config = engine.config().clone();
        let state = engine.reset();
        tracing::info!(
            cols = config.cols,
            rows = config.rows,
            tick_rate = config.tick_rate,
            "game started"
        );

        Self {
            engine,
            state,
            scheduler: TickScheduler::new(config.tick_rate, config.max_ticks_per_frame),
            particles: ParticleSystem::new(config.tick_rate),
            shake: ScreenShake::new(config.tick_rate),
            fx_rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn shake_offset(&self) -> (f32, f32) {
        self.shake.offset()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Apply a direction key; refused if it would reverse into the neck
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.engine.steer(&mut self.state, direction)
    }

    /// Start a new run; only valid once the current run is over
    pub fn restart(&mut self) -> bool {
        if !self.state.game_over {
            return false;
        }

        self.state = self.engine.reset();
        self.scheduler.reset();
        tracing::info!("game restarted");
        true
    }

    /// Everything that happens in one rendered frame, `elapsed` after the previous one
    pub fn frame(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let events = self.advance(elapsed);
        // Effects keep fading behind the game-over overlay; only the board freezes
        self.step_effects(elapsed);
        events
    }

    /// Run the logic ticks that are due after `elapsed`
    ///
    /// While the game is over, time is not fed to the scheduler at all.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.game_over {
            return events;
        }

        for _ in 0..self.scheduler.advance(elapsed) {
            if let Some(event) = self.tick() {
                let over = matches!(event, GameEvent::GameOver { .. });
                events.push(event);
                if over {
                    break;
                }
            }
        }

        events
    }

    /// Move particles and the camera shake forward by `dt`
    pub fn step_effects(&mut self, dt: Duration) {
        self.particles.step(dt);
        self.shake.step(dt, &mut self.fx_rng);
    }

    fn tick(&mut self) -> Option<GameEvent> {
        let outcome = self.engine.step(&mut self.state);
        tracing::trace!(?outcome, steps = self.state.steps, "tick");

        match outcome {
            StepOutcome::Ate { cell } => {
                let half = self.state.block_size as f32 / 2.0;
                self.particles.spawn_burst(
                    cell.x as f32 + half,
                    cell.y as f32 + half,
                    &mut self.fx_rng,
                );
                self.shake.trigger();
                Some(GameEvent::FoodEaten {
                    at: cell,
                    score: self.state.score,
                })
            }
            StepOutcome::Collided => {
                tracing::info!(
                    score = self.state.score,
                    baits = self.state.baits,
                    length = self.state.snake.len(),
                    "game over"
                );
                Some(GameEvent::GameOver {
                    final_score: self.state.score,
                })
            }
            StepOutcome::Moved | StepOutcome::Halted => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::particles::BURST_COUNT;
    use crate::game::Snake;

    const TICK: Duration = Duration::from_millis(100);

    fn session() -> GameSession {
        GameSession::with_seed(GameConfig::default(), 11).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(GameSession::new(config), Err(ConfigError::TickRate)));
    }

    #[test]
    fn test_first_frame_moves_snake() {
        let mut session = session();
        session.state_mut().food = Some(Position::new(400, 400));

        let events = session.frame(Duration::from_millis(16));

        assert!(events.is_empty());
        assert_eq!(session.state().snake.body, vec![Position::new(150, 125)]);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut session = session();
        session.state_mut().food = Some(Position::new(0, 475));
        session.frame(Duration::ZERO);

        for _ in 0..5 {
            session.frame(Duration::from_millis(50));
        }
        // One primed tick plus two full periods
        assert_eq!(session.state().steps, 3);
    }

    #[test]
    fn test_eating_spawns_effects() {
        let mut session = session();
        session.state_mut().food = Some(Position::new(150, 125));

        let events = session.frame(TICK);

        assert_eq!(
            events,
            vec![GameEvent::FoodEaten {
                at: Position::new(150, 125),
                score: 10
            }]
        );
        assert_eq!(session.state().baits, 1);
        assert_eq!(session.state().snake.len(), 2);
        assert_eq!(session.particles().len(), BURST_COUNT);
        assert!(session.shake.is_active());
        let food = session.state().food.unwrap();
        assert!(!session.state().snake.occupies(food));
    }

    #[test]
    fn test_game_over_stops_updates_until_restart() {
        let mut session = session();
        {
            let state = session.state_mut();
            state.snake = Snake::new(Position::new(50, 50), Direction::Down);
            state.snake.body = vec![
                Position::new(50, 50),
                Position::new(75, 50),
                Position::new(75, 75),
                Position::new(50, 75),
                Position::new(25, 75),
            ];
            state.food = Some(Position::new(400, 400));
            state.score = 30;
        }

        let events = session.frame(TICK);
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 30 }]);
        assert!(session.is_game_over());

        let frozen = session.state().clone();
        for _ in 0..10 {
            assert!(session.frame(TICK).is_empty());
        }
        assert_eq!(session.state(), &frozen);

        assert!(session.restart());
        let state = session.state();
        assert!(!state.game_over);
        assert_eq!(state.snake.body, vec![Position::new(125, 125)]);
        assert_eq!(state.velocity(), (1, 0));
        assert_eq!(state.score, 0);
        assert_eq!(state.baits, 0);
        assert!(!state.snake.occupies(state.food.unwrap()));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = session();
        session.state_mut().score = 20;
        assert!(!session.restart());
        assert_eq!(session.state().score, 20);
    }

    #[test]
    fn test_restart_keeps_fading_particles() {
        let mut session = session();
        session.state_mut().food = Some(Position::new(150, 125));
        session.frame(TICK);
        session.state_mut().game_over = true;

        assert!(session.restart());
        assert_eq!(session.particles().len(), BURST_COUNT);
    }

    #[test]
    fn test_effects_fade_behind_game_over() {
        let mut session = session();
        session.state_mut().food = Some(Position::new(150, 125));
        session.frame(TICK);
        session.state_mut().game_over = true;

        let board = session.state().clone();
        let alpha = session.particles().iter().next().unwrap().alpha;
        session.frame(TICK);

        assert_eq!(session.state(), &board);
        assert!(session.particles().iter().next().unwrap().alpha < alpha);
    }

    #[test]
    fn test_restart_ticks_on_next_frame() {
        let mut session = session();
        session.state_mut().game_over = true;
        session.restart();
        session.state_mut().food = Some(Position::new(400, 400));

        session.frame(Duration::ZERO);
        assert_eq!(session.state().snake.head(), Position::new(150, 125));
    }

    #[test]
    fn test_steer_reversal_guard() {
        let mut session = session();
        session.state_mut().food = Some(Position::new(150, 125));
        session.frame(TICK);
        assert_eq!(session.state().snake.len(), 2);

        assert!(!session.steer(Direction::Left));
        assert_eq!(session.state().velocity(), (1, 0));
        assert!(session.steer(Direction::Down));
        assert_eq!(session.state().velocity(), (0, 1));
    }
}
