//! Pixel pipeline for one frame: grid, particles, bait, snake, bloom, scanlines

use super::canvas::{Canvas, Rgba};
use crate::effects::ParticleSystem;
use crate::game::GameState;

const GRID_BG: Rgba = Rgba::rgb(0x0d, 0x0d, 0x0d);
const GRID_LINE: Rgba = Rgba::rgba(255, 255, 255, 0.05);
const SCANLINE: Rgba = Rgba::rgba(0, 0, 0, 0.06);
const SCANLINE_STEP: usize = 2;
const BLOOM_BLUR_PX: f32 = 4.0;
const BLOOM_STRENGTH: f32 = 1.0;

const FOOD: Rgba = Rgba::rgb(0xe8, 0x10, 0x10);
const FOOD_GLOW: Rgba = Rgba::rgb(0xff, 0x5a, 0x5a);
const FOOD_GLOW_PX: u32 = 12;
const FOOD_BLOOM: Rgba = Rgba::rgba(255, 120, 120, 0.9);

const SNAKE: Rgba = Rgba::rgb(0xff, 0xec, 0x40);
const SNAKE_GLOW: Rgba = Rgba::rgb(0xff, 0x84, 0x00);
const SNAKE_GLOW_PX: u32 = 10;
const SNAKE_BLOOM: Rgba = Rgba::rgba(255, 236, 64, 0.7);
const SNAKE_BLOOM_INSET: f32 = 2.0;

const PARTICLE: Rgba = Rgba::rgb(255, 120, 120);
const PARTICLE_GLOW: Rgba = Rgba::rgba(255, 120, 120, 0.7);
const PARTICLE_GLOW_PX: u32 = 8;

/// Draws the board into a main surface, using a second surface for bloom
pub struct SceneRenderer {
    main: Canvas,
    bloom: Canvas,
}

impl SceneRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            main: Canvas::new(width, height),
            bloom: Canvas::new(width, height),
        }
    }

    /// Scene sized for the given board
    pub fn for_state(state: &GameState) -> Self {
        Self::new(state.width.max(0) as usize, state.height.max(0) as usize)
    }

    /// Draw a full frame; nothing outside this renderer's surfaces is touched
    pub fn render(
        &mut self,
        state: &GameState,
        particles: &ParticleSystem,
        shake: (f32, f32),
    ) -> &Canvas {
        self.main.fill(GRID_BG);
        self.main.set_translation(shake.0, shake.1);
        self.bloom.set_translation(shake.0, shake.1);

        self.draw_grid(state);
        self.draw_particles(particles);

        self.bloom.clear();
        self.draw_food(state);
        self.draw_snake(state);

        self.apply_bloom();
        self.draw_scanlines();

        self.main.reset_translation();
        self.bloom.reset_translation();
        &self.main
    }

    fn draw_grid(&mut self, state: &GameState) {
        let step = state.block_size.max(1) as usize;
        for x in (0..=state.width.max(0) as usize).step_by(step) {
            self.main.vline(x as f32, GRID_LINE);
        }
        for y in (0..=state.height.max(0) as usize).step_by(step) {
            self.main.hline(y as f32, GRID_LINE);
        }
    }

    fn draw_particles(&mut self, particles: &ParticleSystem) {
        for p in particles.iter() {
            let radius = p.radius();
            self.main.glow_circle(
                p.x,
                p.y,
                radius,
                PARTICLE_GLOW.with_alpha(PARTICLE_GLOW.a * p.alpha),
                PARTICLE_GLOW_PX,
            );
            self.main.fill_circle(p.x, p.y, radius, PARTICLE.with_alpha(p.alpha));
        }
    }

    fn draw_food(&mut self, state: &GameState) {
        let Some(food) = state.food else {
            return;
        };
        let (x, y, size) = (food.x as f32, food.y as f32, state.block_size as f32);

        self.main.glow_rect(x, y, size, size, FOOD_GLOW, FOOD_GLOW_PX);
        self.main.fill_rect(x, y, size, size, FOOD);
        self.bloom.fill_rect(x, y, size, size, FOOD_BLOOM);
    }

    fn draw_snake(&mut self, state: &GameState) {
        let size = state.block_size as f32;
        for segment in &state.snake.body {
            let (x, y) = (segment.x as f32, segment.y as f32);
            self.main.glow_rect(x, y, size, size, SNAKE_GLOW, SNAKE_GLOW_PX);
            self.main.fill_rect(x, y, size, size, SNAKE);
            self.bloom.fill_rect(
                x + SNAKE_BLOOM_INSET,
                y + SNAKE_BLOOM_INSET,
                size - 2.0 * SNAKE_BLOOM_INSET,
                size - 2.0 * SNAKE_BLOOM_INSET,
                SNAKE_BLOOM,
            );
        }
    }

    fn apply_bloom(&mut self) {
        if BLOOM_BLUR_PX <= 0.0 || BLOOM_STRENGTH <= 0.0 {
            return;
        }
        self.bloom.blur(BLOOM_BLUR_PX);
        self.main.composite_additive(&self.bloom, BLOOM_STRENGTH);
    }

    fn draw_scanlines(&mut self) {
        for y in (0..self.main.height()).step_by(SCANLINE_STEP) {
            self.main.hline(y as f32, SCANLINE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, Snake};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        let mut snake = Snake::new(Position::new(125, 125), Direction::Right);
        snake.body.push(Position::new(100, 125));
        GameState::new(snake, Some(Position::new(300, 300)), 25, 500, 500)
    }

    fn is_warm(rgb: (u8, u8, u8)) -> bool {
        rgb.0 > 200 && rgb.0 > rgb.2 + 100
    }

    #[test]
    fn test_snake_and_food_are_lit() {
        let state = state();
        let mut scene = SceneRenderer::for_state(&state);
        let canvas = scene.render(&state, &ParticleSystem::new(10), (0.0, 0.0));

        // Odd rows avoid the scanlines
        let snake_px = canvas.rgb8(137, 137);
        assert!(snake_px.0 > 240 && snake_px.1 > 200, "snake {snake_px:?}");
        assert!(is_warm(canvas.rgb8(312, 313)), "food {:?}", canvas.rgb8(312, 313));
        let background = canvas.rgb8(450, 51);
        assert!(background.0 < 40 && background.1 < 40, "bg {background:?}");
    }

    #[test]
    fn test_bloom_brightens_near_snake() {
        let state = state();
        let mut scene = SceneRenderer::for_state(&state);
        let canvas = scene.render(&state, &ParticleSystem::new(10), (0.0, 0.0));

        let near = canvas.rgb8(152, 137);
        let far = canvas.rgb8(250, 137);
        assert!(near.0 > far.0 + 20, "near {near:?} far {far:?}");
    }

    #[test]
    fn test_missing_food_draws_nothing() {
        let mut state = state();
        state.food = None;
        let mut scene = SceneRenderer::for_state(&state);
        let canvas = scene.render(&state, &ParticleSystem::new(10), (0.0, 0.0));

        let spot = canvas.rgb8(312, 313);
        assert!(spot.0 < 40, "spot {spot:?}");
    }

    #[test]
    fn test_shake_moves_the_board() {
        let state = state();
        let mut scene = SceneRenderer::for_state(&state);
        let still = scene.render(&state, &ParticleSystem::new(10), (0.0, 0.0)).clone();
        let shaken = scene.render(&state, &ParticleSystem::new(10), (3.0, 0.0));

        // Left edge of the tail segment shifts right by three pixels
        let (a, b) = (still.rgb8(101, 137), shaken.rgb8(104, 137));
        assert!(a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1 && a.2.abs_diff(b.2) <= 1);
        assert_ne!(still.rgb8(101, 137), shaken.rgb8(101, 137));
    }

    #[test]
    fn test_particles_are_drawn() {
        let state = state();
        let mut particles = ParticleSystem::new(10);
        let mut rng = StdRng::seed_from_u64(9);
        particles.spawn_burst(400.5, 51.5, &mut rng);

        let mut scene = SceneRenderer::for_state(&state);
        let canvas = scene.render(&state, &particles, (0.0, 0.0));

        assert!(is_warm(canvas.rgb8(400, 51)), "{:?}", canvas.rgb8(400, 51));
    }

    #[test]
    fn test_scanlines_darken_even_rows() {
        let mut state = state();
        state.food = None;
        state.snake.body = vec![Position::new(0, 0)];
        let mut scene = SceneRenderer::for_state(&state);
        let canvas = scene.render(&state, &ParticleSystem::new(10), (0.0, 0.0));

        let even = canvas.pixel(310, 310)[0];
        let odd = canvas.pixel(310, 311)[0];
        assert!(even < odd, "even {even} odd {odd}");
    }
}
