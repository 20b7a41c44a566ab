//! Neon Snake - arcade snake with a bloom and scanline look, drawn in the terminal
//!
//! This library provides:
//! - Core game logic and the fixed-timestep scheduler (game module)
//! - Particle and screen-shake effects (effects module)
//! - The session that ties one run together (session module)
//! - Software rasterizer and TUI presentation (render module)
//! - Keyboard and mouse mapping (input module)
//! - Sound effects (audio module)
//! - The interactive terminal loop (modes module)

pub mod audio;
pub mod effects;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
