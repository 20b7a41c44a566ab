//! Drawing: a software canvas for the board, presented inside a ratatui HUD

pub mod canvas;
pub mod renderer;
pub mod scene;
pub mod view;

pub use canvas::{Canvas, Rgba};
pub use renderer::Renderer;
pub use scene::SceneRenderer;
pub use view::CanvasView;
