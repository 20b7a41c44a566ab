use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use super::canvas::Canvas;

const UPPER_HALF: &str = "\u{2580}";

/// Largest square of half-block pixels that fits in `area`, centered
///
/// Each terminal cell holds two vertically stacked pixels, so a square image of
/// `n` pixels needs `n` columns and `n / 2` rows.
pub fn fit_square(area: Rect) -> Rect {
    let side = area.width.min(area.height.saturating_mul(2));
    let side = side - side % 2;
    let rows = side / 2;
    Rect {
        x: area.x + (area.width - side) / 2,
        y: area.y + (area.height - rows) / 2,
        width: side,
        height: rows,
    }
}

/// Presents a canvas in the terminal, box-filtered down to the widget area
pub struct CanvasView<'a> {
    canvas: &'a Canvas,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let target = fit_square(area);
        if target.width == 0 || target.height == 0 {
            return;
        }

        let (src_w, src_h) = (self.canvas.width(), self.canvas.height());
        let px_w = target.width as usize;
        let px_h = target.height as usize * 2;
        let span = |i: usize, n: usize, src: usize| {
            let start = i * src / n;
            let end = ((i + 1) * src / n).max(start + 1);
            (start, end)
        };

        for row in 0..target.height {
            let (top_y0, top_y1) = span(row as usize * 2, px_h, src_h);
            let (bot_y0, bot_y1) = span(row as usize * 2 + 1, px_h, src_h);

            for col in 0..target.width {
                let (x0, x1) = span(col as usize, px_w, src_w);
                let top = self.canvas.average_rgb8(x0, top_y0, x1, top_y1);
                let bottom = self.canvas.average_rgb8(x0, bot_y0, x1, bot_y1);

                if let Some(cell) = buf.cell_mut((target.x + col, target.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(Color::Rgb(top.0, top.1, top.2))
                        .set_bg(Color::Rgb(bottom.0, bottom.1, bottom.2));
                }
            }
        }
    }
}
