//! Software RGBA surface with the handful of raster operations the scene needs

/// Straight-alpha color: 8-bit channels plus an opacity in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    fn premultiplied(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r as f32 / 255.0 * a,
            self.g as f32 / 255.0 * a,
            self.b as f32 / 255.0 * a,
            a,
        ]
    }
}

/// Premultiplied RGBA pixel buffer with an optional draw translation
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
    translation: (f32, f32),
}

impl Canvas {
    /// Fully transparent canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
            translation: (0.0, 0.0),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Offset applied to every subsequent draw call
    pub fn set_translation(&mut self, dx: f32, dy: f32) {
        self.translation = (dx, dy);
    }

    pub fn reset_translation(&mut self) {
        self.translation = (0.0, 0.0);
    }

    /// Make every pixel transparent
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Overwrite every pixel with `color`, ignoring the translation
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color.premultiplied());
    }

    /// Premultiplied components of the pixel at (`x`, `y`)
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// Pixel at (`x`, `y`) composited over black
    pub fn rgb8(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let [r, g, b, _] = self.pixel(x, y);
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Mean color of the pixels in `[x0, x1) × [y0, y1)`, composited over black
    pub fn average_rgb8(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> (u8, u8, u8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return (0, 0, 0);
        }

        let mut sum = [0.0f32; 3];
        for y in y0..y1 {
            for px in &self.pixels[y * self.width + x0..y * self.width + x1] {
                sum[0] += px[0];
                sum[1] += px[1];
                sum[2] += px[2];
            }
        }

        let n = ((x1 - x0) * (y1 - y0)) as f32;
        (to_u8(sum[0] / n), to_u8(sum[1] / n), to_u8(sum[2] / n))
    }

    /// Source-over fill of an axis-aligned rectangle
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, x + w, y + h) else {
            return;
        };
        let src = color.premultiplied();
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, src);
            }
        }
    }

    /// One pixel wide vertical line at `x`
    pub fn vline(&mut self, x: f32, color: Rgba) {
        self.fill_rect(x, 0.0, 1.0, self.height as f32, color);
    }

    /// One pixel tall horizontal line at `y`
    pub fn hline(&mut self, y: f32, color: Rgba) {
        self.fill_rect(0.0, y, self.width as f32, 1.0, color);
    }

    /// Fill every pixel whose center lies within `radius` of (`cx`, `cy`)
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) =
            self.clip(cx - radius, cy - radius, cx + radius + 1.0, cy + radius + 1.0)
        else {
            return;
        };

        let (cx, cy) = (cx + self.translation.0, cy + self.translation.1);
        let src = color.premultiplied();
        let r2 = radius * radius;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, src);
                }
            }
        }
    }

    /// Soft halo around a rectangle, fading out over `radius` pixels
    pub fn glow_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, radius: u32) {
        for k in 1..=radius {
            let falloff = 1.0 - k as f32 / (radius + 1) as f32;
            let ring = color.with_alpha(color.a * falloff * falloff * 0.35);
            let k = k as f32;
            let (ox, oy, ow, oh) = (x - k, y - k, w + 2.0 * k, h + 2.0 * k);
            self.fill_rect(ox, oy, ow, 1.0, ring);
            self.fill_rect(ox, oy + oh - 1.0, ow, 1.0, ring);
            self.fill_rect(ox, oy + 1.0, 1.0, oh - 2.0, ring);
            self.fill_rect(ox + ow - 1.0, oy + 1.0, 1.0, oh - 2.0, ring);
        }
    }

    /// Soft halo around a disc
    pub fn glow_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, spread: u32) {
        for k in (1..=spread).rev() {
            let falloff = 1.0 - k as f32 / (spread + 1) as f32;
            self.fill_circle(cx, cy, radius + k as f32, color.with_alpha(color.a * falloff * 0.15));
        }
    }

    /// Approximate a Gaussian blur of standard deviation `sigma` with three box passes
    ///
    /// Pixels outside the canvas count as transparent.
    pub fn blur(&mut self, sigma: f32) {
        if sigma <= 0.0 || self.pixels.is_empty() {
            return;
        }
        let radius = (((4.0 * sigma * sigma + 1.0).sqrt() - 1.0) / 2.0).round().max(1.0) as usize;
        let mut scratch = vec![[0.0f32; 4]; self.pixels.len()];
        for _ in 0..3 {
            box_pass(&self.pixels, &mut scratch, self.width, self.height, radius, true);
            box_pass(&scratch, &mut self.pixels, self.width, self.height, radius, false);
        }
    }

    /// Add `src` onto this canvas scaled by `strength`, saturating at white
    pub fn composite_additive(&mut self, src: &Canvas, strength: f32) {
        if src.width != self.width || src.height != self.height {
            return;
        }
        for (dst, s) in self.pixels.iter_mut().zip(&src.pixels) {
            for c in 0..4 {
                dst[c] = (dst[c] + s[c] * strength).min(1.0);
            }
        }
    }

    fn blend(&mut self, x: usize, y: usize, src: [f32; 4]) {
        let dst = &mut self.pixels[y * self.width + x];
        let inv = 1.0 - src[3];
        for c in 0..4 {
            dst[c] = src[c] + dst[c] * inv;
        }
    }

    /// Translate and clip a float rectangle to whole pixel bounds
    fn clip(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(usize, usize, usize, usize)> {
        let (tx, ty) = self.translation;
        let to_px = |v: f32, max: usize| (v.round().max(0.0) as usize).min(max);
        let bx0 = to_px(x0 + tx, self.width);
        let by0 = to_px(y0 + ty, self.height);
        let bx1 = to_px(x1 + tx, self.width);
        let by1 = to_px(y1 + ty, self.height);

        (bx0 < bx1 && by0 < by1).then_some((bx0, by0, bx1, by1))
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// One separable box-blur pass along rows (`horizontal`) or columns
fn box_pass(
    src: &[[f32; 4]],
    dst: &mut [[f32; 4]],
    width: usize,
    height: usize,
    radius: usize,
    horizontal: bool,
) {
    let (lines, len) = if horizontal { (height, width) } else { (width, height) };
    let index = |line: usize, i: usize| {
        if horizontal {
            line * width + i
        } else {
            i * width + line
        }
    };
    let window = (2 * radius + 1) as f32;

    for line in 0..lines {
        let mut sum = [0.0f32; 4];
        for i in 0..=radius.min(len - 1) {
            let px = src[index(line, i)];
            for c in 0..4 {
                sum[c] += px[c];
            }
        }

        for i in 0..len {
            let out = &mut dst[index(line, i)];
            for c in 0..4 {
                out[c] = sum[c] / window;
            }

            let entering = i + radius + 1;
            if entering < len {
                let px = src[index(line, entering)];
                for c in 0..4 {
                    sum[c] += px[c];
                }
            }
            if i >= radius {
                let px = src[index(line, i - radius)];
                for c in 0..4 {
                    sum[c] -= px[c];
                }
            }
        }
    }
}
