//! Software canvas the scene is rasterized into.
//!
//! Pixels are RGBA8, row-major, with the origin in the top-left corner. Integer
//! coordinates are pixel centers.

use glam::Vec2;

use crate::color::Color;
use crate::error::{CameraModelError, Result};
use crate::hud;

/// An RGBA8 framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        canvas.clear(background);
        canvas
    }

    /// Wraps an existing RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CameraModelError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw RGBA8 pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fills the whole canvas with `color`.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Copies another canvas of the same size into this one, reusing the allocation.
    pub fn copy_from(&mut self, other: &Canvas) {
        if self.width == other.width && self.height == other.height {
            self.pixels.copy_from_slice(&other.pixels);
        } else {
            self.clone_from(other);
        }
    }

    /// Returns the color at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let i = self.index(x, y)?;
        Some(Color::rgb(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
        ))
    }

    /// Sets a pixel. Coordinates outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.to_rgba());
        }
    }

    /// Blends `color` over the pixel with the given coverage in `[0, 1]`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        if let Some(existing) = self.pixel(x, y) {
            self.set_pixel(x, y, existing.lerp(color, coverage));
        }
    }

    /// Draws a filled disk of radius `ceil(thickness / 2)` centered on the rounded position.
    pub fn draw_point(&mut self, center: Vec2, color: Color, thickness: u32) {
        if !center.is_finite() {
            return;
        }
        let radius = thickness.div_ceil(2) as i32;
        let cx = center.x.round();
        let cy = center.y.round();
        // Far-away centers would overflow the integer math below.
        let limit = (self.width.max(self.height) as f32) + radius as f32;
        if cx < -limit || cy < -limit || cx > 2.0 * limit || cy > 2.0 * limit {
            return;
        }
        let (cx, cy) = (cx as i32, cy as i32);

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draws an antialiased line.
    ///
    /// Lines thicker than one pixel are built from parallel one-pixel strokes spread
    /// across the line normal.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color, thickness: u32) {
        if !(start.is_finite() && end.is_finite()) {
            return;
        }
        let thickness = thickness.max(1);
        let margin = thickness as f32 + 1.0;
        let Some((start, end)) = clip_segment(
            start,
            end,
            Vec2::splat(-margin),
            Vec2::new(self.width as f32 + margin, self.height as f32 + margin),
        ) else {
            return;
        };

        if thickness == 1 {
            self.draw_wu_line(start, end, color);
            return;
        }

        let normal = (end - start).perp().normalize_or_zero();
        let half = (thickness - 1) as f32 / 2.0;
        for i in 0..thickness {
            let offset = normal * (i as f32 - half);
            self.draw_wu_line(start + offset, end + offset, color);
        }
    }

    /// Draws text with the built-in HUD font. `origin` is the top-left of the first glyph.
    pub fn draw_text(&mut self, origin: (i32, i32), text: &str, color: Color) {
        let (mut x, y) = origin;
        for c in text.chars() {
            let rows = hud::glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..hud::GLYPH_WIDTH {
                    if bits & (1 << (hud::GLYPH_WIDTH - 1 - col)) != 0 {
                        self.set_pixel(x + col as i32, y + row as i32, color);
                    }
                }
            }
            x += hud::GLYPH_ADVANCE;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Xiaolin Wu's line algorithm.
    fn draw_wu_line(&mut self, mut a: Vec2, mut b: Vec2, color: Color) {
        let steep = (b.y - a.y).abs() > (b.x - a.x).abs();
        if steep {
            a = Vec2::new(a.y, a.x);
            b = Vec2::new(b.y, b.x);
        }
        if a.x > b.x {
            std::mem::swap(&mut a, &mut b);
        }

        let mut plot = |x: i32, y: i32, coverage: f32| {
            if steep {
                self.blend_pixel(y, x, color, coverage);
            } else {
                self.blend_pixel(x, y, color, coverage);
            }
        };

        let dx = b.x - a.x;
        let gradient = if dx == 0.0 { 1.0 } else { (b.y - a.y) / dx };

        let x_end = a.x.round();
        let y_end = a.y + gradient * (x_end - a.x);
        let x_gap = 1.0 - fract(a.x + 0.5);
        let x_first = x_end as i32;
        let y_first = y_end.floor() as i32;
        plot(x_first, y_first, (1.0 - fract(y_end)) * x_gap);
        plot(x_first, y_first + 1, fract(y_end) * x_gap);
        let mut inter_y = y_end + gradient;

        let x_end = b.x.round();
        let y_end = b.y + gradient * (x_end - b.x);
        let x_gap = fract(b.x + 0.5);
        let x_last = x_end as i32;
        let y_last = y_end.floor() as i32;
        plot(x_last, y_last, (1.0 - fract(y_end)) * x_gap);
        plot(x_last, y_last + 1, fract(y_end) * x_gap);

        for x in (x_first + 1)..x_last {
            let y = inter_y.floor() as i32;
            plot(x, y, 1.0 - fract(inter_y));
            plot(x, y + 1, fract(inter_y));
            inter_y += gradient;
        }
    }
}

fn fract(v: f32) -> f32 {
    v - v.floor()
}

/// Clips a segment to an axis-aligned rectangle (Liang–Barsky).
///
/// Runs in `f64`: near-clipped lines can project to coordinates far beyond the canvas.
fn clip_segment(start: Vec2, end: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let (start, end) = (start.as_dvec2(), end.as_dvec2());
    let (min, max) = (min.as_dvec2(), max.as_dvec2());
    let d = end - start;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-d.x, start.x - min.x),
        (d.x, max.x - start.x),
        (-d.y, start.y - min.y),
        (d.y, max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    Some(((start + d * t0).as_vec2(), (start + d * t1).as_vec2()))
}
