//! Camera info overlay and the bitmap font it is drawn with.

use glam::Vec3;

use crate::canvas::Canvas;
use crate::color::Color;

/// Glyph cell width in pixels.
pub const GLYPH_WIDTH: usize = 5;
/// Glyph cell height in pixels.
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal distance between consecutive glyphs.
pub const GLYPH_ADVANCE: i32 = 6;
/// Vertical distance between overlay lines.
pub const LINE_HEIGHT: i32 = 10;

/// Baseline of the first overlay line, measured from the top of the canvas.
const FIRST_BASELINE: i32 = 20;
const RIGHT_MARGIN: i32 = 8;

type Glyph = [u8; GLYPH_HEIGHT];

const BLANK: Glyph = [0; GLYPH_HEIGHT];

/// Returns the 5×7 bitmap for `c`; bit 4 of each row is the leftmost column.
///
/// Lowercase letters share the uppercase glyphs. Unsupported characters are blank.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn glyph(c: char) -> &'static Glyph {
    match c.to_ascii_uppercase() {
        'A' => &[0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => &[0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => &[0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => &[0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => &[0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => &[0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => &[0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => &[0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => &[0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => &[0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => &[0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => &[0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => &[0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => &[0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => &[0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => &[0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => &[0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => &[0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => &[0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => &[0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => &[0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => &[0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => &[0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => &[0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => &[0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => &[0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => &[0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => &[0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => &[0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => &[0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => &[0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => &[0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => &[0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => &[0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => &[0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ',' => &[0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '.' => &[0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => &[0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => &[0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '(' => &[0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => &[0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '/' => &[0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        _ => &BLANK,
    }
}

/// Snapshot of the camera state shown in the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    pub position: Vec3,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub focus: f32,
}

impl CameraInfo {
    /// Formats the overlay text, one entry per line.
    #[must_use]
    pub fn info_lines(&self) -> [String; 4] {
        let p = self.position;
        [
            "Camera".to_string(),
            format!("  Position: x: {:.1}, y: {:.1}, z: {:.1}", p.x, p.y, p.z),
            format!(
                "  Rotation: R: {:.2}, P: {:.2}, Y: {:.2}",
                self.roll, self.pitch, self.yaw
            ),
            format!("  Focus: {:.2}", self.focus),
        ]
    }
}

/// Draws the camera info block in the top-right corner of the canvas.
pub fn draw_info(canvas: &mut Canvas, info: &CameraInfo) {
    let lines = info.info_lines();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let x = (canvas.width() as i32 - RIGHT_MARGIN - widest * GLYPH_ADVANCE).max(0);

    let mut baseline = FIRST_BASELINE;
    for line in &lines {
        canvas.draw_text((x, baseline - GLYPH_HEIGHT as i32), line, Color::GRAY);
        baseline += LINE_HEIGHT;
    }
}

/// Builds the window title, optionally carrying the canvas size and measured fps.
#[must_use]
pub fn window_title(name: &str, width: u32, height: u32, fps: f32, show_fps: bool) -> String {
    if show_fps {
        format!("{name} Size({width},{height}) {} fps", fps.round() as i64)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> CameraInfo {
        CameraInfo {
            position: Vec3::new(0.0, 0.3, -10.0),
            roll: 0.0,
            pitch: -0.0349,
            yaw: 0.01745,
            focus: 1.0,
        }
    }

    #[test]
    fn test_info_lines() {
        let lines = info().info_lines();
        assert_eq!(lines[0], "Camera");
        assert_eq!(lines[1], "  Position: x: 0.0, y: 0.3, z: -10.0");
        assert_eq!(lines[2], "  Rotation: R: 0.00, P: -0.03, Y: 0.02");
        assert_eq!(lines[3], "  Focus: 1.00");
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('~'), &BLANK);
        assert_eq!(glyph(' '), &BLANK);
        assert_ne!(glyph('0'), glyph('8'));
        for c in "CAMERA POSITION ROTATION FOCUS 0123456789:,.-".chars() {
            for row in glyph(c) {
                assert!(*row < 1 << GLYPH_WIDTH, "glyph {c:?} too wide");
            }
        }
    }

    #[test]
    fn test_draw_info_stays_top_right() {
        let mut canvas = Canvas::new(400, 100, Color::BLACK);
        draw_info(&mut canvas, &info());

        let mut lit = 0;
        for y in 0..100 {
            for x in 0..400 {
                let px = canvas.pixel(x, y).unwrap();
                if px != Color::BLACK {
                    lit += 1;
                    assert_eq!(px, Color::GRAY);
                    assert!(x >= 150, "overlay should hug the right edge, found x = {x}");
                    assert!(x < 400 - RIGHT_MARGIN);
                    assert!((FIRST_BASELINE - GLYPH_HEIGHT as i32..FIRST_BASELINE + 3 * LINE_HEIGHT)
                        .contains(&y));
                }
            }
        }
        assert!(lit > 100);
    }

    #[test]
    fn test_window_title() {
        assert_eq!(
            window_title("Hello world!", 800, 640, 29.6, true),
            "Hello world! Size(800,640) 30 fps"
        );
        assert_eq!(window_title("Hello world!", 800, 640, 29.6, false), "Hello world!");
    }
}
