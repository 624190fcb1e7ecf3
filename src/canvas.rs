use crate::color::Rgb;
use crate::math::Vec2;

/// An owned RGB raster, addressed by integer pixel coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Creates a canvas filled with black
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Creates a canvas filled with `color`
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Paints every pixel with `color`
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        let in_bounds = x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        in_bounds.then(|| y as usize * self.width + x as usize)
    }

    /// Reads a pixel, or `None` outside the canvas
    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        self.offset(x, y).map(|offset| self.pixels[offset])
    }

    /// Writes a pixel; writes outside the canvas are dropped
    pub fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color;
        }
    }

    /// Draws a line between two points using Bresenham's algorithm
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.draw_thick_line(from, to, color, 1);
    }

    /// Draws a line, stamping a square brush `thickness` pixels wide at every step
    ///
    /// The segment is clipped to the canvas first, so only visible steps are walked.
    pub fn draw_thick_line(&mut self, from: Vec2, to: Vec2, color: Rgb, thickness: u32) {
        // Keep a brush-sized margin so strokes just outside the edge still bleed in
        let margin = f64::from(thickness.max(1));
        let min = Vec2::new(-margin, -margin);
        let max = Vec2::new(
            self.width as f64 - 1.0 + margin,
            self.height as f64 - 1.0 + margin,
        );
        let Some((from, to)) = clip_segment(from, to, min, max) else {
            return;
        };

        let (mut x0, mut y0, x1, y1) = (
            from.x.round() as i64,
            from.y.round() as i64,
            to.x.round() as i64,
            to.y.round() as i64,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        // Brush spans [-lo, hi] around the line pixel
        let thickness = i64::from(thickness.max(1));
        let lo = (thickness - 1) / 2;
        let hi = thickness - 1 - lo;

        loop {
            for by in -lo..=hi {
                for bx in -lo..=hi {
                    self.set(x0 + bx, y0 + by, color);
                }
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draws the closed outline of a polygon
    pub fn draw_polygon(&mut self, points: &[Vec2], color: Rgb, thickness: u32) {
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.draw_thick_line(start, end, color, thickness);
        }
    }
}

/// Clips a segment to the box `[min, max]` (Liang-Barsky), or `None` if nothing is inside
fn clip_segment(from: Vec2, to: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let d = to - from;
    if ![from.x, from.y, d.x, d.y].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-d.x, from.x - min.x),
        (d.x, max.x - from.x),
        (-d.y, from.y - min.y),
        (d.y, max.y - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    // Untouched endpoints are returned as-is so unclipped lines rasterize exactly as given
    let start = if t0 > 0.0 { from + d * t0 } else { from };
    let end = if t1 < 1.0 { from + d * t1 } else { to };
    Some((start, end))
}
