use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::error::SimError;

/// Concentric filled rings cycling through a fixed color list
///
/// Rings are laid down as filled discs from the largest radius inward, so a
/// pixel takes the color of the innermost disc that still covers it.
#[derive(Clone, Debug, PartialEq)]
pub struct ConcentricCircles {
    center: (i64, i64),
    band_width: u32,
    colors: Vec<Rgb>,
}

impl ConcentricCircles {
    pub fn new(center: (i64, i64), band_width: u32, colors: Vec<Rgb>) -> Result<Self, SimError> {
        if band_width == 0 {
            return Err(SimError::config("band width must be positive"));
        }
        if colors.is_empty() {
            return Err(SimError::config("at least one band color is required"));
        }
        Ok(ConcentricCircles {
            center,
            band_width,
            colors,
        })
    }

    /// Radius of the outermost disc: the screen diagonal, truncated
    pub fn max_radius(width: usize, height: usize) -> i64 {
        ((width * width + height * height) as f64).sqrt() as i64
    }

    /// Number of discs drawn, counting down from `max_radius` while the radius stays positive
    fn disc_count(&self, max_radius: i64) -> i64 {
        let band = i64::from(self.band_width);
        if max_radius <= 0 {
            0
        } else {
            (max_radius + band - 1) / band
        }
    }

    /// Color of the pixel at `(x, y)`, or `None` if no disc covers it
    pub fn color_at(&self, x: i64, y: i64, max_radius: i64) -> Option<Rgb> {
        let count = self.disc_count(max_radius);
        let (dx, dy) = ((x - self.center.0) as f64, (y - self.center.1) as f64);
        let distance = (dx * dx + dy * dy).sqrt();
        if count == 0 || distance > max_radius as f64 {
            return None;
        }

        // Disc k has radius max_radius - k * band_width; pick the innermost one containing the pixel
        let innermost = ((max_radius as f64 - distance) / f64::from(self.band_width)).floor() as i64;
        let disc = innermost.min(count - 1);
        Some(self.colors[disc as usize % self.colors.len()])
    }

    /// Paints the rings onto `canvas`, leaving uncovered pixels untouched
    pub fn draw(&self, canvas: &mut Canvas) {
        let max_radius = Self::max_radius(canvas.width(), canvas.height());
        for y in 0..canvas.height() as i64 {
            for x in 0..canvas.width() as i64 {
                if let Some(color) = self.color_at(x, y, max_radius) {
                    canvas.set(x, y, color);
                }
            }
        }
    }

    /// Renders the rings once into a fresh black canvas used for sensor lookups
    pub fn rasterize(&self, width: usize, height: usize) -> Canvas {
        let mut surface = Canvas::new(width, height);
        self.draw(&mut surface);
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BAND_COLORS;

    fn default_rings() -> ConcentricCircles {
        ConcentricCircles::new((400, 300), 20, BAND_COLORS.to_vec()).unwrap()
    }

    #[test]
    fn max_radius_is_truncated_diagonal() {
        assert_eq!(ConcentricCircles::max_radius(800, 600), 1000);
        assert_eq!(ConcentricCircles::max_radius(3, 3), 4);
    }

    #[test]
    fn outermost_ring_uses_first_color() {
        let rings = default_rings();
        // Distance 1000 lies on the outermost disc only
        assert_eq!(rings.color_at(1400, 300, 1000), Some(Rgb::WHITE));
        assert_eq!(rings.color_at(1401, 300, 1000), None);
    }

    #[test]
    fn ring_boundary_belongs_to_the_inner_disc() {
        let rings = default_rings();
        // Disc 41 has radius 180 and color index 41 % 3 == 2
        assert_eq!(rings.color_at(400, 120, 1000), Some(Rgb::GRAY));
        assert_eq!(rings.color_at(400, 119, 1000), Some(Rgb::BLACK));
        // Disc 40 has radius 200
        assert_eq!(rings.color_at(400, 100, 1000), Some(Rgb::BLACK));
        assert_eq!(rings.color_at(400, 99, 1000), Some(Rgb::WHITE));
    }

    #[test]
    fn center_takes_the_last_positive_disc() {
        // Discs 0..=49 have radii 1000..=20; the center falls in disc 49
        let rings = default_rings();
        assert_eq!(rings.color_at(400, 300, 1000), Some(BAND_COLORS[49 % 3]));
    }

    #[test]
    fn rasterized_surface_matches_color_at() {
        let rings = ConcentricCircles::new((5, 5), 2, vec![Rgb::RED, Rgb::BLUE]).unwrap();
        let surface = rings.rasterize(10, 10);
        let max_radius = ConcentricCircles::max_radius(10, 10);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(surface.get(x, y), rings.color_at(x, y, max_radius));
            }
        }
    }

    #[test]
    fn uncovered_pixels_keep_the_black_fill() {
        // Center far off-canvas so the diagonal radius cannot reach
        let rings = ConcentricCircles::new((-100, -100), 5, vec![Rgb::WHITE]).unwrap();
        let surface = rings.rasterize(4, 4);
        assert_eq!(surface.get(3, 3), Some(Rgb::BLACK));
    }

    #[test]
    fn rejects_zero_band_width_and_empty_palette() {
        assert!(ConcentricCircles::new((0, 0), 0, BAND_COLORS.to_vec()).is_err());
        assert!(ConcentricCircles::new((0, 0), 10, Vec::new()).is_err());
    }
}
