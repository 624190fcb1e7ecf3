use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::geometry::{Corner, Triangle};
use crate::math::Vec2;

/// Reading reported for positions outside the sampling surface
pub const OUT_OF_BOUNDS_COLOR: Rgb = Rgb::BLACK;

/// Reads the surface color under `position`, truncating it toward zero to a pixel
pub fn sample(surface: &Canvas, position: Vec2) -> Rgb {
    let (x, y) = (position.x.trunc(), position.y.trunc());
    let on_surface = (0.0..surface.width() as f64).contains(&x)
        && (0.0..surface.height() as f64).contains(&y);
    if !on_surface {
        return OUT_OF_BOUNDS_COLOR;
    }
    surface
        .get(x as i64, y as i64)
        .unwrap_or(OUT_OF_BOUNDS_COLOR)
}

impl Corner {
    /// Samples the surface at this corner and updates the reading and change flag
    pub fn check_color(&mut self, surface: &Canvas) {
        let reading = sample(surface, self.position());
        self.record(reading);
    }
}

impl Triangle {
    /// Refreshes the sensor reading of every corner
    pub fn update_sensor_colors(&mut self, surface: &Canvas) {
        for corner in self.corners_mut() {
            corner.check_color(surface);
        }
    }
}
