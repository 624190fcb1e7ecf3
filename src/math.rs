use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// A point or direction on the simulation plane, in screen pixels (y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Euclidean length of the vector
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Rotates the vector by 90 degrees: (x, y) becomes (-y, x)
    pub fn perpendicular(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Scales the vector to unit length, leaving a zero vector untouched
    pub fn normalized_or_zero(self) -> Vec2 {
        let length = self.length();
        if length != 0.0 {
            Vec2::new(self.x / length, self.y / length)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Computes the vertices of an equilateral triangle centered on `center`
///
/// Vertex `i` sits at angle `2π·i/3` and distance `size` from the center.
pub fn equilateral_vertices(center: Vec2, size: f64) -> [Vec2; 3] {
    let mut vertices = [Vec2::ZERO; 3];
    for (i, vertex) in vertices.iter_mut().enumerate() {
        let angle = 2.0 * PI * i as f64 / 3.0;
        let (sin, cos) = angle.sin_cos();
        *vertex = Vec2::new(center.x + size * cos, center.y + size * sin);
    }
    vertices
}
