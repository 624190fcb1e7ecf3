use crate::color::Rgb;
use crate::math::{equilateral_vertices, Vec2};
use std::fmt;

/// Identity of one of the three triangle corners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CornerLabel {
    A,
    B,
    C,
}

impl CornerLabel {
    /// All labels, in vertex order
    pub const ALL: [CornerLabel; 3] = [CornerLabel::A, CornerLabel::B, CornerLabel::C];

    /// Position of this corner in vertex order
    pub const fn index(self) -> usize {
        match self {
            CornerLabel::A => 0,
            CornerLabel::B => 1,
            CornerLabel::C => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CornerLabel::A => "A",
            CornerLabel::B => "B",
            CornerLabel::C => "C",
        }
    }
}

impl fmt::Display for CornerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A triangle corner carrying a color sensor
#[derive(Clone, Debug, PartialEq)]
pub struct Corner {
    label: CornerLabel,
    position: Vec2,
    /// Last sampled color, black until the first sample
    sensor_reading: Rgb,
    /// Whether the last sample differed from the one before it
    has_changed: bool,
}

impl Corner {
    fn new(label: CornerLabel, position: Vec2) -> Self {
        Corner {
            label,
            position,
            sensor_reading: Rgb::BLACK,
            has_changed: false,
        }
    }

    pub fn label(&self) -> CornerLabel {
        self.label
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn sensor_reading(&self) -> Rgb {
        self.sensor_reading
    }

    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    /// Stores a new sample and flags whether it differs from the previous one
    pub(crate) fn record(&mut self, sample: Rgb) {
        self.has_changed = sample != self.sensor_reading;
        self.sensor_reading = sample;
    }
}

/// An equilateral triangle robot with a sensor on each corner
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    center: Vec2,
    size: f64,
    corners: [Corner; 3],
    control_corner: CornerLabel,
}

impl Triangle {
    /// Creates a triangle whose corners sit `size` pixels from `center`, controlled from corner A
    pub fn new(center: Vec2, size: f64) -> Self {
        let [a, b, c] = equilateral_vertices(center, size);
        Triangle {
            center,
            size,
            corners: [
                Corner::new(CornerLabel::A, a),
                Corner::new(CornerLabel::B, b),
                Corner::new(CornerLabel::C, c),
            ],
            control_corner: CornerLabel::A,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn corners(&self) -> &[Corner; 3] {
        &self.corners
    }

    pub(crate) fn corners_mut(&mut self) -> &mut [Corner; 3] {
        &mut self.corners
    }

    pub fn corner(&self, label: CornerLabel) -> &Corner {
        &self.corners[label.index()]
    }

    /// The corner used as reference for normal-direction movement
    pub fn control_corner(&self) -> &Corner {
        self.corner(self.control_corner)
    }

    pub fn set_control_corner(&mut self, label: CornerLabel) {
        self.control_corner = label;
    }

    /// Current vertex positions, in label order
    pub fn points(&self) -> [Vec2; 3] {
        equilateral_vertices(self.center, self.size)
    }

    fn update_positions(&mut self) {
        let points = self.points();
        for (corner, point) in self.corners.iter_mut().zip(points) {
            corner.position = point;
        }
    }

    /// Translates the triangle; there is no bounds checking
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.center.x += dx;
        self.center.y += dy;
        self.update_positions();
    }

    /// Moves `step` pixels along the normal of the edge joining the two non-control corners
    ///
    /// The edge vector runs from the first to the second non-control corner in
    /// label order and is rotated a quarter turn, `(x, y)` to `(-y, x)`. A
    /// degenerate edge yields no movement.
    pub fn move_in_normal_direction(&mut self, step: f64) {
        let mut others = self
            .corners
            .iter()
            .filter(|corner| corner.label != self.control_corner);
        let (Some(c1), Some(c2)) = (others.next(), others.next()) else {
            return;
        };

        let edge = c2.position - c1.position;
        let normal = edge.perpendicular().normalized_or_zero();
        self.move_by(normal.x * step, normal.y * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn corners_are_equidistant_and_evenly_spaced() {
        for &(x, y) in &[(0.0, 0.0), (400.0, 150.0), (-73.5, 1e4), (12.25, -0.5)] {
            let mut triangle = Triangle::new(Vec2::new(0.0, 0.0), 50.0);
            triangle.move_by(x, y);
            let center = triangle.center();
            let offsets: Vec<Vec2> = triangle
                .corners()
                .iter()
                .map(|corner| corner.position() - center)
                .collect();
            for offset in &offsets {
                assert!((offset.length() - 50.0).abs() < 1e-6);
            }
            for i in 0..3 {
                let (u, v) = (offsets[i], offsets[(i + 1) % 3]);
                let cos = (u.x * v.x + u.y * v.y) / (u.length() * v.length());
                assert!((cos + 0.5).abs() < 1e-9, "corners must be 120 degrees apart");
            }
        }
    }

    #[test]
    fn translation_is_invertible() {
        let mut triangle = Triangle::new(Vec2::new(400.0, 150.0), 50.0);
        let before = triangle.clone();
        triangle.move_by(13.7, -42.1);
        assert!(!close(triangle.center(), before.center()));
        triangle.move_by(-13.7, 42.1);
        assert!(close(triangle.center(), before.center()));
        for (after, original) in triangle.corners().iter().zip(before.corners()) {
            assert!(close(after.position(), original.position()));
        }
    }

    #[test]
    fn normal_move_from_corner_a_heads_toward_a() {
        // With y pointing down, B sits below-left and C above-left of the
        // center, so the rotated B->C edge points along +x toward A
        let mut triangle = Triangle::new(Vec2::new(100.0, 100.0), 50.0);
        triangle.move_in_normal_direction(5.0);
        assert!(close(triangle.center(), Vec2::new(105.0, 100.0)));
    }

    #[test]
    fn normal_move_uses_non_control_corners() {
        let mut triangle = Triangle::new(Vec2::new(0.0, 0.0), 10.0);
        triangle.set_control_corner(CornerLabel::B);
        assert_eq!(triangle.control_corner().label(), CornerLabel::B);
        let [a, _, c] = triangle.points();
        let expected = (c - a).perpendicular().normalized_or_zero() * 2.0;
        triangle.move_in_normal_direction(2.0);
        assert!(close(triangle.center(), expected));
    }

    #[test]
    fn degenerate_edge_does_not_move() {
        // Size zero puts every corner on the center
        let mut triangle = Triangle::new(Vec2::new(7.0, 9.0), 0.0);
        triangle.move_in_normal_direction(5.0);
        assert_eq!(triangle.center(), Vec2::new(7.0, 9.0));
        for corner in triangle.corners() {
            assert_eq!(corner.position(), Vec2::new(7.0, 9.0));
        }
    }

    #[test]
    fn record_flags_changes() {
        let mut corner = Corner::new(CornerLabel::A, Vec2::ZERO);
        corner.record(Rgb::BLACK);
        assert!(!corner.has_changed());
        corner.record(Rgb::WHITE);
        assert!(corner.has_changed());
        assert_eq!(corner.sensor_reading(), Rgb::WHITE);
        corner.record(Rgb::WHITE);
        assert!(!corner.has_changed());
    }
}
