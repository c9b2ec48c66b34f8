//! Detector-space geometry

use std::fmt;

/// Point in detector space (mm)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Straight track segment between an entry and an exit point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Shortest distance from `point` to any point of the segment
    pub fn distance_to(&self, point: &Point) -> f64 {
        let (ux, uy, uz) = (
            self.end.x - self.start.x,
            self.end.y - self.start.y,
            self.end.z - self.start.z,
        );
        let squared_length = ux * ux + uy * uy + uz * uz;
        if squared_length == 0.0 {
            return self.start.distance_to(point);
        }

        let projection = ((point.x - self.start.x) * ux
            + (point.y - self.start.y) * uy
            + (point.z - self.start.z) * uz)
            / squared_length;
        let t = projection.clamp(0.0, 1.0);
        let closest = Point::new(
            self.start.x + t * ux,
            self.start.y + t * uy,
            self.start.z + t * uz,
        );
        closest.distance_to(point)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
