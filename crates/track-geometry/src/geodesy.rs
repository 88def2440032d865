//! Geodesic primitives on the WGS84 ellipsoid.
//!
//! Every projection in the crate goes through [`GeoPoint::destination`],
//! which solves the direct geodesic problem with `geo`'s [`Geodesic`]
//! metric space (Karney's algorithm). At track scale this is accurate to
//! well below a millimetre.

use std::fmt;
use std::ops::{Add, Sub};

use geo::{Destination as _, Distance as _, Geodesic, Point};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the point reached by travelling `meters` from `self` along `bearing`.
    pub fn destination(self, bearing: Direction, meters: f64) -> GeoPoint {
        Geodesic
            .destination(Point::from(self), bearing.degrees(), meters)
            .into()
    }

    /// Geodesic distance to `other` in meters.
    pub fn distance_to(self, other: GeoPoint) -> f64 {
        Geodesic.distance(Point::from(self), Point::from(other))
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Compass bearing in degrees clockwise from true north, kept in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Direction(f64);

impl Direction {
    pub const NORTH: Direction = Direction(0.0);
    pub const EAST: Direction = Direction(90.0);
    pub const SOUTH: Direction = Direction(180.0);
    pub const WEST: Direction = Direction(270.0);

    pub fn new(degrees: f64) -> Self {
        Self(degrees.rem_euclid(360.0))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// The reverse bearing.
    pub fn opposite(self) -> Self {
        self + 180.0
    }
}

impl From<f64> for Direction {
    fn from(degrees: f64) -> Self {
        Direction::new(degrees)
    }
}

impl From<Direction> for f64 {
    fn from(direction: Direction) -> Self {
        direction.0
    }
}

impl Add<f64> for Direction {
    type Output = Direction;

    fn add(self, degrees: f64) -> Direction {
        Direction::new(self.0 + degrees)
    }
}

impl Sub<f64> for Direction {
    type Output = Direction;

    fn sub(self, degrees: f64) -> Direction {
        Direction::new(self.0 - degrees)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}
