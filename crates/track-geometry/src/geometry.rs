//! Oval running-track model.
//!
//! A track is two straights joined by two semicircular turns. Position on
//! the track is a single arc-length coordinate measured from the start
//! line, walked through a table of segments:
//!
//! ```text
//!   first curve -> first straight -> second curve -> second straight -> (start)
//! ```

use std::f64::consts::PI;

use rand::Rng;
use serde::Serialize;

use crate::geodesy::{Direction, GeoPoint};

/// Curve radius shared by every track, in meters.
pub const CURVE_RADIUS_M: f64 = 36.5;

/// Length of each straight, in meters.
pub const STRAIGHT_LENGTH_M: f64 = 86.96;

/// Upper bound of the GPS jitter applied by [`TrackGeometry::random_offset`].
pub const MAX_JITTER_M: f64 = 0.3;

/// The four pieces of the oval, in the order a lap visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentId {
    FirstCurve,
    FirstStraight,
    SecondCurve,
    SecondStraight,
}

/// Where an arc-length value falls on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPosition {
    pub segment: SegmentId,
    /// Meters into `segment`.
    pub offset: f64,
}

#[derive(Debug, Clone, Copy)]
enum Path {
    /// Clockwise arc around `center`, starting at bearing `from`.
    Arc {
        center: GeoPoint,
        radius: f64,
        from: Direction,
    },
    /// Straight line leaving `origin` along `bearing`.
    Line { origin: GeoPoint, bearing: Direction },
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    id: SegmentId,
    length: f64,
    path: Path,
}

impl Segment {
    fn point_at(&self, offset: f64) -> GeoPoint {
        match self.path {
            Path::Arc {
                center,
                radius,
                from,
            } => center.destination(from + (offset / radius).to_degrees(), radius),
            Path::Line { origin, bearing } => origin.destination(bearing, offset),
        }
    }
}

/// One physical oval track anchored at a real-world start line.
#[derive(Debug, Clone)]
pub struct TrackGeometry {
    start: GeoPoint,
    direction: Direction,
    center1: GeoPoint,
    center2: GeoPoint,
    anchor1: GeoPoint,
    anchor2: GeoPoint,
    segments: [Segment; 4],
}

impl TrackGeometry {
    /// Builds the track whose finishing straight runs along `direction` into `start`.
    pub fn new(start: GeoPoint, direction: Direction) -> Self {
        let r = CURVE_RADIUS_M;
        let l = STRAIGHT_LENGTH_M;

        let center1 = start.destination(direction + 90.0, r);
        let center2 = center1.destination(direction - 180.0, l);
        let anchor1 = center1.destination(direction + 90.0, r);
        let anchor2 = start.destination(direction + 180.0, l);

        let curve_length = PI * r;
        let segments = [
            Segment {
                id: SegmentId::FirstCurve,
                length: curve_length,
                path: Path::Arc {
                    center: center1,
                    radius: r,
                    from: direction - 90.0,
                },
            },
            Segment {
                id: SegmentId::FirstStraight,
                length: l,
                path: Path::Line {
                    origin: anchor1,
                    bearing: direction + 180.0,
                },
            },
            Segment {
                id: SegmentId::SecondCurve,
                length: curve_length,
                path: Path::Arc {
                    center: center2,
                    radius: r,
                    from: direction + 90.0,
                },
            },
            Segment {
                id: SegmentId::SecondStraight,
                length: l,
                path: Path::Line {
                    origin: anchor2,
                    bearing: direction,
                },
            },
        ];

        Self {
            start,
            direction,
            center1,
            center2,
            anchor1,
            anchor2,
            segments,
        }
    }

    pub fn start(&self) -> GeoPoint {
        self.start
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Center of the first turn.
    pub fn center1(&self) -> GeoPoint {
        self.center1
    }

    /// Center of the second turn.
    pub fn center2(&self) -> GeoPoint {
        self.center2
    }

    /// Where the first curve hands over to the first straight.
    pub fn anchor1(&self) -> GeoPoint {
        self.anchor1
    }

    /// Where the second curve hands over to the second straight.
    pub fn anchor2(&self) -> GeoPoint {
        self.anchor2
    }

    pub fn radius(&self) -> f64 {
        CURVE_RADIUS_M
    }

    pub fn straight_length(&self) -> f64 {
        STRAIGHT_LENGTH_M
    }

    /// Perimeter of the oval: `2 * straight + 2 * pi * radius`.
    pub fn lap_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Arc-length at which each segment begins, in lap order.
    pub fn segment_starts(&self) -> [(SegmentId, f64); 4] {
        let mut acc = 0.0;
        self.segments.map(|s| {
            let begin = acc;
            acc += s.length;
            (s.id, begin)
        })
    }

    /// Resolves an arc-length distance to a segment and an offset into it.
    ///
    /// Distances wrap every [`lap_length`](Self::lap_length). A distance that
    /// lands exactly on a boundary belongs to the following segment.
    pub fn locate(&self, distance: f64) -> TrackPosition {
        self.resolve(distance).1
    }

    /// Maps an arc-length distance from the start line to a coordinate.
    pub fn coordinate(&self, distance: f64) -> GeoPoint {
        let (segment, position) = self.resolve(distance);
        segment.point_at(position.offset)
    }

    /// [`coordinate`](Self::coordinate) displaced by up to [`MAX_JITTER_M`]
    /// in a uniformly random direction.
    pub fn random_offset<R: Rng + ?Sized>(&self, distance: f64, rng: &mut R) -> GeoPoint {
        let bearing = Direction::new(rng.gen_range(0.0..360.0));
        let meters = rng.gen_range(0.0..=MAX_JITTER_M);
        self.coordinate(distance).destination(bearing, meters)
    }

    fn resolve(&self, distance: f64) -> (&Segment, TrackPosition) {
        let mut offset = distance.rem_euclid(self.lap_length());
        let [leading @ .., closing] = &self.segments;

        for segment in leading {
            if offset < segment.length {
                return (
                    segment,
                    TrackPosition {
                        segment: segment.id,
                        offset,
                    },
                );
            }
            offset -= segment.length;
        }

        // The closing straight takes whatever remains of the lap.
        (
            closing,
            TrackPosition {
                segment: closing.id,
                offset,
            },
        )
    }
}
