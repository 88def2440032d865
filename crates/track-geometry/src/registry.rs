//! Compiled-in table of known campus tracks.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::errors::TrackError;
use crate::geodesy::{Direction, GeoPoint};
use crate::geometry::TrackGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Campus {
    Handan,
    Jiangwan,
    Fenglin,
    Zhangjiang,
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Campus::Handan => "Handan",
            Campus::Jiangwan => "Jiangwan",
            Campus::Fenglin => "Fenglin",
            Campus::Zhangjiang => "Zhangjiang",
        };
        f.pad(name)
    }
}

/// The kind of workout a route is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Session {
    MorningExercise,
    Extracurricular,
    NightRun,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Session::MorningExercise => "morning exercise",
            Session::Extracurricular => "extracurricular",
            Session::NightRun => "night run",
        };
        f.pad(name)
    }
}

struct RouteSpec {
    id: u32,
    campus: Campus,
    session: Session,
    venue: &'static str,
    lat: f64,
    lon: f64,
    bearing: f64,
}

const fn spec(
    id: u32,
    campus: Campus,
    session: Session,
    venue: &'static str,
    lat: f64,
    lon: f64,
    bearing: f64,
) -> RouteSpec {
    RouteSpec {
        id,
        campus,
        session,
        venue,
        lat,
        lon,
        bearing,
    }
}

#[rustfmt::skip]
const ROUTE_TABLE: [RouteSpec; 17] = {
    use Campus::*;
    use Session::*;
    [
        spec(28, Handan, MorningExercise, "South Athletic Field",      31.291805, 121.502810, 180.0),
        spec(29, Handan, MorningExercise, "North Field",               31.299212, 121.497172, 180.0),
        spec(33, Handan, Extracurricular, "South Athletic Field",      31.290807, 121.502805, 180.0),
        spec(34, Handan, Extracurricular, "Off-campus Athletic Field", 31.296773, 121.507075, 216.5),
        spec(38, Handan, NightRun,        "South Athletic Field",      31.291805, 121.502805, 180.0),
        spec(39, Handan, NightRun,        "Off-campus Athletic Field", 31.295949, 121.507585, 216.5),
        spec(47, Handan, MorningExercise, "East Field",                31.300564, 121.507174, 180.0),
        spec(48, Handan, MorningExercise, "Main Campus Field",         31.298228, 121.506942, 180.0),

        spec(30, Jiangwan, MorningExercise, "Athletic Field", 31.334087, 121.501873, 166.3),
        spec(35, Jiangwan, Extracurricular, "Athletic Field", 31.333924, 121.501948, 166.3),
        spec(40, Jiangwan, NightRun,        "Campus Track",   31.335219, 121.502667, 166.3),

        spec(31, Fenglin, MorningExercise, "Athletic Field", 31.195844, 121.451268, 180.0),
        spec(36, Fenglin, Extracurricular, "Athletic Field", 31.195866, 121.451262, 180.0),
        spec(41, Fenglin, NightRun,        "Campus Track",   31.195866, 121.451283, 180.0),

        spec(32, Zhangjiang, MorningExercise, "Campus Track", 31.189964, 121.598392, 180.0),
        spec(37, Zhangjiang, Extracurricular, "Campus Track", 31.189906, 121.598406, 180.0),
        spec(42, Zhangjiang, NightRun,        "Campus Track", 31.189915, 121.598419, 180.0),
    ]
};

static GLOBAL: Lazy<TrackRegistry> = Lazy::new(TrackRegistry::builtin);

/// A registered route: where it is and the track it runs on.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: u32,
    pub campus: Campus,
    pub session: Session,
    pub venue: &'static str,
    pub geometry: TrackGeometry,
}

/// Immutable mapping from route id to track geometry.
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    routes: BTreeMap<u32, Route>,
}

impl TrackRegistry {
    /// Builds the registry from the compiled-in route table.
    pub fn builtin() -> Self {
        let routes = ROUTE_TABLE
            .iter()
            .map(|s| {
                let geometry =
                    TrackGeometry::new(GeoPoint::new(s.lat, s.lon), Direction::new(s.bearing));
                let route = Route {
                    id: s.id,
                    campus: s.campus,
                    session: s.session,
                    venue: s.venue,
                    geometry,
                };
                (s.id, route)
            })
            .collect::<BTreeMap<_, _>>();

        debug!("Built track registry with {} routes", routes.len());
        Self { routes }
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static TrackRegistry {
        &GLOBAL
    }

    pub fn lookup(&self, route_id: u32) -> Result<&TrackGeometry, TrackError> {
        self.route(route_id)
            .map(|r| &r.geometry)
            .ok_or(TrackError::UnsupportedRoute(route_id))
    }

    pub fn route(&self, route_id: u32) -> Option<&Route> {
        self.routes.get(&route_id)
    }

    pub fn contains(&self, route_id: u32) -> bool {
        self.routes.contains_key(&route_id)
    }

    /// All routes in ascending id order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
