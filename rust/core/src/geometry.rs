// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-part 2D geometry owned by a cell space.
//!
//! Multi-part input is exploded by the loader, so only three concrete shapes
//! exist plus `Empty`, which stands in for null or unsupported geometry and
//! is skipped by every consumer.

use geo::{BoundingRect, Centroid};
use serde::{Deserialize, Serialize};

/// A 2D position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Coord> for geo::Coord<f64> {
    fn from(c: Coord) -> Self {
        geo::Coord { x: c.x, y: c.y }
    }
}

impl From<geo::Coord<f64>> for Coord {
    fn from(c: geo::Coord<f64>) -> Self {
        Coord::new(c.x, c.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: Coord::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Coord::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Closed-interval overlap test; boxes that only share an edge intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Geometry of a cell space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon {
        exterior: Vec<Coord>,
        interiors: Vec<Vec<Coord>>,
    },
    /// Null or unsupported geometry.
    Empty,
}

impl Geometry {
    /// Polygon without holes.
    pub fn polygon(exterior: Vec<Coord>) -> Self {
        Geometry::Polygon {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// Axis-aligned rectangle polygon, closed.
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::polygon(vec![
            Coord::new(min_x, min_y),
            Coord::new(max_x, min_y),
            Coord::new(max_x, max_y),
            Coord::new(min_x, max_y),
            Coord::new(min_x, min_y),
        ])
    }

    /// GeoJSON-style type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::Empty => "Empty",
        }
    }

    /// Every vertex, exterior first.
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(cs) => Box::new(cs.iter()),
            Geometry::Polygon {
                exterior,
                interiors,
            } => Box::new(exterior.iter().chain(interiors.iter().flatten())),
            Geometry::Empty => Box::new(std::iter::empty()),
        }
    }

    /// True when the shape cannot take part in spatial predicates:
    /// too few positions for its kind, or non-finite coordinates. Rings
    /// are judged closed, so an open triangle is a valid polygon.
    pub fn is_degenerate(&self) -> bool {
        let too_few = match self {
            Geometry::Point(_) => false,
            Geometry::LineString(cs) => cs.len() < 2,
            Geometry::Polygon {
                exterior,
                interiors,
            } => {
                ring_is_degenerate(exterior) || interiors.iter().any(|r| ring_is_degenerate(r))
            }
            Geometry::Empty => true,
        };
        too_few || self.coords().any(|c| !c.is_finite())
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let rect = self.to_geo()?.bounding_rect()?;
        Some(Bounds {
            min: rect.min().into(),
            max: rect.max().into(),
        })
    }

    /// Centroid of the shape; area-weighted for polygons.
    pub fn centroid(&self) -> Option<Coord> {
        let point = self.to_geo()?.centroid()?;
        Some(Coord::new(point.x(), point.y()))
    }

    /// Converts to a `geo` geometry. `Empty` has no counterpart.
    pub fn to_geo(&self) -> Option<geo::Geometry<f64>> {
        match self {
            Geometry::Point(c) => Some(geo::Geometry::Point(geo::Point::from(
                geo::Coord::from(*c),
            ))),
            Geometry::LineString(cs) => Some(geo::Geometry::LineString(ring(cs))),
            Geometry::Polygon {
                exterior,
                interiors,
            } => Some(geo::Geometry::Polygon(geo::Polygon::new(
                ring(exterior),
                interiors.iter().map(|r| ring(r)).collect(),
            ))),
            Geometry::Empty => None,
        }
    }
}

/// A ring needs three distinct positions once closed.
fn ring_is_degenerate(ring: &[Coord]) -> bool {
    let mut distinct: Vec<&Coord> = Vec::with_capacity(3);
    for c in ring {
        if !distinct.contains(&c) {
            distinct.push(c);
            if distinct.len() == 3 {
                return false;
            }
        }
    }
    true
}

fn ring(coords: &[Coord]) -> geo::LineString<f64> {
    coords.iter().map(|&c| geo::Coord::from(c)).collect()
}
