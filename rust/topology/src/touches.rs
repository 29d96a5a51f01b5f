// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The touches predicate: boundaries intersect, interiors are disjoint.

use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::Relate;
use indoorgml_lite_core::{Bounds, Geometry};

/// A geometry converted once for repeated predicate evaluation.
///
/// Degenerate and empty geometries have no shape and touch nothing.
#[derive(Debug)]
pub(crate) struct PreparedGeometry {
    shape: Option<geo::Geometry<f64>>,
    bounds: Option<Bounds>,
}

impl PreparedGeometry {
    pub(crate) fn new(geometry: &Geometry) -> Self {
        if geometry.is_degenerate() {
            return Self {
                shape: None,
                bounds: None,
            };
        }
        Self {
            shape: geometry.to_geo(),
            bounds: geometry.bounds(),
        }
    }

    pub(crate) fn touches(&self, other: &PreparedGeometry) -> bool {
        let (Some(a), Some(b)) = (&self.shape, &other.shape) else {
            return false;
        };
        if let (Some(ba), Some(bb)) = (&self.bounds, &other.bounds) {
            if !ba.intersects(bb) {
                return false;
            }
        }
        // geo's relate graph can panic on pathological input
        match catch_unwind(AssertUnwindSafe(|| a.relate(b).is_touches())) {
            Ok(touching) => touching,
            Err(_) => {
                tracing::warn!("relate computation failed, treating pair as not touching");
                false
            }
        }
    }
}

/// Returns `true` when the two geometries share boundary points but no
/// interior points.
pub fn touches(a: &Geometry, b: &Geometry) -> bool {
    PreparedGeometry::new(a).touches(&PreparedGeometry::new(b))
}
