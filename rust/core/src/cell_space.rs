// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cell spaces: one indoor unit (room, corridor, door, stair) per record.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::geometry::Geometry;
use crate::loader::FeatureRecord;
use crate::properties::Properties;

/// One indoor spatial unit.
///
/// The geometry is fixed at construction. Properties are only changed by
/// [`attach_semantics`](crate::semantics::attach_semantics).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSpace {
    id: String,
    geometry: Geometry,
    properties: Properties,
}

impl CellSpace {
    pub fn new(id: impl Into<String>, geometry: Geometry, properties: Properties) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

/// Wraps loader records into cell spaces.
///
/// The id is the record's truthy `id` property in string form, or
/// `cell-<index>` by position. Ids that were already issued get a `-1`,
/// `-2`, ... suffix so every cell space stays addressable.
pub fn build_cell_spaces(records: Vec<FeatureRecord>) -> Vec<CellSpace> {
    let mut issued: FxHashSet<String> = FxHashSet::default();
    let mut cell_spaces = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let base = record
            .properties
            .get_truthy("id")
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("cell-{}", index));

        let mut id = base.clone();
        let mut suffix = 1;
        while issued.contains(&id) {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        if id != base {
            tracing::debug!(original = %base, renamed = %id, "duplicate cell space id");
        }
        issued.insert(id.clone());

        cell_spaces.push(CellSpace::new(id, record.geometry, record.properties));
    }

    cell_spaces
}
