// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound neighbor lists keyed by cell space id.

use indoorgml_lite_core::CellSpace;
use rustc_hash::FxHashMap;

use crate::transitions::Transition;

/// Neighbor lists in cell-space order; each list keeps transition order.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    rows: Vec<(String, Vec<String>)>,
    index: FxHashMap<String, usize>,
}

impl Adjacency {
    /// Builds the index. Transitions naming an unknown source id are ignored.
    pub fn new(cell_spaces: &[CellSpace], transitions: &[Transition]) -> Self {
        let mut adjacency = Self::default();
        for cell in cell_spaces {
            let id = cell.id().to_string();
            adjacency.index.insert(id.clone(), adjacency.rows.len());
            adjacency.rows.push((id, Vec::new()));
        }
        for transition in transitions {
            match adjacency.index.get(&transition.from) {
                Some(&row) => adjacency.rows[row].1.push(transition.to.clone()),
                None => tracing::debug!(from = %transition.from, "transition from unknown cell space"),
            }
        }
        adjacency
    }

    /// Outbound neighbors of `id`; empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> &[String] {
        self.index
            .get(id)
            .map(|&row| self.rows[row].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rows.iter().map(|(id, n)| (id.as_str(), n.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoorgml_lite_core::{Geometry, Properties};

    #[test]
    fn neighbors_follow_transitions() {
        let cells: Vec<CellSpace> = ["a", "b", "c"]
            .iter()
            .map(|id| CellSpace::new(*id, Geometry::Empty, Properties::new()))
            .collect();
        let transitions = vec![
            Transition::new("a", "b"),
            Transition::new("b", "a"),
            Transition::new("x", "a"),
        ];
        let adjacency = Adjacency::new(&cells, &transitions);

        assert_eq!(adjacency.len(), 3);
        assert_eq!(adjacency.neighbors("a"), ["b".to_string()]);
        assert_eq!(adjacency.neighbors("b"), ["a".to_string()]);
        assert!(adjacency.neighbors("c").is_empty());
        assert!(adjacency.neighbors("zzz").is_empty());

        let ids: Vec<&str> = adjacency.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
