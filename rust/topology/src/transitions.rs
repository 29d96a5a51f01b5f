// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transitions: directed adjacency edges between cell spaces.

use indoorgml_lite_core::CellSpace;
use serde::Serialize;

use crate::touches::PreparedGeometry;

/// A directed adjacency edge `from -> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Document id of the transition: `trans-<from>-<to>`.
    pub fn id(&self) -> String {
        format!("trans-{}-{}", self.from, self.to)
    }
}

/// Tests every unordered pair `i < j` and emits `(i, j)` then `(j, i)` for
/// each touching pair.
///
/// Output order follows the input order, so the same cell spaces always
/// give the same sequence. Quadratic in the number of cell spaces.
pub fn build_transitions(cell_spaces: &[CellSpace]) -> Vec<Transition> {
    let prepared: Vec<PreparedGeometry> = cell_spaces
        .iter()
        .map(|cell| PreparedGeometry::new(cell.geometry()))
        .collect();

    let mut transitions = Vec::new();
    for i in 0..cell_spaces.len() {
        for j in (i + 1)..cell_spaces.len() {
            if prepared[i].touches(&prepared[j]) {
                let (a, b) = (cell_spaces[i].id(), cell_spaces[j].id());
                tracing::trace!(from = a, to = b, "cell spaces touch");
                transitions.push(Transition::new(a, b));
                transitions.push(Transition::new(b, a));
            }
        }
    }

    tracing::debug!(
        cell_spaces = cell_spaces.len(),
        transitions = transitions.len(),
        "built transitions"
    );
    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoorgml_lite_core::{Coord, Geometry, Properties};
    use proptest::prelude::*;

    fn cell(id: &str, geometry: Geometry) -> CellSpace {
        CellSpace::new(id, geometry, Properties::new())
    }

    fn row_of_squares() -> Vec<CellSpace> {
        vec![
            cell("a", Geometry::rectangle(0.0, 0.0, 1.0, 1.0)),
            cell("b", Geometry::rectangle(1.0, 0.0, 2.0, 1.0)),
            cell("c", Geometry::rectangle(2.0, 0.0, 3.0, 1.0)),
        ]
    }

    #[test]
    fn chain_of_squares() {
        let transitions = build_transitions(&row_of_squares());
        assert_eq!(
            transitions,
            vec![
                Transition::new("a", "b"),
                Transition::new("b", "a"),
                Transition::new("b", "c"),
                Transition::new("c", "b"),
            ]
        );
        assert!(!transitions.contains(&Transition::new("a", "c")));
        assert!(!transitions.contains(&Transition::new("c", "a")));
    }

    #[test]
    fn transitions_are_symmetric() {
        let mut cells = row_of_squares();
        cells.push(cell("d", Geometry::rectangle(0.0, 1.0, 3.0, 2.0)));
        cells.push(cell(
            "door",
            Geometry::LineString(vec![Coord::new(3.0, 0.5), Coord::new(4.0, 0.5)]),
        ));
        cells.push(cell("void", Geometry::Empty));

        let transitions = build_transitions(&cells);
        assert!(!transitions.is_empty());
        for t in &transitions {
            assert_ne!(t.from, t.to);
            assert!(transitions.contains(&Transition::new(t.to.clone(), t.from.clone())));
        }
        assert!(transitions.contains(&Transition::new("c", "door")));
        assert!(!transitions.iter().any(|t| t.from == "void" || t.to == "void"));
    }

    #[test]
    fn order_follows_input_pairs() {
        let cells = vec![
            cell("hall", Geometry::rectangle(0.0, 1.0, 3.0, 2.0)),
            cell("r1", Geometry::rectangle(0.0, 0.0, 1.0, 1.0)),
            cell("r2", Geometry::rectangle(2.0, 0.0, 3.0, 1.0)),
        ];
        let ids: Vec<String> = build_transitions(&cells).iter().map(Transition::id).collect();
        assert_eq!(
            ids,
            vec![
                "trans-hall-r1",
                "trans-r1-hall",
                "trans-hall-r2",
                "trans-r2-hall"
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(build_transitions(&[]).is_empty());
    }

    fn arb_grid_rooms() -> impl Strategy<Value = Vec<CellSpace>> {
        prop::collection::vec((0i32..6, 0i32..6, 1i32..4, 1i32..4), 0..8).prop_map(|rects| {
            rects
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, w, h))| {
                    let (x, y) = (f64::from(x), f64::from(y));
                    cell(
                        &format!("c{}", i),
                        Geometry::rectangle(x, y, x + f64::from(w), y + f64::from(h)),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn grid_rooms_give_symmetric_transitions(cells in arb_grid_rooms()) {
            let transitions = build_transitions(&cells);
            prop_assert_eq!(transitions.len() % 2, 0);
            for (i, t) in transitions.iter().enumerate() {
                prop_assert_ne!(&t.from, &t.to);
                prop_assert!(transitions.contains(&Transition::new(t.to.clone(), t.from.clone())));
                prop_assert!(!transitions[i + 1..].contains(t));
            }
        }
    }
}
