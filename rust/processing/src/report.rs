// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Human-readable adjacency and feature tables.
//!
//! Both are read-only projections of the converted cell spaces. They print
//! like a data frame without index: a header row, then right-aligned
//! columns separated by one space.

use std::fmt;

use indoorgml_lite_core::{detect_level, CellSpace};
use indoorgml_lite_topology::{Adjacency, Transition};
use serde::Serialize;

/// Placeholder for an empty cell.
pub const DASH: &str = "-";

/// A column-aligned text table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[&'static str] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Value of `column` in the first row whose first cell is `key`.
    pub fn lookup(&self, key: &str, column: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| *h == column)?;
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(key))
            .and_then(|row| row.get(col))
            .map(String::as_str)
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_row(f, self.headers.iter().copied(), &widths)?;
        for row in &self.rows {
            writeln!(f)?;
            write_row(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_row<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{:>width$}", cell, width = *width)?;
    }
    Ok(())
}

/// One row per cell space: id and comma-joined outbound neighbors.
pub fn adjacency_table(cell_spaces: &[CellSpace], transitions: &[Transition]) -> Table {
    let adjacency = Adjacency::new(cell_spaces, transitions);
    let mut table = Table::new(vec!["Room", "Neighbors"]);
    for (id, neighbors) in adjacency.iter() {
        table.push_row(vec![id.to_string(), join_neighbors(neighbors)]);
    }
    table
}

/// One row per cell space: id, detected floor, display name and neighbors.
pub fn feature_table(cell_spaces: &[CellSpace], transitions: &[Transition]) -> Table {
    let adjacency = Adjacency::new(cell_spaces, transitions);
    let mut table = Table::new(vec!["ID", "Level", "Name", "Neighbors"]);
    for cell in cell_spaces {
        let props = cell.properties();
        let name = props
            .get_present("name")
            .map_or_else(|| DASH.to_string(), |v| v.to_string());
        table.push_row(vec![
            cell.id().to_string(),
            detect_level(props),
            name,
            join_neighbors(adjacency.neighbors(cell.id())),
        ]);
    }
    table
}

fn join_neighbors(neighbors: &[String]) -> String {
    if neighbors.is_empty() {
        DASH.to_string()
    } else {
        neighbors.join(",")
    }
}
