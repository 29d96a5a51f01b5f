// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IndoorGML-like document generation.

use std::path::Path;

use indoorgml_lite_core::{format_float, CellSpace, Coord, Geometry, Properties};
use indoorgml_lite_topology::Transition;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::xml::{sanitize_name, Element};

pub const ROOT_TAG: &str = "IndoorFeatures";
pub const CORE_NAMESPACE: &str = "http://www.opengis.net/indoorgml/1.0/core";
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";
pub const SRS_NAME: &str = "EPSG:4326";

/// Builds the document tree: every cell space, then every transition.
pub fn generate_document(cell_spaces: &[CellSpace], transitions: &[Transition]) -> Element {
    let mut root = Element::new(ROOT_TAG)
        .with_attr("xmlns", CORE_NAMESPACE)
        .with_attr("xmlns:gml", GML_NAMESPACE);

    for cell in cell_spaces {
        root.push(cell_space_element(cell));
    }
    for transition in transitions {
        root.push(transition_element(transition));
    }

    tracing::debug!(
        cell_spaces = cell_spaces.len(),
        transitions = transitions.len(),
        "generated document"
    );
    root
}

/// Serializes `document` in memory and writes it with a single call.
pub fn write_document(document: &Element, path: &Path) -> Result<()> {
    let xml = document.to_xml_string();
    std::fs::write(path, xml.as_bytes()).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = xml.len(), "wrote document");
    Ok(())
}

fn cell_space_element(cell: &CellSpace) -> Element {
    let mut element = Element::new("cellSpace").with_attr("id", cell.id());
    if let Some(geometry) = geometry_element(cell.geometry()) {
        element.push(geometry);
    }
    if !cell.properties().is_empty() {
        element.push(semantic_properties(cell.properties()));
    }
    element
}

fn geometry_element(geometry: &Geometry) -> Option<Element> {
    let element = match geometry {
        Geometry::Polygon { exterior, .. } => gml("gml:Polygon").with_child(
            Element::new("gml:exterior").with_child(
                Element::new("gml:LinearRing")
                    .with_child(Element::new("gml:posList").with_text(pos_list(&closed(exterior)))),
            ),
        ),
        Geometry::LineString(coords) => gml("gml:LineString")
            .with_child(Element::new("gml:posList").with_text(pos_list(coords))),
        Geometry::Point(coord) => {
            gml("gml:Point").with_child(Element::new("gml:pos").with_text(pos_list(&[*coord])))
        }
        Geometry::Empty => return None,
    };
    Some(element)
}

fn gml(name: &str) -> Element {
    Element::new(name).with_attr("srsName", SRS_NAME)
}

fn semantic_properties(properties: &Properties) -> Element {
    let mut wrapper = Element::new("semanticProperties");
    let mut issued: FxHashSet<String> = FxHashSet::default();
    for (key, value) in properties.iter().filter(|(_, v)| v.is_present()) {
        let base = sanitize_name(key);
        let mut name = base.clone();
        let mut suffix = 1;
        while issued.contains(&name) {
            name = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        if name != base {
            tracing::debug!(key = %key, element = %name, "sanitized property name collides");
        }
        issued.insert(name.clone());
        wrapper.push(Element::new(name).with_text(value.to_string()));
    }
    wrapper
}

fn transition_element(transition: &Transition) -> Element {
    Element::new("cellSpaceTransition")
        .with_attr("id", transition.id())
        .with_child(
            Element::new("connects")
                .with_attr("cellSpaceFrom", transition.from.as_str())
                .with_attr("cellSpaceTo", transition.to.as_str()),
        )
}

fn closed(ring: &[Coord]) -> Vec<Coord> {
    let mut ring = ring.to_vec();
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last()) {
        if first != *last {
            ring.push(first);
        }
    }
    ring
}

fn pos_list(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(|c| format!("{} {}", format_float(c.x), format_float(c.y)))
        .collect::<Vec<_>>()
        .join(" ")
}
