// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoJSON feature loading.
//!
//! Reads a FeatureCollection (or a single Feature, or a bare geometry) into
//! flat records of single-part geometry plus properties. Multi-part
//! geometries and geometry collections are exploded: each part becomes its
//! own record carrying a copy of the parent's properties.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::geometry::{Coord, Geometry};
use crate::properties::{PropertyValue, Properties};

/// One loader record: single-part geometry with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub geometry: Geometry,
    pub properties: Properties,
}

/// Reads and parses a GeoJSON file.
pub fn load_features(path: &Path) -> Result<Vec<FeatureRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_features(&text)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded features");
    Ok(records)
}

/// Parses GeoJSON text into exploded records.
pub fn parse_features(text: &str) -> Result<Vec<FeatureRecord>> {
    let root: Value = serde_json::from_str(text)?;
    let object = root
        .as_object()
        .ok_or_else(|| invalid("top-level value is not an object"))?;

    let mut records = Vec::new();
    match type_of(object)? {
        "FeatureCollection" => {
            let features = object
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| invalid("FeatureCollection without a features array"))?;
            for (index, feature) in features.iter().enumerate() {
                let feature = feature
                    .as_object()
                    .ok_or_else(|| invalid(format!("feature {} is not an object", index)))?;
                push_feature(feature, &mut records)?;
            }
        }
        "Feature" => push_feature(object, &mut records)?,
        _ => {
            for geometry in explode(object)? {
                records.push(FeatureRecord {
                    geometry,
                    properties: Properties::new(),
                });
            }
        }
    }
    Ok(records)
}

fn push_feature(feature: &Map<String, Value>, records: &mut Vec<FeatureRecord>) -> Result<()> {
    let mut properties: Properties = match feature.get("properties") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.as_str(), PropertyValue::from_json(v)))
            .collect(),
        Some(Value::Null) | None => Properties::new(),
        Some(_) => return Err(invalid("feature properties must be an object or null")),
    };

    if !properties.contains_key("id") {
        if let Some(id) = feature.get("id").filter(|v| !v.is_null()) {
            properties.insert("id", PropertyValue::from_json(id));
        }
    }

    let parts = match feature.get("geometry") {
        Some(Value::Object(geometry)) => explode(geometry)?,
        Some(Value::Null) | None => vec![Geometry::Empty],
        Some(_) => return Err(invalid("feature geometry must be an object or null")),
    };

    for geometry in parts {
        records.push(FeatureRecord {
            geometry,
            properties: properties.clone(),
        });
    }
    Ok(())
}

/// Splits a GeoJSON geometry object into single-part geometries.
fn explode(geometry: &Map<String, Value>) -> Result<Vec<Geometry>> {
    let kind = type_of(geometry)?;
    if kind == "GeometryCollection" {
        let members = geometry
            .get("geometries")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("GeometryCollection without a geometries array"))?;
        let mut parts = Vec::new();
        for member in members {
            let member = member
                .as_object()
                .ok_or_else(|| invalid("GeometryCollection member is not an object"))?;
            parts.extend(explode(member)?);
        }
        return Ok(parts);
    }

    let coordinates = match geometry.get("coordinates") {
        Some(c) => c,
        None => return Err(invalid(format!("{} without coordinates", kind))),
    };

    let parts = match kind {
        "Point" => vec![Geometry::Point(position(coordinates)?)],
        "LineString" => vec![Geometry::LineString(positions(coordinates)?)],
        "Polygon" => vec![polygon(coordinates)?],
        "MultiPoint" => positions(coordinates)?
            .into_iter()
            .map(Geometry::Point)
            .collect(),
        "MultiLineString" => array(coordinates)?
            .iter()
            .map(|line| positions(line).map(Geometry::LineString))
            .collect::<Result<_>>()?,
        "MultiPolygon" => array(coordinates)?
            .iter()
            .map(polygon)
            .collect::<Result<_>>()?,
        other => {
            tracing::warn!(kind = other, "unsupported geometry type, keeping feature without geometry");
            vec![Geometry::Empty]
        }
    };
    Ok(parts)
}

fn polygon(value: &Value) -> Result<Geometry> {
    let mut rings = array(value)?
        .iter()
        .map(positions)
        .collect::<Result<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_default();
    Ok(Geometry::Polygon {
        exterior,
        interiors: rings.collect(),
    })
}

fn positions(value: &Value) -> Result<Vec<Coord>> {
    array(value)?.iter().map(position).collect()
}

/// Reads `[x, y]` or `[x, y, z]`; the third ordinate is dropped.
fn position(value: &Value) -> Result<Coord> {
    let ordinates = array(value)?;
    if ordinates.len() < 2 {
        return Err(invalid("position with fewer than two ordinates"));
    }
    let ordinate = |v: &Value| {
        v.as_f64()
            .ok_or_else(|| invalid(format!("non-numeric ordinate {}", v)))
    };
    Ok(Coord::new(ordinate(&ordinates[0])?, ordinate(&ordinates[1])?))
}

fn array(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("expected an array, found {}", value)))
}

fn type_of(object: &Map<String, Value>) -> Result<&str> {
    object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("object without a string \"type\" member"))
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidGeoJson(message.into())
}
