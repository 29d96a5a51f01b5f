// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor detection from loosely structured feature properties.
//!
//! Indoor datasets spell the building level in many ways: `floor_name`,
//! `level`, a `min_level`/`max_level` range, a numeric `z`, keys such as
//! `storey` or `elevation`, or a bare ordinal like `"3rd"` under an
//! arbitrary key. Every hint is collected as a candidate label, in a fixed
//! order, with two short-circuits:
//!
//! 1. explicit keys `floor_name`, `level_name`, `level`, `floor`
//! 2. `min_level` + `max_level` present: return `"<min>-<max>"`
//! 3. numeric `z` present: return `B`, `G` or the truncated integer
//!    (booleans count as 1 and 0)
//! 4. keys containing `elevation`, `storey`, `story` or `z`
//! 5. any value that looks like an ordinal
//!
//! Candidates are deduplicated in discovery order. Several distinct labels
//! are a conflict: a warning is logged and the first one wins.

use std::cmp::Ordering;

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, terminated},
    IResult,
};

use crate::properties::{PropertyValue, Properties};

/// Label returned when no floor information exists.
pub const UNKNOWN_FLOOR: &str = "None";

/// Basement label.
pub const BASEMENT: &str = "B";

/// Ground floor label.
pub const GROUND: &str = "G";

const EXPLICIT_FLOOR_KEYS: [&str; 4] = ["floor_name", "level_name", "level", "floor"];
const FLOOR_KEY_HINTS: [&str; 4] = ["elevation", "storey", "story", "z"];

/// Parses `-?digits` followed by an optional `st|nd|rd|th` suffix and
/// returns the signed digit run.
fn ordinal(input: &str) -> IResult<&str, &str> {
    terminated(
        recognize(pair(opt(char('-')), digit1)),
        opt(alt((
            tag_no_case("st"),
            tag_no_case("nd"),
            tag_no_case("rd"),
            tag_no_case("th"),
        ))),
    )(input)
}

/// Matches the ordinal pattern against a whole string, surrounding
/// whitespace allowed. `"-2nd"` yields `"-2"`, `"10"` yields `"10"`.
pub fn parse_ordinal(text: &str) -> Option<&str> {
    all_consuming(ordinal)(text.trim())
        .ok()
        .map(|(_, digits)| digits)
}

/// Turns a raw floor value into a canonical token.
pub fn normalize_floor(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
        "b" | "basement" | "-1" => return BASEMENT.to_string(),
        "g" | "ground" | "0" => return GROUND.to_string(),
        _ => {}
    }
    if let Some(digits) = parse_ordinal(trimmed) {
        return digits.to_string();
    }
    if trimmed.is_empty() {
        UNKNOWN_FLOOR.to_string()
    } else {
        trimmed.to_string()
    }
}

fn normalize_value(value: &PropertyValue) -> String {
    normalize_floor(&value.to_string())
}

/// Outcome of floor detection.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorDetection {
    /// The chosen label.
    pub label: String,
    /// Distinct candidates in discovery order. Empty when a short-circuit
    /// rule decided the label.
    pub candidates: Vec<String>,
}

impl FloorDetection {
    fn decided(label: String) -> Self {
        Self {
            label,
            candidates: Vec::new(),
        }
    }

    /// More than one distinct candidate was found.
    pub fn is_conflict(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Runs the floor rules and returns the label together with the
/// candidates that led to it. Logs a warning on conflict.
pub fn detect_floor(props: &Properties) -> FloorDetection {
    tracing::debug!(?props, "detecting floor");
    let mut candidates: Vec<String> = Vec::new();

    for key in EXPLICIT_FLOOR_KEYS {
        if let Some(value) = props.get_present(key) {
            candidates.push(normalize_value(value));
        }
    }

    if let (Some(low), Some(high)) = (props.get_present("min_level"), props.get_present("max_level"))
    {
        return FloorDetection::decided(format!(
            "{}-{}",
            normalize_value(low),
            normalize_value(high)
        ));
    }

    if let Some(label) = props.get_present("z").and_then(elevation_label) {
        return FloorDetection::decided(label);
    }

    for (key, value) in props.iter() {
        if !value.is_present() {
            continue;
        }
        let key = key.to_lowercase();
        if FLOOR_KEY_HINTS.iter().any(|hint| key.contains(hint)) {
            candidates.push(normalize_value(value));
        }
    }

    for (_, value) in props.iter() {
        if !value.is_present() {
            continue;
        }
        if let Some(digits) = parse_ordinal(&value.to_string()) {
            candidates.push(digits.to_string());
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }

    let label = match unique.first() {
        None => {
            tracing::debug!("no floor information found");
            UNKNOWN_FLOOR.to_string()
        }
        Some(first) => {
            if unique.len() > 1 {
                tracing::warn!(
                    candidates = ?unique,
                    chosen = %first,
                    "Conflicting floor values {:?}; choosing {}",
                    unique,
                    first
                );
            }
            first.clone()
        }
    };

    FloorDetection {
        label,
        candidates: unique,
    }
}

/// Detects the floor label of a property bag.
pub fn detect_level(props: &Properties) -> String {
    detect_floor(props).label
}

/// Numeric `z`: below zero is the basement, zero the ground floor, above
/// zero the truncated integer. Non-numeric values do not decide.
fn elevation_label(z: &PropertyValue) -> Option<String> {
    let label = match z {
        PropertyValue::Int(i) => match i.cmp(&0) {
            Ordering::Less => BASEMENT.to_string(),
            Ordering::Equal => GROUND.to_string(),
            Ordering::Greater => i.to_string(),
        },
        PropertyValue::Bool(true) => "1".to_string(),
        PropertyValue::Bool(false) => GROUND.to_string(),
        PropertyValue::Float(f) if f.is_nan() => return None,
        PropertyValue::Float(f) => {
            if *f < 0.0 {
                BASEMENT.to_string()
            } else if *f == 0.0 {
                GROUND.to_string()
            } else {
                (f.trunc() as i64).to_string()
            }
        }
        _ => return None,
    };
    Some(label)
}

/// Display order of floor labels: basement, ground, numbered floors
/// ascending, then everything else (ranges, free text, `None`).
pub fn floor_sort_key(label: &str) -> (u8, u64, &str) {
    match label {
        BASEMENT => (0, 0, ""),
        GROUND => (1, 0, ""),
        _ if !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()) => {
            match label.parse::<u64>() {
                Ok(n) => (2, n, ""),
                Err(_) => (3, 0, label),
            }
        }
        _ => (3, 0, label),
    }
}
