// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature-type classification used for colour coding.

use indoorgml_lite_core::{Properties, PropertyValue};

/// Display category of a cell space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    Room,
    Corridor,
    Door,
    Stairs,
    Elevator,
}

impl FeatureType {
    /// Legend order.
    pub const ALL: [FeatureType; 5] = [
        FeatureType::Room,
        FeatureType::Corridor,
        FeatureType::Door,
        FeatureType::Stairs,
        FeatureType::Elevator,
    ];

    /// Keyword search order; the first category with a hit wins.
    const KEYWORDS: [(FeatureType, &'static [&'static str]); 4] = [
        (FeatureType::Door, &["door", "entrance", "exit"]),
        (FeatureType::Corridor, &["corridor", "hallway", "passage"]),
        (FeatureType::Stairs, &["stair", "steps"]),
        (FeatureType::Elevator, &["elevator", "lift"]),
    ];

    /// Classifies from the `feature` key, falling back to a keyword search
    /// over every present value. Anything unmatched is a room.
    pub fn classify(properties: &Properties) -> Self {
        if let Some(feature) = properties.get_truthy("feature") {
            if let Some(kind) = Self::from_name(&feature.to_string().to_lowercase()) {
                if kind != FeatureType::Room {
                    return kind;
                }
            }
        }

        let texts: Vec<String> = properties
            .iter()
            .filter(|(_, v)| !matches!(v, PropertyValue::Null))
            .map(|(_, v)| v.to_string().to_lowercase())
            .collect();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| {
                texts
                    .iter()
                    .any(|text| words.iter().any(|w| text.contains(w)))
            })
            .map_or(FeatureType::Room, |(kind, _)| *kind)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "room" => Some(FeatureType::Room),
            "corridor" => Some(FeatureType::Corridor),
            "door" => Some(FeatureType::Door),
            "stairs" => Some(FeatureType::Stairs),
            "elevator" => Some(FeatureType::Elevator),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FeatureType::Room => "room",
            FeatureType::Corridor => "corridor",
            FeatureType::Door => "door",
            FeatureType::Stairs => "stairs",
            FeatureType::Elevator => "elevator",
        }
    }

    /// RGB fill colour.
    pub fn colour(self) -> [u8; 3] {
        match self {
            FeatureType::Room => [0x42, 0x87, 0xf5],
            FeatureType::Corridor => [0x42, 0xf5, 0xa1],
            FeatureType::Door => [0xf5, 0xa1, 0x42],
            FeatureType::Stairs => [0xf5, 0x42, 0xf2],
            FeatureType::Elevator => [0xf5, 0x42, 0x42],
        }
    }
}
