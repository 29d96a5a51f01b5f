// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Back-fills canonical property keys (floor, name, feature) on cell spaces.

use crate::cell_space::CellSpace;
use crate::floor::detect_level;
use crate::properties::{PropertyValue, Properties};

/// Keys that receive the detected floor label when missing.
pub const FLOOR_KEYS: [&str; 6] = [
    "floor_name",
    "level_name",
    "floor_level",
    "flevel",
    "floor",
    "level",
];

/// Sources for `name`, in priority order.
const NAME_SOURCES: [&str; 3] = ["label", "room_id", "ref"];

/// Sources for `feature`, in priority order.
const FEATURE_SOURCES: [&str; 3] = ["space_use", "type", "function"];

const CORRIDOR_FLAGS: [&str; 3] = ["yes", "true", "1"];

/// Normalizes the properties of every cell space in place.
///
/// Only missing values are filled, so a second call changes nothing.
pub fn attach_semantics(cell_spaces: &mut [CellSpace]) {
    for cell in cell_spaces.iter_mut() {
        let props = cell.properties_mut();
        backfill_floor(props);
        backfill_name(props);
        backfill_feature(props);
    }
}

fn backfill_floor(props: &mut Properties) {
    let level = detect_level(props);
    for key in FLOOR_KEYS {
        if props.get_present(key).is_none() {
            props.insert(key, level.as_str());
        }
    }
}

fn backfill_name(props: &mut Properties) {
    if props.get_truthy("name").is_some() {
        return;
    }
    let source = NAME_SOURCES
        .iter()
        .find_map(|key| props.get_truthy(key))
        .cloned();
    if let Some(value) = source {
        props.insert("name", value);
    }
}

fn backfill_feature(props: &mut Properties) {
    if props.get_present("feature").is_some() {
        return;
    }
    let source = FEATURE_SOURCES
        .iter()
        .find_map(|key| props.get_truthy(key))
        .cloned();
    if let Some(value) = source {
        props.insert("feature", value);
    } else if is_corridor_flag(props.get("corridor")) {
        props.insert("feature", "corridor");
    }
}

fn is_corridor_flag(value: Option<&PropertyValue>) -> bool {
    let text = value.map_or_else(|| "none".to_string(), |v| v.to_string().to_lowercase());
    CORRIDOR_FLAGS.contains(&text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use proptest::prelude::*;

    fn cell(pairs: &[(&str, PropertyValue)]) -> CellSpace {
        CellSpace::new("x", Geometry::Empty, pairs.iter().cloned().collect())
    }

    #[test]
    fn floor_keys_backfilled_with_detected_level() {
        let mut cells = vec![cell(&[
            ("floor_name", PropertyValue::Null),
            ("level", PropertyValue::Null),
            ("storey", "2nd".into()),
        ])];
        attach_semantics(&mut cells);

        let props = cells[0].properties();
        for key in FLOOR_KEYS {
            assert_eq!(props.get(key), Some(&PropertyValue::from("2")), "key {}", key);
        }
        // Null keys are replaced where they stand
        assert_eq!(props.keys().next(), Some("floor_name"));
    }

    #[test]
    fn existing_floor_values_left_alone() {
        let mut cells = vec![cell(&[("floor", "3rd".into()), ("level", PropertyValue::Int(5))])];
        attach_semantics(&mut cells);

        let props = cells[0].properties();
        assert_eq!(props.get("floor"), Some(&PropertyValue::from("3rd")));
        assert_eq!(props.get("level"), Some(&PropertyValue::Int(5)));
        // conflict resolves to the first candidate
        assert_eq!(props.get("floor_name"), Some(&PropertyValue::from("5")));
    }

    #[test]
    fn unknown_floor_backfills_none_label() {
        let mut cells = vec![cell(&[("foo", "bar".into())])];
        attach_semantics(&mut cells);
        assert_eq!(cells[0].properties().get("flevel"), Some(&PropertyValue::from("None")));
    }

    #[test]
    fn name_priority() {
        let mut cells = vec![
            cell(&[("label", "Lobby".into()), ("room_id", "R1".into())]),
            cell(&[("name", "".into()), ("room_id", "R2".into()), ("ref", "X".into())]),
            cell(&[("ref", "R3".into())]),
            cell(&[("name", "Kept".into()), ("label", "Ignored".into())]),
            cell(&[("label", "".into())]),
        ];
        attach_semantics(&mut cells);

        let name = |i: usize| cells[i].properties().get("name").cloned();
        assert_eq!(name(0), Some("Lobby".into()));
        assert_eq!(name(1), Some("R2".into()));
        assert_eq!(name(2), Some("R3".into()));
        assert_eq!(name(3), Some("Kept".into()));
        assert_eq!(name(4), None);
    }

    #[test]
    fn feature_priority() {
        let mut cells = vec![
            cell(&[("space_use", "office".into()), ("type", "room".into())]),
            cell(&[("type", "door".into()), ("function", "entry".into())]),
            cell(&[("function", "stairs".into())]),
            cell(&[("corridor", "Yes".into())]),
            cell(&[("corridor", PropertyValue::Bool(true))]),
            cell(&[("corridor", "no".into())]),
            cell(&[("feature", "elevator".into()), ("type", "room".into())]),
        ];
        attach_semantics(&mut cells);

        let feature = |i: usize| cells[i].properties().get("feature").cloned();
        assert_eq!(feature(0), Some("office".into()));
        assert_eq!(feature(1), Some("door".into()));
        assert_eq!(feature(2), Some("stairs".into()));
        assert_eq!(feature(3), Some("corridor".into()));
        assert_eq!(feature(4), Some("corridor".into()));
        assert_eq!(feature(5), None);
        assert_eq!(feature(6), Some("elevator".into()));
    }

    #[test]
    fn attach_semantics_is_idempotent() {
        let mut cells = vec![
            cell(&[("floor_name", "1st".into()), ("level", "2nd".into())]),
            cell(&[("z", PropertyValue::Float(-3.0)), ("label", "Garage".into())]),
            cell(&[("elevation", PropertyValue::Null), ("corridor", "1".into())]),
            cell(&[("min_level", PropertyValue::Int(1)), ("max_level", "3rd".into())]),
            cell(&[]),
        ];
        attach_semantics(&mut cells);
        let once = cells.clone();
        attach_semantics(&mut cells);
        assert_eq!(cells, once);
    }

    const BAG_KEYS: [&str; 16] = [
        "floor_name",
        "level",
        "floor",
        "min_level",
        "max_level",
        "z",
        "storey",
        "name",
        "label",
        "room_id",
        "ref",
        "feature",
        "space_use",
        "type",
        "corridor",
        "zone",
    ];

    fn arb_value() -> impl Strategy<Value = PropertyValue> {
        prop_oneof![
            Just(PropertyValue::Null),
            any::<bool>().prop_map(PropertyValue::Bool),
            (-3i64..12).prop_map(PropertyValue::Int),
            (-3.0f64..12.0).prop_map(PropertyValue::Float),
            prop::sample::select(vec!["", "1st", "2nd", "G", "basement", "yes", "office", "Lobby"])
                .prop_map(PropertyValue::from),
        ]
    }

    fn arb_bag() -> impl Strategy<Value = Vec<(&'static str, PropertyValue)>> {
        prop::collection::vec((prop::sample::select(BAG_KEYS.to_vec()), arb_value()), 0..8)
    }

    proptest! {
        #[test]
        fn second_pass_changes_nothing(pairs in arb_bag()) {
            let mut cells = vec![cell(&pairs)];
            attach_semantics(&mut cells);
            let once = cells.clone();
            attach_semantics(&mut cells);
            prop_assert_eq!(cells, once);
        }

        #[test]
        fn every_floor_key_is_filled(pairs in arb_bag()) {
            let mut cells = vec![cell(&pairs)];
            attach_semantics(&mut cells);
            for key in FLOOR_KEYS {
                prop_assert!(cells[0].properties().get_present(key).is_some());
            }
        }
    }
}
