use std::collections::HashSet;

use msync_core::{ConfigMap, ConfigResolver, GlobalKey, Layer, Layers, merge};
use proptest::prelude::*;
use serde_json::Value as Json;

fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i64>().prop_map(Json::from),
        "[a-z]{0,6}".prop_map(Json::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Json::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_map() -> impl Strategy<Value = ConfigMap> {
    prop::collection::btree_map("[a-z]{1,4}", arb_json(), 0..5)
        .prop_map(|m| m.into_iter().collect())
}

fn arb_target() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]", 1..4).prop_map(|segments| segments.join("/"))
}

const GLOBAL: &str = ":global";

fn flag_layer(entries: Vec<(String, bool)>) -> Layer {
    entries
        .into_iter()
        .map(|(target, unmanaged)| {
            let mut config = ConfigMap::new();
            config.insert("unmanaged".into(), Json::Bool(unmanaged));
            (target, config)
        })
        .collect()
}

proptest! {
    #[test]
    fn merge_with_empty_mapping_is_identity(config in arb_map()) {
        prop_assert_eq!(merge(&config, &ConfigMap::new()), config.clone());
        prop_assert_eq!(merge(&ConfigMap::new(), &config), config);
    }

    #[test]
    fn merge_keeps_every_key(base in arb_map(), incoming in arb_map()) {
        let merged = merge(&base, &incoming);
        for key in base.keys().chain(incoming.keys()) {
            prop_assert!(merged.contains_key(key));
        }
        prop_assert!(merged.keys().all(|k| base.contains_key(k) || incoming.contains_key(k)));
    }

    #[test]
    fn incoming_scalars_win(base in arb_map(), key in "[a-z]{1,4}", value in any::<i64>()) {
        let mut incoming = ConfigMap::new();
        incoming.insert(key.clone(), Json::from(value));
        let merged = merge(&base, &incoming);
        prop_assert_eq!(&merged[&key], &Json::from(value));
    }

    #[test]
    fn partition_is_disjoint_and_covers_scan_and_configured_targets(
        defaults in prop::collection::vec((arb_target(), any::<bool>()), 0..6),
        module_configs in prop::collection::vec((arb_target(), any::<bool>()), 0..6),
        mut scan in prop::collection::vec(arb_target(), 0..8),
        global_flags in (any::<bool>(), any::<bool>()),
        global_in_scan in any::<bool>(),
    ) {
        let mut defaults = defaults;
        defaults.insert(0, (GLOBAL.to_string(), global_flags.0));
        let mut module_configs = module_configs;
        module_configs.push((GLOBAL.to_string(), global_flags.1));
        if global_in_scan {
            scan.push(GLOBAL.to_string());
        }

        // Expected universe: scanned names, then defaults targets, then module
        // config targets, first occurrence wins, reserved key dropped
        let mut expected: Vec<String> = Vec::new();
        for name in scan
            .iter()
            .chain(defaults.iter().map(|(name, _)| name))
            .chain(module_configs.iter().map(|(name, _)| name))
        {
            if name != GLOBAL && !expected.contains(name) {
                expected.push(name.clone());
            }
        }

        let layers = Layers {
            defaults: flag_layer(defaults),
            module_configs: flag_layer(module_configs),
            ..Layers::default()
        };
        let resolver = ConfigResolver::new(layers, GlobalKey::new(GLOBAL));

        let managed = resolver.managed_files(&scan);
        let unmanaged = resolver.unmanaged_files(&scan);

        prop_assert!(!managed.iter().chain(&unmanaged).any(|name| name == GLOBAL));

        let managed_set: HashSet<&String> = managed.iter().collect();
        let unmanaged_set: HashSet<&String> = unmanaged.iter().collect();
        prop_assert!(managed_set.is_disjoint(&unmanaged_set));

        let union: HashSet<&String> = managed_set.union(&unmanaged_set).copied().collect();
        let expected_set: HashSet<&String> = expected.iter().collect();
        prop_assert_eq!(union, expected_set);
        prop_assert_eq!(managed.len() + unmanaged.len(), expected.len());

        // Each side keeps the universe order
        let in_order = |side: &[String]| {
            let positions: Vec<usize> = side
                .iter()
                .filter_map(|name| expected.iter().position(|e| e == name))
                .collect();
            positions.windows(2).all(|pair| pair[0] < pair[1])
        };
        prop_assert!(in_order(&managed));
        prop_assert!(in_order(&unmanaged));

        for target in &managed {
            prop_assert!(resolver.is_managed(target));
        }
        for target in &unmanaged {
            prop_assert!(!resolver.is_managed(target));
        }
    }
}
