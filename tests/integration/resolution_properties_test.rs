//! Property-based tests for resolution and JSON mutation.

use fixture_params::payload::{apply, MutationSpec, Operation, Payload};
use fixture_params::placeholder::contains_marker;
use fixture_params::{Registry, Resolver};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

fn resolver_with(props: HashMap<String, String>, registry: Registry) -> Resolver {
    Resolver::new()
        .with_properties(props)
        .with_registry(registry)
        .with_max_substitutions(1000)
}

proptest! {
    #[test]
    fn text_without_markers_is_unchanged(text in "[a-zA-Z0-9 ${}!@.=&_-]{0,64}") {
        prop_assume!(!contains_marker(&text));
        let resolver = resolver_with(HashMap::new(), Registry::new());
        prop_assert_eq!(resolver.resolve(&text).unwrap(), text);
    }

    #[test]
    fn resolved_text_has_no_markers(
        name in "[A-Z]{1,8}",
        value in "[a-z0-9]{0,8}",
        key in "[a-z]{1,8}",
        stored in "[a-z0-9]{0,8}",
        prefix in "[a-z ]{0,8}",
    ) {
        let mut props = HashMap::new();
        props.insert(name.clone(), value.clone());
        let registry = Registry::new();
        registry.set(key.clone(), stored.clone());

        let resolver = resolver_with(props, registry);
        let text = format!("{}${{{}}}/!{{{}}}", prefix, name, key);
        let resolved = resolver.resolve(&text).unwrap();

        prop_assert!(!contains_marker(&resolved));
        prop_assert_eq!(resolved, format!("{}{}/{}", prefix, value, stored));
    }

    #[test]
    fn chained_registry_values_reach_fixed_point(depth in 1usize..8) {
        let registry = Registry::new();
        for i in 0..depth {
            registry.set(format!("k{}", i), format!("!{{k{}}}", i + 1));
        }
        registry.set(format!("k{}", depth), "end");

        let resolver = resolver_with(HashMap::new(), registry);
        prop_assert_eq!(resolver.resolve("!{k0}").unwrap(), "end");
    }

    #[test]
    fn json_mutation_preserves_siblings(
        siblings in proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..6),
        suffix in "[a-z]{1,6}",
    ) {
        let mut map = Map::new();
        for (k, v) in &siblings {
            map.insert(format!("s_{}", k), Value::String(v.clone()));
        }
        map.insert("target".to_string(), json!("value"));
        let payload = Payload::Json(Value::Object(map.clone()));

        let specs = [
            MutationSpec::new("target", Operation::Append, suffix.clone()),
            MutationSpec::new("added", Operation::Add, "1"),
            MutationSpec::new("added", Operation::Delete, ""),
        ];
        let result = apply(&payload, &specs).unwrap();
        let object = result.as_json().and_then(Value::as_object).unwrap();

        for (k, v) in map.iter().filter(|(k, _)| k.as_str() != "target") {
            prop_assert_eq!(object.get(k), Some(v));
        }
        prop_assert_eq!(object.len(), map.len());
        prop_assert_eq!(&object["target"], &json!(format!("value{}", suffix)));
    }
}
