use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Dotted paths of every node in a dictionary, in traversal order.
pub type KeySet = IndexSet<String>;

// Flatten every key (internal nodes included) to a dot path. Arrays and scalars are leaves.
pub fn flatten_keys(obj: &Map<String, Value>, prefix: Option<&str>) -> KeySet {
    let mut keys = KeySet::new();
    for (k, val) in obj.iter() {
        let key = join_path(prefix, k);
        keys.insert(key.clone());
        if let Value::Object(child) = val {
            keys.extend(flatten_keys(child, Some(&key)));
        }
    }
    keys
}

pub(crate) fn join_path(prefix: Option<&str>, k: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{}.{}", p, k),
        _ => k.to_string(),
    }
}

/// Keys present in `source` but absent from `target`, sorted by code point.
pub fn missing_keys(source: &KeySet, target: &KeySet) -> Vec<String> {
    let mut out: Vec<String> = source.difference(target).cloned().collect();
    out.sort_unstable();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        }
    }

    fn sorted(keys: &KeySet) -> Vec<&str> {
        let mut v: Vec<&str> = keys.iter().map(String::as_str).collect();
        v.sort();
        v
    }

    #[test]
    fn empty_mapping_flattens_to_nothing() {
        assert!(flatten_keys(&Map::new(), None).is_empty());
    }

    #[test]
    fn internal_nodes_are_included() {
        let keys = flatten_keys(&obj(json!({"a": {"b": 1}})), None);
        assert_eq!(sorted(&keys), vec!["a", "a.b"]);
    }

    #[test]
    fn arrays_are_opaque_leaves() {
        let keys = flatten_keys(&obj(json!({"faq": [{"q": "x"}, "y"], "n": null})), None);
        assert_eq!(sorted(&keys), vec!["faq", "n"]);
    }

    #[test]
    fn prefix_is_prepended() {
        let keys = flatten_keys(&obj(json!({"home": "Home"})), Some("nav"));
        assert_eq!(sorted(&keys), vec!["nav.home"]);
        let keys = flatten_keys(&obj(json!({"home": "Home"})), Some(""));
        assert_eq!(sorted(&keys), vec!["home"]);
    }

    #[test]
    fn flattening_is_deterministic() {
        let tree = obj(json!({"x": {"y": {"z": true}}, "w": 1.5}));
        let a = flatten_keys(&tree, None);
        let b = flatten_keys(&tree, None);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }

    #[test]
    fn nav_settings_scenario() {
        let en = obj(json!({"nav": {"home": "Home", "settings": {"title": "Settings Page"}}}));
        let ja = obj(json!({"nav": {"home": "ホーム"}}));
        let missing = missing_keys(&flatten_keys(&en, None), &flatten_keys(&ja, None));
        assert_eq!(missing, vec!["nav.settings", "nav.settings.title"]);
    }

    #[test]
    fn difference_only_contains_source_keys_absent_from_target() {
        let a = flatten_keys(&obj(json!({"b": 1, "a": {"c": "x", "d": "y"}, "e": {}})), None);
        let b = flatten_keys(&obj(json!({"a": {"d": "y"}, "z": 0})), None);
        let missing = missing_keys(&a, &b);
        assert_eq!(missing, vec!["a.c", "b", "e"]);
        for key in &missing {
            assert!(a.contains(key));
            assert!(!b.contains(key));
        }
    }

    #[test]
    fn sort_is_by_code_point() {
        let a = flatten_keys(&obj(json!({"b": 1, "B": 1, "a_": 1, "a.": {"x": 1}})), None);
        let missing = missing_keys(&a, &KeySet::new());
        assert_eq!(missing, vec!["B", "a.", "a..x", "a_", "b"]);
    }
}
