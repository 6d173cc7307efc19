use serde_json::{Map, Value};

/// Deep union of `objects`, left to right.
///
/// Object values merge recursively; arrays, scalars and `null` replace
/// whatever was there. `None` inputs are skipped.
pub fn deep_merge<'a, I, O>(objects: I) -> Map<String, Value>
where
    I: IntoIterator<Item = O>,
    O: Into<Option<&'a Map<String, Value>>>,
{
    let mut result = Map::new();
    for object in objects {
        let object: Option<&Map<String, Value>> = object.into();
        if let Some(object) = object {
            merge_into(&mut result, object);
        }
    }
    result
}

fn merge_into(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        let Value::Object(child) = value else {
            target.insert(key.clone(), value.clone());
            continue;
        };

        let slot = target
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(slot) = slot {
            merge_into(slot, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_no_inputs_yield_empty_object() {
        let merged = deep_merge(Vec::<&Map<String, Value>>::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_nested_objects_merge_and_later_scalars_win() {
        let a = object(json!({ "nav": { "home": "Inicio", "blog": "Blog" }, "title": "A" }));
        let b = object(json!({ "nav": { "home": "Home", "about": "About" } }));

        let merged = deep_merge([&a, &b]);

        assert_eq!(
            Value::Object(merged),
            json!({
                "nav": { "home": "Home", "blog": "Blog", "about": "About" },
                "title": "A",
            })
        );
    }

    #[test]
    fn test_arrays_replace_instead_of_merging() {
        let a = object(json!({ "tags": ["a", "b", "c"] }));
        let b = object(json!({ "tags": ["z"] }));

        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({ "tags": ["z"] }));
    }

    #[test]
    fn test_missing_inputs_are_skipped() {
        let a = object(json!({ "x": 1 }));

        let merged = deep_merge([None, Some(&a), None]);

        assert_eq!(Value::Object(merged), json!({ "x": 1 }));
    }

    #[test]
    fn test_object_replaces_earlier_scalar() {
        let a = object(json!({ "x": "flat", "y": null }));
        let b = object(json!({ "x": { "nested": true }, "y": { "z": 0 } }));

        assert_eq!(
            Value::Object(deep_merge([&a, &b])),
            json!({ "x": { "nested": true }, "y": { "z": 0 } })
        );
    }

    #[test]
    fn test_null_overwrites() {
        let a = object(json!({ "x": { "y": 1 } }));
        let b = object(json!({ "x": null }));

        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({ "x": null }));
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let a = object(json!({ "x": { "y": 1 } }));
        let b = object(json!({ "x": { "z": 2 } }));

        let _ = deep_merge([&a, &b]);

        assert_eq!(Value::Object(a), json!({ "x": { "y": 1 } }));
    }
}
