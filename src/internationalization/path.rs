use serde_json::Value;

/// Walks `value` along the `.`-separated segments of `path`.
///
/// Objects are indexed by key and arrays by decimal position. Returns `None`
/// as soon as a segment is missing or the current value is a leaf.
pub fn get_by_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => array_index(segment).and_then(|index| items.get(index)),
            _ => None,
        })
}

fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_walks_nested_objects() {
        let value = json!({ "a": { "b": { "c": 1 } } });
        assert_eq!(get_by_path(&value, "a.b.c"), Some(&json!(1)));
        assert_eq!(get_by_path(&value, "a.b"), Some(&json!({ "c": 1 })));
    }

    #[test]
    fn test_missing_segments_return_none() {
        assert_eq!(get_by_path(&json!({}), "a.b"), None);
        assert_eq!(get_by_path(&json!({ "a": { "b": 1 } }), "a.x"), None);
        assert_eq!(get_by_path(&json!({ "a": "text" }), "a.length"), None);
        assert_eq!(get_by_path(&json!({ "a": 1 }), ""), None);
    }

    #[test]
    fn test_indexes_arrays() {
        let value = json!({ "menu": [{ "label": "Home" }, { "label": "Blog" }] });
        assert_eq!(get_by_path(&value, "menu.1.label"), Some(&json!("Blog")));
        assert_eq!(get_by_path(&value, "menu.2.label"), None);
        assert_eq!(get_by_path(&value, "menu.01.label"), None);
        assert_eq!(get_by_path(&value, "menu.+1.label"), None);
    }

    #[test]
    fn test_present_null_is_a_value() {
        let value = json!({ "a": null });
        assert_eq!(get_by_path(&value, "a"), Some(&Value::Null));
        assert_eq!(get_by_path(&value, "a.b"), None);
    }
}
