//! Deep merge of fetched content over Default Records.

use crate::{ContentMap, ContentValue};

/// Resolve `fetched` against `default`, producing a complete record.
///
/// Behaviour:
/// - `None` (the store had no document) yields a copy of `default`.
/// - Maps merge recursively: keys only in `default` are kept, keys in
///   `fetched` are added or overlaid.
/// - A fetched map with no map partner in `default` is adopted as-is.
/// - Scalars, arrays and explicit nulls replace the default wholesale.
///   Arrays are never merged element by element.
///
/// `default` is only borrowed and `fetched` is moved into the result, so
/// neither caller-visible input can be changed through the returned value.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use studio_content::{ContentValue, merge};
///
/// let defaults = ContentValue::from(json!({"a": {"x": 1, "y": 2}, "tags": ["a", "b"]}));
/// let fetched = ContentValue::from(json!({"a": {"y": 9}, "tags": ["c"]}));
///
/// assert_eq!(
///     merge(&defaults, Some(fetched)),
///     ContentValue::from(json!({"a": {"x": 1, "y": 9}, "tags": ["c"]}))
/// );
/// assert_eq!(merge(&defaults, None), defaults);
/// ```
#[must_use]
pub fn merge(default: &ContentValue, fetched: Option<ContentValue>) -> ContentValue {
    let mut resolved = default.clone();
    if let Some(layer) = fetched {
        merge_value(&mut resolved, layer);
    }
    resolved
}

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Uses the same rules as [`merge`]: maps merge recursively, everything else
/// replaces `target`.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use studio_content::{ContentValue, merge_value};
///
/// let mut acc = ContentValue::from(json!({"a": 1, "b": {"x": 1}}));
/// merge_value(&mut acc, ContentValue::from(json!({"b": {"y": 2}, "c": 3})));
/// assert_eq!(acc, ContentValue::from(json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3})));
///
/// // Explicit null replaces the default.
/// merge_value(&mut acc, ContentValue::from(json!({"a": null})));
/// assert_eq!(acc.get("a"), Some(&ContentValue::Null));
/// ```
pub fn merge_value(target: &mut ContentValue, layer: ContentValue) {
    match layer {
        ContentValue::Map(map) => merge_map(target, map),
        ContentValue::Null
        | ContentValue::Bool(_)
        | ContentValue::Integer(_)
        | ContentValue::Double(_)
        | ContentValue::String(_)
        | ContentValue::Timestamp(_)
        | ContentValue::Array(_) => *target = layer,
    }
}

fn merge_map(target: &mut ContentValue, map: ContentMap) {
    let ContentValue::Map(target_map) = target else {
        *target = ContentValue::Map(map);
        return;
    };

    for (key, value) in map {
        match target_map.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target_map.insert(key, value);
            }
        }
    }
}
