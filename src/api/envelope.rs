use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys list endpoints have been seen to nest their array under.
const LIST_KEYS: [&str; 3] = ["results", "data", "items"];

/// Flattens the list envelopes the backend returns into one vector.
///
/// Accepts a bare array or an object carrying the array under one of
/// [`LIST_KEYS`]. Anything else yields an empty list, and elements that do not
/// deserialize are dropped.
pub fn normalize_list<T: DeserializeOwned>(body: Value) -> Vec<T> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match envelope_key(&map).and_then(|key| map.remove(key)) {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Unexpected list envelope with keys {:?}", map.keys().collect::<Vec<_>>());
                return Vec::new();
            }
        },
        other => {
            warn!("Unexpected list envelope: {other}");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Skipping malformed list item: {e}");
                None
            }
        })
        .collect()
}

/// The first of [`LIST_KEYS`] that holds an array.
fn envelope_key(map: &Map<String, Value>) -> Option<&'static str> {
    LIST_KEYS
        .iter()
        .copied()
        .find(|key| matches!(map.get(*key), Some(Value::Array(_))))
}
