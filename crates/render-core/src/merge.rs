//! Deep merge of layered configuration documents
//!
//! The merge walks arbitrary parsed trees rather than typed structs: matching
//! mappings are merged key by key, everything else is replaced wholesale by
//! the later layer. Swapping layer order changes the result whenever two
//! layers set the same field; identical inputs in identical order always
//! serialize byte-identically.

use serde_yaml::Value;

use crate::layers::Layer;
use crate::{Error, Result};

/// Merge configuration layers in order into a single document.
///
/// Each layer is parsed as YAML; the first parse failure aborts the whole
/// merge with [`Error::DocumentParse`] naming the offending layer. The first
/// document seeds the accumulator and every following document merges on
/// top. A document that parses to a top-level null (an empty or comment-only
/// file) contributes nothing.
pub fn merge_layers(layers: &[Layer]) -> Result<Value> {
    let mut merged = Value::Null;

    for layer in layers {
        let doc: Value =
            serde_yaml::from_slice(layer.content()).map_err(|e| Error::DocumentParse {
                layer: layer.name().to_string(),
                message: e.to_string(),
            })?;
        if doc.is_null() {
            tracing::debug!(layer = layer.name(), "Empty config layer, nothing to merge");
            continue;
        }
        if merged.is_null() {
            merged = doc;
        } else {
            deep_merge(&mut merged, doc);
        }
    }

    Ok(merged)
}

/// Deep merge `overlay` into `base`.
///
/// Two mappings merge key by key: keys present in both recurse, keys present
/// in only one side are kept. An explicit null value in the overlay removes
/// the key from the base mapping. Any other pairing replaces the base value
/// wholesale; sequences are never concatenated.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    base_map.remove(&key);
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Serialize a merged document to canonical YAML text.
pub fn to_yaml(doc: &Value) -> Result<Vec<u8>> {
    let text = serde_yaml::to_string(doc).map_err(|e| Error::Serialize {
        message: e.to_string(),
    })?;
    Ok(text.into_bytes())
}
