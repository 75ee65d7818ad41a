//! # Deep Dictionary Merge
//!
//! This module provides the recursive merge that folds one configuration
//! mapping into another. It is the smallest building block of configuration
//! resolution: the inheritance resolver decides *which* mappings to merge and
//! in *what order*, while this module only knows how to merge two of them.
//!
//! ## Semantics
//!
//! - If a key exists on both sides and both values are objects, the values
//!   are merged recursively.
//! - Otherwise the overlay value replaces the base value outright, including
//!   replacing an object with a scalar or vice versa.
//! - No key is ever deleted.
//!
//! The merge is infallible and handles arbitrary nesting depth.

use serde_json::{Map, Value};

/// Merge `overlay` into `base` in place.
///
/// Keys whose values are objects on both sides are merged recursively; every
/// other key is replaced with a clone of the overlay value. Keys present only
/// in `base` are left untouched.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        if let Some(existing) = base.get_mut(key) {
            match (existing, value) {
                (Value::Object(base_child), Value::Object(overlay_child)) => {
                    deep_merge(base_child, overlay_child);
                }
                (existing, value) => *existing = value.clone(),
            }
        } else {
            base.insert(key.clone(), value.clone());
        }
    }
}
