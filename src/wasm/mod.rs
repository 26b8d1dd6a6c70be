//! JavaScript / TypeScript bindings for 2D and 3D node collections.

pub mod d2;
pub mod d3;

use crate::node_map::{NodeMap, NodeTranslation};
use crate::spatial_index::NodePairs;
use js_sys::{Array, Map};
use wasm_bindgen::prelude::*;

/// Splits a flat coordinate array `[x, y, (z), x, y, (z), ...]` into points.
pub fn parse_flat_points<const D: usize>(coords: &[f64]) -> Result<Vec<[f64; D]>, JsError> {
    if coords.len() % D != 0 {
        return Err(JsError::new(&format!("coordinate array length {} is not a multiple of {}", coords.len(), D)));
    }
    Ok(coords
        .chunks_exact(D)
        .map(|c| {
            let mut p = [0.0; D];
            p.copy_from_slice(c);
            p
        })
        .collect())
}

/// Flattens pairs to `[a0, b0, a1, b1, ...]`.
pub fn pairs_to_flat(pairs: &NodePairs) -> Vec<u32> {
    pairs.pairs.iter().flat_map(|&(a, b)| [a as u32, b as u32]).collect()
}

/// Adjacency as a JS `Map<number, number[]>`.
pub fn neighbours_to_js(pairs: &NodePairs) -> Map {
    let map = Map::new();
    for (&id, neighbours) in &pairs.neighbours {
        let arr = Array::new();
        for &n in neighbours {
            arr.push(&JsValue::from(n as u32));
        }
        map.set(&JsValue::from(id as u32), &arr);
    }
    map
}

/// Translation record as a JS `Map<number, number | null>`, `null` marking deleted nodes.
pub fn node_map_to_js(node_map: &NodeMap) -> Map {
    let map = Map::new();
    for (old, t) in node_map.iter() {
        let value = match t {
            NodeTranslation::Deleted => JsValue::NULL,
            NodeTranslation::NewIndex(new) => JsValue::from(new as u32),
        };
        map.set(&JsValue::from(old as u32), &value);
    }
    map
}
