use crate::bounds::BoundingBox;
use crate::collection::NodeCollection;
use crate::wasm::{neighbours_to_js, node_map_to_js, pairs_to_flat, parse_flat_points};
use js_sys::Map;
use wasm_bindgen::prelude::*;

// --- Bounding Box ---

/// Represents an axis-aligned bounding box in 3D space.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> BoundingBox3D {
        BoundingBox3D {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }
}

impl From<BoundingBox3D> for BoundingBox<3> {
    fn from(b: BoundingBox3D) -> Self {
        Self {
            min: [b.min_x, b.min_y, b.min_z],
            max: [b.max_x, b.max_y, b.max_z],
        }
    }
}

impl From<BoundingBox<3>> for BoundingBox3D {
    fn from(b: BoundingBox<3>) -> Self {
        Self::new(b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2])
    }
}

// --- Node Collection ---

/// WASM wrapper for a 3D node collection.
#[wasm_bindgen(js_name = NodeCollection3D)]
pub struct NodeCollection3D {
    inner: NodeCollection<3>,
}

#[wasm_bindgen(js_class = NodeCollection3D)]
impl NodeCollection3D {
    /// Builds a collection from a flat `[x, y, z, x, y, z, ...]` array.
    ///
    /// # Arguments
    ///
    /// * `coords` - Node locations.
    /// * `interaction_distance` - Neighbor cut-off, also the side of the grid boxes.
    #[wasm_bindgen(constructor)]
    pub fn new(coords: &[f64], interaction_distance: f64) -> Result<NodeCollection3D, JsError> {
        let points = parse_flat_points::<3>(coords)?;
        let mut inner = NodeCollection::new();
        inner.construct_nodes_without_mesh(&points, interaction_distance)?;
        Ok(NodeCollection3D { inner })
    }

    /// Adds a node and returns its global id. It joins the grid at the next `update`.
    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> Result<usize, JsError> {
        Ok(self.inner.add_node([x, y, z])?)
    }

    pub fn delete_node(&mut self, index: usize) -> Result<(), JsError> {
        Ok(self.inner.delete_node(index)?)
    }

    pub fn set_node_location(&mut self, index: usize, x: f64, y: f64, z: f64) -> Result<(), JsError> {
        Ok(self.inner.set_node_location(index, [x, y, z])?)
    }

    pub fn get_node_location(&self, index: usize) -> Result<Vec<f64>, JsError> {
        Ok(self.inner.node(index)?.location().to_vec())
    }

    pub fn set_boundary_separation(&mut self, separation: f64) -> Result<(), JsError> {
        Ok(self.inner.set_minimum_node_domain_boundary_separation(separation)?)
    }

    /// Refreshes the grid after nodes moved; returns the number of growth steps.
    pub fn update(&mut self) -> Result<usize, JsError> {
        Ok(self.inner.update_spatial_index()?)
    }

    /// Drops deleted nodes and renumbers the rest.
    ///
    /// Returns a `Map` from old id to new id, with `null` for deleted nodes.
    pub fn remesh(&mut self) -> Result<Map, JsError> {
        Ok(node_map_to_js(&self.inner.remesh()?))
    }

    /// Neighbor pairs as a flat `[a0, b0, a1, b1, ...]` array.
    pub fn node_pairs(&self) -> Result<Vec<u32>, JsError> {
        Ok(pairs_to_flat(&self.inner.calculate_node_pairs()?))
    }

    pub fn node_neighbours(&self) -> Result<Map, JsError> {
        Ok(neighbours_to_js(&self.inner.calculate_node_pairs()?))
    }

    #[wasm_bindgen(getter)]
    pub fn count_nodes(&self) -> usize {
        self.inner.num_nodes()
    }

    #[wasm_bindgen(getter)]
    pub fn interaction_distance(&self) -> f64 {
        self.inner.interaction_distance()
    }

    #[wasm_bindgen(getter)]
    pub fn node_indices(&self) -> Vec<u32> {
        self.inner.node_indices().into_iter().map(|i| i as u32).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn domain_bounds(&self) -> Option<BoundingBox3D> {
        self.inner.domain_bounds().map(Into::into)
    }
}
