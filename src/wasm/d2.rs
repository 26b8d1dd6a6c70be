use crate::bounds::BoundingBox;
use crate::collection::NodeCollection;
use crate::wasm::{neighbours_to_js, node_map_to_js, pairs_to_flat, parse_flat_points};
use js_sys::Map;
use wasm_bindgen::prelude::*;

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox<2> {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

impl From<BoundingBox<2>> for BoundingBox2D {
    fn from(b: BoundingBox<2>) -> Self {
        Self { min_x: b.min[0], min_y: b.min[1], max_x: b.max[0], max_y: b.max[1] }
    }
}

// --- Node Collection ---

#[wasm_bindgen(js_name = NodeCollection2D)]
pub struct NodeCollection2D {
    inner: NodeCollection<2>,
}

#[wasm_bindgen(js_class = NodeCollection2D)]
impl NodeCollection2D {
    /// Builds a collection from a flat `[x, y, x, y, ...]` array.
    #[wasm_bindgen(constructor)]
    pub fn new(coords: &[f64], interaction_distance: f64) -> Result<NodeCollection2D, JsError> {
        let points = parse_flat_points::<2>(coords)?;
        let mut inner = NodeCollection::new();
        inner.construct_nodes_without_mesh(&points, interaction_distance)?;
        Ok(NodeCollection2D { inner })
    }
    pub fn add_node(&mut self, x: f64, y: f64) -> Result<usize, JsError> { Ok(self.inner.add_node([x, y])?) }
    pub fn delete_node(&mut self, index: usize) -> Result<(), JsError> { Ok(self.inner.delete_node(index)?) }
    pub fn set_node_location(&mut self, index: usize, x: f64, y: f64) -> Result<(), JsError> { Ok(self.inner.set_node_location(index, [x, y])?) }
    pub fn get_node_location(&self, index: usize) -> Result<Vec<f64>, JsError> { Ok(self.inner.node(index)?.location().to_vec()) }
    pub fn set_boundary_separation(&mut self, separation: f64) -> Result<(), JsError> { Ok(self.inner.set_minimum_node_domain_boundary_separation(separation)?) }
    pub fn update(&mut self) -> Result<usize, JsError> { Ok(self.inner.update_spatial_index()?) }
    pub fn remesh(&mut self) -> Result<Map, JsError> { Ok(node_map_to_js(&self.inner.remesh()?)) }
    pub fn node_pairs(&self) -> Result<Vec<u32>, JsError> { Ok(pairs_to_flat(&self.inner.calculate_node_pairs()?)) }
    pub fn node_neighbours(&self) -> Result<Map, JsError> { Ok(neighbours_to_js(&self.inner.calculate_node_pairs()?)) }
    #[wasm_bindgen(getter)]
    pub fn count_nodes(&self) -> usize { self.inner.num_nodes() }
    #[wasm_bindgen(getter)]
    pub fn interaction_distance(&self) -> f64 { self.inner.interaction_distance() }
    #[wasm_bindgen(getter)]
    pub fn node_indices(&self) -> Vec<u32> { self.inner.node_indices().into_iter().map(|i| i as u32).collect() }
    #[wasm_bindgen(getter)]
    pub fn domain_bounds(&self) -> Option<BoundingBox2D> { self.inner.domain_bounds().map(Into::into) }
}
