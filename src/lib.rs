//! # nodegrid
//!
//! `nodegrid` manages large, changing collections of point particles ("nodes") for
//! particle and agent based simulations that run across cooperating processes. There
//! are no elements: only node locations and their proximity matter. It can be used
//! from Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Stable global ids**: every process draws ids from its own stream
//!   (`k * num_procs + rank`), so ids never collide without any communication.
//! - **Remeshing**: deleted nodes are compacted away and the survivors renumbered;
//!   a [`NodeMap`] tells holders of old ids where their nodes went.
//! - **Self-growing grid**: neighbor pairs are found through a uniform grid of boxes
//!   whose side is the interaction distance. The grid grows one box at a time on
//!   whichever side nodes drift towards, instead of being rebuilt every step.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`NodeCollection`] struct.
//!
//! ```
//! use nodegrid::NodeCollection;
//!
//! let mut mesh = NodeCollection::<2>::new();
//! mesh.construct_nodes_without_mesh(&[[0.0, 0.0], [0.0, 0.4], [5.0, 5.0]], 1.0).unwrap();
//! let pairs = mesh.calculate_node_pairs().unwrap();
//! assert!(pairs.contains(0, 1));
//! assert_eq!(pairs.len(), 1);
//! ```

pub mod algorithm;
mod allocator;
mod bounds;
mod collection;
mod config;
mod error;
mod index_map;
mod node;
mod node_map;
mod remesh;
mod snapshot;
mod spatial_index;
pub mod wasm;

pub use algorithm::SpatialAlgorithm;
pub use algorithm::box_grid::BoxGrid;
pub use algorithm::box_grid::MAX_GRID_BOXES;
pub use allocator::GlobalIndexAllocator;
pub use allocator::ProcessRank;
pub use bounds::BoundingBox;
pub use bounds::Sides;
pub use collection::NodeCollection;
pub use config::NodeGridConfig;
pub use error::NodeGridError;
pub use index_map::NodeIndexMap;
pub use node::Node;
pub use node::DEFAULT_NODE_RADIUS;
pub use node_map::NodeMap;
pub use node_map::NodeTranslation;
pub use snapshot::NodeCollectionSnapshot;
pub use snapshot::NodeRecord;
pub use spatial_index::NodePairs;
pub use spatial_index::SpatialIndex;
pub use spatial_index::DEFAULT_MAX_GROWTH_ITERATIONS;
