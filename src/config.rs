use crate::allocator::ProcessRank;
use crate::error::{self, NodeGridError};
use crate::node::DEFAULT_NODE_RADIUS;
use crate::spatial_index::DEFAULT_MAX_GROWTH_ITERATIONS;
use serde::{Deserialize, Serialize};

/// Settings of a node collection.
///
/// Deserializes with defaults for every missing field, so `{}` is a valid
/// configuration for a single process with unit interaction distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeGridConfig {
    /// Maximum separation at which two nodes are neighbors; also the box side.
    pub interaction_distance: f64,
    /// Minimum distance kept between any node and the grid boundary.
    /// Defaults to the interaction distance.
    pub boundary_separation: Option<f64>,
    /// Radius given to new nodes.
    pub default_radius: f64,
    /// Cap on growth iterations in a single refresh of the spatial index.
    pub max_growth_iterations: usize,
    pub process: ProcessRank,
}

impl Default for NodeGridConfig {
    fn default() -> Self {
        Self {
            interaction_distance: 1.0,
            boundary_separation: None,
            default_radius: DEFAULT_NODE_RADIUS,
            max_growth_iterations: DEFAULT_MAX_GROWTH_ITERATIONS,
            process: ProcessRank::single(),
        }
    }
}

impl NodeGridConfig {
    pub fn new(interaction_distance: f64) -> Self {
        Self {
            interaction_distance,
            ..Self::default()
        }
    }

    pub fn with_process(mut self, process: ProcessRank) -> Self {
        self.process = process;
        self
    }

    pub fn with_boundary_separation(mut self, separation: f64) -> Self {
        self.boundary_separation = Some(separation);
        self
    }

    pub fn boundary_separation(&self) -> f64 {
        self.boundary_separation.unwrap_or(self.interaction_distance)
    }

    pub fn validate(&self) -> Result<(), NodeGridError> {
        error::check_interaction_distance(self.interaction_distance)?;
        error::check_boundary_separation(self.boundary_separation())?;
        error::check_radius(self.default_radius)?;
        error::check_growth_limit(self.max_growth_iterations)?;
        self.process.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeGridConfig::default();
        assert_eq!(config.interaction_distance, 1.0);
        assert_eq!(config.boundary_separation(), 1.0);
        assert_eq!(config.default_radius, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_separation_follows_distance() {
        let config = NodeGridConfig::new(2.5);
        assert_eq!(config.boundary_separation(), 2.5);
        let config = config.with_boundary_separation(0.0);
        assert_eq!(config.boundary_separation(), 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid() {
        assert!(NodeGridConfig::new(0.0).validate().is_err());
        assert!(NodeGridConfig::new(1.0).with_boundary_separation(-1.0).validate().is_err());
        let config = NodeGridConfig { max_growth_iterations: 0, ..NodeGridConfig::default() };
        assert_eq!(config.validate(), Err(NodeGridError::InvalidGrowthLimit { value: 0 }));
        let mut config = NodeGridConfig::default();
        config.process = ProcessRank { num_procs: 2, rank: 5 };
        assert_eq!(
            config.validate(),
            Err(NodeGridError::InvalidProcessRank { rank: 5, num_procs: 2 })
        );
    }
}
