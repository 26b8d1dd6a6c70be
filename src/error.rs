use thiserror::Error;

/// Errors raised by node collections and their spatial index.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NodeGridError {
    /// The global id is not present in this process's index map.
    #[error("Requested node {index} does not belong to process {rank}")]
    NotOwned {
        /// Global node id that was looked up.
        index: usize,
        /// Rank of the process that performed the lookup.
        rank: usize,
    },
    /// A delete was requested on a node already marked as deleted.
    #[error("Trying to delete a deleted node {index}")]
    AlreadyDeleted {
        index: usize,
    },
    /// Interaction distances must be positive and finite.
    #[error("Invalid interaction distance {value}: must satisfy 0 < distance < inf")]
    InvalidInteractionDistance {
        value: f64,
    },
    #[error("Invalid boundary separation {value}: must be non-negative and finite")]
    InvalidBoundarySeparation {
        value: f64,
    },
    #[error("Invalid node radius {value}: must be positive and finite")]
    InvalidRadius {
        value: f64,
    },
    #[error("Invalid process rank {rank} for {num_procs} processes")]
    InvalidProcessRank {
        rank: usize,
        num_procs: usize,
    },
    /// Node coordinates must be finite for the grid to contain them.
    #[error("Non-finite node coordinate {value} on axis {axis}")]
    NonFinitePosition {
        axis: usize,
        value: f64,
    },
    /// A refresh needs at least one growth step to cover a fresh grid.
    #[error("Invalid growth limit {value}: must be at least 1")]
    InvalidGrowthLimit {
        value: usize,
    },
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot {
        reason: String,
    },
    /// Neighbor queries need a built spatial index.
    #[error("Spatial index has not been set up")]
    SpatialIndexMissing,
    /// Neighbor queries need an index refreshed after the last change to the nodes.
    #[error("Spatial index is out of date; update it before querying neighbors")]
    SpatialIndexStale,
    /// The boundary-growth loop did not converge within its iteration limit.
    #[error("Domain growth did not converge after {iterations} iterations (limit {limit})")]
    DomainGrowthExceeded {
        iterations: usize,
        limit: usize,
    },
    /// The grid covering the nodes would need more boxes than can be allocated.
    #[error("Spatial grid would need more than {limit} boxes")]
    GridTooLarge {
        limit: usize,
    },
}

/// Checks `0 < distance < inf`.
pub(crate) fn check_interaction_distance(value: f64) -> Result<(), NodeGridError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(NodeGridError::InvalidInteractionDistance { value })
    }
}

pub(crate) fn check_boundary_separation(value: f64) -> Result<(), NodeGridError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(NodeGridError::InvalidBoundarySeparation { value })
    }
}

pub(crate) fn check_radius(value: f64) -> Result<(), NodeGridError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(NodeGridError::InvalidRadius { value })
    }
}

pub(crate) fn check_growth_limit(value: usize) -> Result<(), NodeGridError> {
    if value > 0 {
        Ok(())
    } else {
        Err(NodeGridError::InvalidGrowthLimit { value })
    }
}

pub(crate) fn check_position<const D: usize>(location: &[f64; D]) -> Result<(), NodeGridError> {
    match location.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((axis, &value)) => Err(NodeGridError::NonFinitePosition { axis, value }),
        None => Ok(()),
    }
}
