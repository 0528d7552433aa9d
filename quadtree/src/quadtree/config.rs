use crate::services::ServiceCatalog;
use common::shapes::Point;

#[derive(Debug, Clone)]
pub struct Config {
    /// Records a leaf holds before it splits.
    pub node_capacity: usize,
    /// Leaves at this level never split and grow past `node_capacity`.
    pub max_depth: usize,
    pub catalog: ServiceCatalog,
}

impl Config {
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            node_capacity,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_capacity: 16,
            // Deep enough to reach single cells on extents up to 2^24 wide.
            max_depth: 24,
            catalog: ServiceCatalog::standard(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationRequest {
    pub from: Point,
    pub to: Point,
}
