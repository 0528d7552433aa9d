use common::shapes::Boundary;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuadtreeError {
    #[error("position ({x}, {y}) is outside the quadtree bounds {bounds}")]
    OutOfBounds { x: i32, y: i32, bounds: Boundary },

    #[error("service id {id} is outside the catalog (catalog size: {catalog_size})")]
    InvalidServiceId { id: usize, catalog_size: usize },

    #[error("service mask {mask:#x} sets bits outside the catalog (catalog size: {catalog_size})")]
    MaskOutsideCatalog { mask: u64, catalog_size: usize },

    #[error("service catalog lists {len} services but at most {max} are supported")]
    CatalogTooLarge { len: usize, max: usize },

    #[error("service catalog lists {name:?} more than once")]
    DuplicateServiceName { name: String },

    #[error("service catalog entries must have a non-empty name")]
    EmptyServiceName,

    #[error("node capacity must be at least 1 (capacity: {capacity})")]
    InvalidCapacity { capacity: usize },

    #[error("quadtree bounds {bounds} extend past the 32-bit coordinate range")]
    InvalidBounds { bounds: Boundary },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
