pub mod error;
pub mod heap;
pub mod place;
pub mod quadtree;
pub mod services;
pub mod store;

pub use common::shapes::{Boundary, Point};
pub use error::{QuadtreeError, QuadtreeResult};
pub use heap::BoundedTopK;
pub use place::PlaceRecord;
pub use quadtree::{Config, QuadTree, RelocationRequest};
pub use services::{ServiceCatalog, ServiceId, ServiceMask};
pub use store::{AppendBuffer, BucketSet, PlaceMatch, PlaceStore};
