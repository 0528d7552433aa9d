//! Point quadtree over a fixed integer extent.
//!
//! Leaves hold places in a [`PlaceStore`] until they reach the node capacity,
//! then split once into four quadrants and hand their places down. Nodes never
//! merge back; deletions may leave empty subtrees behind.
//!
//! ```text
//!            vmid
//!        +-----+------+
//!        |  1  |  0   |   y <  hmid
//!  hmid  +-----+------+
//!        |  2  |  3   |   y >= hmid
//!        +-----+------+
//!         x <  x >= vmid
//! ```
//!
//! `vmid = x + width / 2` and `hmid = y + height / 2`, truncated. A point on
//! a midpoint belongs to the high side of that axis. With an odd width or
//! height the low side gets `floor(dim / 2)` and the high side one more.

mod api;
mod config;
mod node;
mod query_nearest;
mod query_range;

pub use config::{Config, RelocationRequest};
pub use node::{NodeState, QuadNode};

use crate::store::{BucketSet, PlaceStore};

pub struct QuadTree<S: PlaceStore = BucketSet> {
    root: QuadNode<S>,
    config: Config,
    len: usize,
}
