//! Leaf-level storage.
//!
//! A leaf owns one [`PlaceStore`] until it splits. Both realizations identify
//! a record by position (see [`PlaceRecord`]); they differ in whether a second
//! record at an occupied position is accepted.

mod append_buffer;
mod bucket_set;

pub use append_buffer::AppendBuffer;
pub use bucket_set::BucketSet;

use crate::place::PlaceRecord;
use crate::services::ServiceMask;
use common::shapes::Point;

/// Selects records for lookup, edit and removal: same position and, when
/// `services` is set, exactly that mask.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlaceMatch {
    pub position: Point,
    pub services: Option<ServiceMask>,
}

impl PlaceMatch {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            services: None,
        }
    }

    pub fn exact(position: Point, services: ServiceMask) -> Self {
        Self {
            position,
            services: Some(services),
        }
    }

    #[inline(always)]
    pub fn matches(&self, record: &PlaceRecord) -> bool {
        record.is_at(&self.position) && self.services.map_or(true, |mask| record.services == mask)
    }
}

pub trait PlaceStore: Sized {
    /// Whether [`add`](PlaceStore::add) refuses a record whose position is
    /// already stored.
    const DEDUPLICATES: bool;

    /// `capacity` is the split threshold of the owning node. Stores size their
    /// initial allocation from it but may grow past it when the node cannot
    /// split any further.
    fn with_capacity(capacity: usize) -> Self;

    /// Returns false when the record was refused as a duplicate.
    fn add(&mut self, record: PlaceRecord) -> bool;

    fn contains(&self, position: &Point) -> bool;

    fn find(&self, query: &PlaceMatch) -> Option<&PlaceRecord>;

    fn find_mut(&mut self, query: &PlaceMatch) -> Option<&mut PlaceRecord>;

    /// Removes the first record selected by `query`.
    fn remove_matching(&mut self, query: &PlaceMatch) -> Option<PlaceRecord>;

    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&PlaceRecord);

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn clear(&mut self);

    /// Moves every record out, leaving the store empty.
    fn take_all(&mut self) -> Vec<PlaceRecord>;
}
