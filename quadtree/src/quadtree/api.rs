use super::config::{Config, RelocationRequest};
use super::node::QuadNode;
use super::query_nearest::SearchLimit;
use super::QuadTree;
use crate::error::{QuadtreeError, QuadtreeResult};
use crate::heap::BoundedTopK;
use crate::place::PlaceRecord;
use crate::services::{ServiceCatalog, ServiceId, ServiceMask};
use crate::store::{BucketSet, PlaceMatch, PlaceStore};
use common::shapes::{Boundary, Point};
use tracing::debug;

impl QuadTree {
    pub fn new(bounds: Boundary) -> QuadtreeResult<Self> {
        Self::new_with_config(bounds, Config::default())
    }

    pub fn new_with_config(bounds: Boundary, config: Config) -> QuadtreeResult<Self> {
        QuadTree::<BucketSet>::with_store(bounds, config)
    }
}

impl<S: PlaceStore> QuadTree<S> {
    /// Builds a tree whose leaves use the store `S`.
    pub fn with_store(bounds: Boundary, config: Config) -> QuadtreeResult<Self> {
        if config.node_capacity == 0 {
            return Err(QuadtreeError::InvalidCapacity {
                capacity: config.node_capacity,
            });
        }
        let limit = i32::MAX as i64 + 1;
        if bounds.right() > limit || bounds.bottom() > limit {
            return Err(QuadtreeError::InvalidBounds { bounds });
        }
        debug!(
            bounds = %bounds,
            node_capacity = config.node_capacity,
            max_depth = config.max_depth,
            services = config.catalog.len(),
            deduplicates = S::DEDUPLICATES,
            "created quadtree"
        );
        Ok(Self {
            root: QuadNode::new(0, bounds, config.node_capacity),
            config,
            len: 0,
        })
    }

    pub fn bounds(&self) -> &Boundary {
        self.root.bounds()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.config.catalog
    }

    pub fn root(&self) -> &QuadNode<S> {
        &self.root
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a place. `Ok(false)` means a deduplicating store already holds
    /// a place at `position`; the tree is left unchanged.
    pub fn insert(&mut self, position: Point, services: ServiceMask) -> QuadtreeResult<bool> {
        self.insert_place(PlaceRecord::new(position, services))
    }

    pub fn insert_place(&mut self, record: PlaceRecord) -> QuadtreeResult<bool> {
        self.check_in_bounds(record.position)?;
        self.config.catalog.validate(record.services)?;
        let inserted = self.root.insert(record, self.config.max_depth);
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Removes the first place at `position`.
    pub fn delete(&mut self, position: Point) -> bool {
        self.remove_matching(&PlaceMatch::at(position)).is_some()
    }

    /// Removes the first place at `position` whose mask equals `services`.
    pub fn delete_matching(&mut self, position: Point, services: ServiceMask) -> bool {
        self.remove_matching(&PlaceMatch::exact(position, services)).is_some()
    }

    pub fn remove_matching(&mut self, query: &PlaceMatch) -> Option<PlaceRecord> {
        let removed = self.root.remove(query);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn find(&self, position: Point) -> Option<&PlaceRecord> {
        self.root.find(&PlaceMatch::at(position))
    }

    pub fn contains(&self, position: Point) -> bool {
        self.find(position).is_some()
    }

    /// Replaces the mask of the first place at `position`. The new mask is
    /// checked against the catalog before anything is looked up.
    pub fn edit_services(&mut self, position: Point, services: ServiceMask) -> QuadtreeResult<bool> {
        self.config.catalog.validate(services)?;
        Ok(self.update_services(position, |mask| *mask = services))
    }

    pub fn add_service(&mut self, position: Point, service: ServiceId) -> QuadtreeResult<bool> {
        self.check_service(service)?;
        Ok(self.update_services(position, |mask| mask.add(service)))
    }

    pub fn remove_service(&mut self, position: Point, service: ServiceId) -> QuadtreeResult<bool> {
        self.check_service(service)?;
        Ok(self.update_services(position, |mask| mask.remove(service)))
    }

    fn update_services<F>(&mut self, position: Point, update: F) -> bool
    where
        F: FnOnce(&mut ServiceMask),
    {
        match self.root.find_mut(&PlaceMatch::at(position)) {
            Some(record) => {
                update(&mut record.services);
                true
            }
            None => false,
        }
    }

    /// Moves the first place at `request.from` to `request.to`, keeping its
    /// mask. `Ok(false)` when nothing is at `from`, or when a deduplicating
    /// store already holds a different place at `to`; the tree is unchanged in
    /// both cases.
    pub fn relocate(&mut self, request: RelocationRequest) -> QuadtreeResult<bool> {
        self.check_in_bounds(request.to)?;
        if request.from == request.to {
            return Ok(self.contains(request.from));
        }
        if S::DEDUPLICATES && self.contains(request.to) {
            return Ok(false);
        }
        let Some(record) = self.remove_matching(&PlaceMatch::at(request.from)) else {
            return Ok(false);
        };
        let inserted = self
            .root
            .insert(PlaceRecord::new(request.to, record.services), self.config.max_depth);
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Applies the requests in order and returns how many places moved. Stops
    /// at the first request whose destination is out of bounds; earlier moves
    /// stay applied.
    pub fn relocate_batch(&mut self, requests: &[RelocationRequest]) -> QuadtreeResult<usize> {
        let mut moved = 0;
        for request in requests {
            if self.relocate(*request)? {
                moved += 1;
            }
        }
        Ok(moved)
    }

    pub fn query_range(&self, range: Boundary, filter: Option<ServiceId>) -> Vec<PlaceRecord> {
        let mut found = Vec::new();
        self.root
            .query_range_with(&range, filter, |record| found.push(*record));
        found
    }

    pub fn query_range_with<F>(&self, range: Boundary, filter: Option<ServiceId>, f: F)
    where
        F: FnMut(&PlaceRecord),
    {
        self.root.query_range_with(&range, filter, f);
    }

    /// Up to `k` places offering `service`, nearest to `target` first.
    pub fn query_nearest(&self, target: Point, k: usize, service: ServiceId) -> Vec<PlaceRecord> {
        self.nearest(target, k, service, None)
    }

    /// Like [`query_nearest`](Self::query_nearest), restricted to places within
    /// euclidean `max_distance` of `target`.
    pub fn query_nearest_within(
        &self,
        target: Point,
        k: usize,
        service: ServiceId,
        max_distance: u32,
    ) -> Vec<PlaceRecord> {
        let limit = SearchLimit {
            max_distance_sq: (max_distance as u64).pow(2),
        };
        self.nearest(target, k, service, Some(&limit))
    }

    fn nearest(
        &self,
        target: Point,
        k: usize,
        service: ServiceId,
        limit: Option<&SearchLimit>,
    ) -> Vec<PlaceRecord> {
        if k == 0 {
            return Vec::new();
        }
        let mut heap = BoundedTopK::new(k.min(self.len.max(1)), target);
        self.root.nearest_into(&mut heap, service, limit);
        heap.into_nearest_first()
    }

    /// Every place offering `service` within euclidean `max_distance` of
    /// `target`, nearest first.
    pub fn query_within(&self, target: Point, max_distance: u32, service: ServiceId) -> Vec<PlaceRecord> {
        let max_distance_sq = (max_distance as u64).pow(2);
        let mut found = Vec::new();
        self.root
            .within_with(target, max_distance_sq, service, |record| found.push(*record));
        found.sort_by_key(|record| record.distance_sq(&target));
        found
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.for_each_node(|_| count += 1);
        count
    }

    /// Deepest level reached; a tree that never split has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        self.root.for_each_node(|node| depth = depth.max(node.level()));
        depth
    }

    pub fn all_node_bounds(&self, bounds: &mut Vec<Boundary>) {
        self.root.for_each_node(|node| bounds.push(*node.bounds()));
    }

    pub fn all_places(&self, places: &mut Vec<PlaceRecord>) {
        self.root.for_each_node(|node| {
            if let Some(store) = node.store() {
                store.for_each(|record| places.push(*record));
            }
        });
    }

    fn check_in_bounds(&self, position: Point) -> QuadtreeResult<()> {
        if self.root.bounds().contains_point(position) {
            return Ok(());
        }
        debug!(
            x = position.x,
            y = position.y,
            bounds = %self.root.bounds(),
            "rejected position outside quadtree bounds"
        );
        Err(QuadtreeError::OutOfBounds {
            x: position.x,
            y: position.y,
            bounds: *self.root.bounds(),
        })
    }

    fn check_service(&self, service: ServiceId) -> QuadtreeResult<()> {
        self.config.catalog.id(service.index()).map(|_| ())
    }
}
