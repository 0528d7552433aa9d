use crate::place::PlaceRecord;
use crate::store::{PlaceMatch, PlaceStore};
use common::shapes::{Boundary, Point};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

/// Explicit traversal stack. Each internal node swaps itself for four
/// children, so 64 slots cover 21 levels before spilling.
pub(crate) type NodeStack<'a, S> = SmallVec<[&'a QuadNode<S>; 64]>;

#[derive(Debug)]
pub enum NodeState<S> {
    Leaf(S),
    Internal(Box<[QuadNode<S>; 4]>),
}

/// One node of the tree. Every record in its subtree lies inside `bounds`.
#[derive(Debug)]
pub struct QuadNode<S> {
    level: usize,
    bounds: Boundary,
    capacity: usize,
    state: NodeState<S>,
}

impl<S: PlaceStore> QuadNode<S> {
    pub fn new(level: usize, bounds: Boundary, capacity: usize) -> Self {
        Self {
            level,
            bounds,
            capacity,
            state: NodeState::Leaf(S::with_capacity(capacity)),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn bounds(&self) -> &Boundary {
        &self.bounds
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> &NodeState<S> {
        &self.state
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf(_))
    }

    pub fn store(&self) -> Option<&S> {
        match &self.state {
            NodeState::Leaf(store) => Some(store),
            NodeState::Internal(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[QuadNode<S>; 4]> {
        match &self.state {
            NodeState::Leaf(_) => None,
            NodeState::Internal(children) => Some(children),
        }
    }

    /// Quadrant of `position` under the `<` midpoint rule.
    #[inline(always)]
    pub fn quadrant_index(&self, position: Point) -> usize {
        let vmid = self.bounds.left() + (self.bounds.width / 2) as i64;
        let hmid = self.bounds.top() + (self.bounds.height / 2) as i64;
        let left = (position.x as i64) < vmid;
        let top = (position.y as i64) < hmid;
        match (left, top) {
            (false, true) => 0,
            (true, true) => 1,
            (true, false) => 2,
            (false, false) => 3,
        }
    }

    /// Bounds of the four children, indexed like [`quadrant_index`].
    ///
    /// [`quadrant_index`]: QuadNode::quadrant_index
    pub fn child_bounds(&self) -> [Boundary; 4] {
        let Boundary {
            x,
            y,
            width,
            height,
        } = self.bounds;
        let low_w = width / 2;
        let high_w = width - low_w;
        let low_h = height / 2;
        let high_h = height - low_h;
        // Midpoints stay below the exclusive far edge, which the root bounds
        // keep within i32::MAX + 1.
        let mid_x = (x as i64 + low_w as i64) as i32;
        let mid_y = (y as i64 + low_h as i64) as i32;
        [
            Boundary::new(mid_x, y, high_w, low_h),
            Boundary::new(x, y, low_w, low_h),
            Boundary::new(x, mid_y, low_w, high_h),
            Boundary::new(mid_x, mid_y, high_w, high_h),
        ]
    }

    #[inline(always)]
    fn can_split(&self, max_depth: usize) -> bool {
        self.level < max_depth && (self.bounds.width >= 2 || self.bounds.height >= 2)
    }

    fn should_split(&self, record: &PlaceRecord, max_depth: usize) -> bool {
        match &self.state {
            NodeState::Leaf(store) => {
                store.size() >= self.capacity
                    && self.can_split(max_depth)
                    && !(S::DEDUPLICATES && store.contains(&record.position))
            }
            NodeState::Internal(_) => false,
        }
    }

    /// Caller guarantees `record` lies inside `bounds`. Returns false when the
    /// store refused it as a duplicate.
    pub(crate) fn insert(&mut self, record: PlaceRecord, max_depth: usize) -> bool {
        if self.should_split(&record, max_depth) {
            self.split();
        }
        let quadrant = self.quadrant_index(record.position);
        match &mut self.state {
            NodeState::Leaf(store) => store.add(record),
            NodeState::Internal(children) => children[quadrant].insert(record, max_depth),
        }
    }

    /// Turns a leaf into an internal node and promotes its records into the
    /// new children. No-op on internal nodes.
    pub(crate) fn split(&mut self) {
        let NodeState::Leaf(store) = &mut self.state else {
            return;
        };
        let records = store.take_all();
        let level = self.level + 1;
        let capacity = self.capacity;
        let mut children = Box::new(
            self.child_bounds()
                .map(|bounds| QuadNode::<S>::new(level, bounds, capacity)),
        );
        let moved = records.len();
        for record in records {
            children[self.quadrant_index(record.position)].adopt(record);
        }
        self.state = NodeState::Internal(children);
        trace!(level = self.level, bounds = %self.bounds, moved, "split leaf");
    }

    fn adopt(&mut self, record: PlaceRecord) {
        if let NodeState::Leaf(store) = &mut self.state {
            store.add(record);
        }
    }

    pub(crate) fn remove(&mut self, query: &PlaceMatch) -> Option<PlaceRecord> {
        if !self.bounds.contains_point(query.position) {
            return None;
        }
        let quadrant = self.quadrant_index(query.position);
        match &mut self.state {
            NodeState::Leaf(store) => store.remove_matching(query),
            NodeState::Internal(children) => children[quadrant].remove(query),
        }
    }

    pub(crate) fn find(&self, query: &PlaceMatch) -> Option<&PlaceRecord> {
        if !self.bounds.contains_point(query.position) {
            return None;
        }
        let mut node = self;
        loop {
            match &node.state {
                NodeState::Leaf(store) => return store.find(query),
                NodeState::Internal(children) => {
                    node = &children[node.quadrant_index(query.position)];
                }
            }
        }
    }

    pub(crate) fn find_mut(&mut self, query: &PlaceMatch) -> Option<&mut PlaceRecord> {
        if !self.bounds.contains_point(query.position) {
            return None;
        }
        let quadrant = self.quadrant_index(query.position);
        match &mut self.state {
            NodeState::Leaf(store) => store.find_mut(query),
            NodeState::Internal(children) => children[quadrant].find_mut(query),
        }
    }

    /// Visits this node and every descendant, parents before children.
    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&QuadNode<S>),
    {
        let mut stack: NodeStack<'_, S> = smallvec![self];
        while let Some(node) = stack.pop() {
            f(node);
            if let NodeState::Internal(children) = &node.state {
                stack.extend(children.iter().rev());
            }
        }
    }
}
