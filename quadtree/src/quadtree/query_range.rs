use super::node::{NodeState, NodeStack, QuadNode};
use crate::place::PlaceRecord;
use crate::services::ServiceId;
use crate::store::PlaceStore;
use common::shapes::{Boundary, Point};
use smallvec::smallvec;

impl<S: PlaceStore> QuadNode<S> {
    /// Calls `f` for every record inside `range` that offers `filter` (any
    /// record when `filter` is `None`). Subtrees whose bounds miss `range` are
    /// skipped. Siblings are visited in quadrant order.
    pub(crate) fn query_range_with<F>(&self, range: &Boundary, filter: Option<ServiceId>, mut f: F)
    where
        F: FnMut(&PlaceRecord),
    {
        let mut stack: NodeStack<'_, S> = smallvec![self];
        while let Some(node) = stack.pop() {
            if !node.bounds().intersects(range) {
                continue;
            }
            match node.state() {
                NodeState::Leaf(store) => store.for_each(|record| {
                    if range.contains_point(record.position)
                        && filter.map_or(true, |service| record.offers(service))
                    {
                        f(record);
                    }
                }),
                NodeState::Internal(children) => stack.extend(children.iter().rev()),
            }
        }
    }

    /// Calls `f` for every record offering `service` whose squared distance to
    /// `target` is at most `max_distance_sq`. Subtrees are pruned on their
    /// distance to `target`.
    pub(crate) fn within_with<F>(&self, target: Point, max_distance_sq: u64, service: ServiceId, mut f: F)
    where
        F: FnMut(&PlaceRecord),
    {
        let mut stack: NodeStack<'_, S> = smallvec![self];
        while let Some(node) = stack.pop() {
            if node.bounds().distance_sq_to_point(target) > max_distance_sq {
                continue;
            }
            match node.state() {
                NodeState::Leaf(store) => store.for_each(|record| {
                    if record.offers(service) && record.distance_sq(&target) <= max_distance_sq {
                        f(record);
                    }
                }),
                NodeState::Internal(children) => stack.extend(children.iter().rev()),
            }
        }
    }
}
