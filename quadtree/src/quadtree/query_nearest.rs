use super::node::{NodeState, NodeStack, QuadNode};
use crate::heap::BoundedTopK;
use crate::services::ServiceId;
use crate::store::PlaceStore;
use smallvec::smallvec;
use std::cmp::Reverse;

/// Optional limit on a nearest search: candidates must sit within
/// `max_distance_sq` of the target.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchLimit {
    pub(crate) max_distance_sq: u64,
}

impl<S: PlaceStore> QuadNode<S> {
    /// Offers every qualifying record of the subtree to `heap`.
    ///
    /// Besides the distance limit, a subtree is skipped once the heap is full and
    /// its closest cell is no nearer than the farthest record held: nothing in
    /// it could displace that record. Children are explored nearest first so
    /// the heap tightens early.
    pub(crate) fn nearest_into(
        &self,
        heap: &mut BoundedTopK,
        service: ServiceId,
        limit: Option<&SearchLimit>,
    ) {
        let target = heap.target();
        let mut stack: NodeStack<'_, S> = smallvec![self];
        while let Some(node) = stack.pop() {
            let node_distance_sq = node.bounds().distance_sq_to_point(target);
            if let Some(limit) = limit {
                if node_distance_sq > limit.max_distance_sq {
                    continue;
                }
            }
            if heap.is_full()
                && heap
                    .max_distance_sq()
                    .map_or(false, |farthest| node_distance_sq >= farthest)
            {
                continue;
            }
            match node.state() {
                NodeState::Leaf(store) => store.for_each(|record| {
                    if !record.offers(service) {
                        return;
                    }
                    if let Some(limit) = limit {
                        if record.distance_sq(&target) > limit.max_distance_sq {
                            return;
                        }
                    }
                    heap.offer(*record);
                }),
                NodeState::Internal(children) => {
                    let mut order = [0usize, 1, 2, 3];
                    order.sort_by_key(|&i| Reverse(children[i].bounds().distance_sq_to_point(target)));
                    stack.extend(order.iter().map(|&i| &children[i]));
                }
            }
        }
    }
}
