use crate::place::PlaceRecord;
use common::shapes::Point;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance_sq: u64,
    record: PlaceRecord,
}

/// Keeps the `k` records closest to a fixed target.
///
/// Array-backed max-heap on squared distance: the root is the farthest record
/// held, and a new candidate only gets in by beating it. Records at equal
/// distance come out in no particular order.
#[derive(Debug, Clone)]
pub struct BoundedTopK {
    k: usize,
    target: Point,
    heap: Vec<Candidate>,
}

impl BoundedTopK {
    pub fn new(k: usize, target: Point) -> Self {
        Self {
            k,
            target,
            heap: Vec::with_capacity(k),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Squared distance of the farthest record held.
    pub fn max_distance_sq(&self) -> Option<u64> {
        self.heap.first().map(|candidate| candidate.distance_sq)
    }

    pub fn peek_farthest(&self) -> Option<&PlaceRecord> {
        self.heap.first().map(|candidate| &candidate.record)
    }

    /// Returns true when `record` was kept.
    pub fn offer(&mut self, record: PlaceRecord) -> bool {
        if self.k == 0 {
            return false;
        }
        let candidate = Candidate {
            distance_sq: record.distance_sq(&self.target),
            record,
        };
        if self.heap.len() < self.k {
            self.heap.push(candidate);
            self.sift_up(self.heap.len() - 1);
            return true;
        }
        if candidate.distance_sq < self.heap[0].distance_sq {
            self.heap[0] = candidate;
            self.sift_down(0);
            return true;
        }
        false
    }

    pub fn pop_farthest(&mut self) -> Option<PlaceRecord> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let farthest = self.heap.pop();
        self.sift_down(0);
        farthest.map(|candidate| candidate.record)
    }

    /// Drains the heap. Popping the maximum repeatedly yields records farthest
    /// first, so the drained sequence is reversed before it is returned.
    pub fn into_nearest_first(mut self) -> Vec<PlaceRecord> {
        let mut records = Vec::with_capacity(self.heap.len());
        while let Some(record) = self.pop_farthest() {
            records.push(record);
        }
        records.reverse();
        records
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].distance_sq <= self.heap[parent].distance_sq {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;
            if left < len && self.heap[left].distance_sq > self.heap[largest].distance_sq {
                largest = left;
            }
            if right < len && self.heap[right].distance_sq > self.heap[largest].distance_sq {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.heap.swap(index, largest);
            index = largest;
        }
    }
}
