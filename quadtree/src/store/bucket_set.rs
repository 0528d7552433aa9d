use super::{PlaceMatch, PlaceStore};
use crate::place::PlaceRecord;
use common::shapes::Point;
use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug)]
struct Link {
    record: PlaceRecord,
    next: Option<Box<Link>>,
}

/// Deduplicating hash set keyed by position.
///
/// The bucket count is fixed at construction (the node capacity). Collisions
/// chain through singly linked lists with head insertion, so iteration order
/// carries no meaning.
#[derive(Debug)]
pub struct BucketSet {
    buckets: Vec<Option<Box<Link>>>,
    len: usize,
}

impl BucketSet {
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline(always)]
    fn bucket_index(&self, position: &Point) -> usize {
        let mut hasher = FxHasher::default();
        position.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }
}

impl PlaceStore for BucketSet {
    const DEDUPLICATES: bool = true;

    fn with_capacity(capacity: usize) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(capacity.max(1), || None);
        Self { buckets, len: 0 }
    }

    fn add(&mut self, record: PlaceRecord) -> bool {
        if self.contains(&record.position) {
            return false;
        }
        let index = self.bucket_index(&record.position);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Link { record, next }));
        self.len += 1;
        true
    }

    fn contains(&self, position: &Point) -> bool {
        self.find(&PlaceMatch::at(*position)).is_some()
    }

    fn find(&self, query: &PlaceMatch) -> Option<&PlaceRecord> {
        let index = self.bucket_index(&query.position);
        let mut current = self.buckets[index].as_deref();
        while let Some(link) = current {
            if query.matches(&link.record) {
                return Some(&link.record);
            }
            current = link.next.as_deref();
        }
        None
    }

    fn find_mut(&mut self, query: &PlaceMatch) -> Option<&mut PlaceRecord> {
        let index = self.bucket_index(&query.position);
        let mut current = self.buckets[index].as_deref_mut();
        while let Some(link) = current {
            if query.matches(&link.record) {
                return Some(&mut link.record);
            }
            current = link.next.as_deref_mut();
        }
        None
    }

    fn remove_matching(&mut self, query: &PlaceMatch) -> Option<PlaceRecord> {
        let index = self.bucket_index(&query.position);
        let mut slot = &mut self.buckets[index];
        while slot
            .as_ref()
            .map_or(false, |link| !query.matches(&link.record))
        {
            slot = &mut slot.as_mut()?.next;
        }
        let link = slot.take()?;
        let Link { record, next } = *link;
        *slot = next;
        self.len -= 1;
        Some(record)
    }

    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&PlaceRecord),
    {
        for bucket in &self.buckets {
            let mut current = bucket.as_deref();
            while let Some(link) = current {
                f(&link.record);
                current = link.next.as_deref();
            }
        }
    }

    fn size(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        // Unlink iteratively so long chains don't recurse on drop.
        for bucket in &mut self.buckets {
            let mut current = bucket.take();
            while let Some(mut link) = current {
                current = link.next.take();
            }
        }
        self.len = 0;
    }

    fn take_all(&mut self) -> Vec<PlaceRecord> {
        let mut records = Vec::with_capacity(self.len);
        for bucket in &mut self.buckets {
            let mut current = bucket.take();
            while let Some(link) = current {
                let Link { record, next } = *link;
                records.push(record);
                current = next;
            }
        }
        self.len = 0;
        records
    }
}

impl Drop for BucketSet {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ServiceCatalog, ServiceMask};

    fn mask(index: usize) -> ServiceMask {
        ServiceCatalog::standard().encode(index).unwrap()
    }

    #[test]
    fn duplicate_position_is_refused() {
        let mut set = BucketSet::with_capacity(4);
        assert!(set.add(PlaceRecord::at(10, 10, mask(0))));
        assert!(!set.add(PlaceRecord::at(10, 10, mask(1))));
        assert_eq!(set.size(), 1);
        let kept = set.find(&PlaceMatch::at(Point::new(10, 10))).unwrap();
        assert_eq!(kept.services, mask(0));
    }

    #[test]
    fn chains_hold_more_records_than_buckets() {
        let mut set = BucketSet::with_capacity(2);
        for i in 0..50 {
            assert!(set.add(PlaceRecord::at(i, -i, mask(0))));
        }
        assert_eq!(set.size(), 50);
        assert_eq!(set.bucket_count(), 2);
        for i in 0..50 {
            assert!(set.contains(&Point::new(i, -i)));
        }
        assert!(!set.contains(&Point::new(1, 1)));
    }

    #[test]
    fn remove_from_middle_of_chain() {
        let mut set = BucketSet::with_capacity(1);
        for i in 0..5 {
            set.add(PlaceRecord::at(i, 0, mask(i as usize)));
        }
        let removed = set.remove_matching(&PlaceMatch::at(Point::new(2, 0))).unwrap();
        assert_eq!(removed.position, Point::new(2, 0));
        assert_eq!(set.size(), 4);
        assert!(!set.contains(&Point::new(2, 0)));
        for i in [0, 1, 3, 4] {
            assert!(set.contains(&Point::new(i, 0)));
        }
        assert!(set.remove_matching(&PlaceMatch::at(Point::new(2, 0))).is_none());
    }

    #[test]
    fn remove_respects_mask() {
        let mut set = BucketSet::with_capacity(4);
        set.add(PlaceRecord::at(1, 1, mask(3)));
        assert!(set
            .remove_matching(&PlaceMatch::exact(Point::new(1, 1), mask(4)))
            .is_none());
        assert!(set
            .remove_matching(&PlaceMatch::exact(Point::new(1, 1), mask(3)))
            .is_some());
        assert!(set.is_empty());
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut set = BucketSet::with_capacity(4);
        set.add(PlaceRecord::at(3, 4, mask(0)));
        set.find_mut(&PlaceMatch::at(Point::new(3, 4))).unwrap().services = mask(5);
        let mut seen = Vec::new();
        set.for_each(|record| seen.push(*record));
        assert_eq!(seen, vec![PlaceRecord::at(3, 4, mask(5))]);
    }

    #[test]
    fn take_all_empties_the_set() {
        let mut set = BucketSet::with_capacity(3);
        for i in 0..7 {
            set.add(PlaceRecord::at(i, i, mask(0)));
        }
        let mut records = set.take_all();
        records.sort_by_key(|record| record.position.x);
        assert_eq!(records.len(), 7);
        assert_eq!(records[6].position, Point::new(6, 6));
        assert_eq!(set.size(), 0);
        let mut count = 0;
        set.for_each(|_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn zero_capacity_still_has_a_bucket() {
        let mut set = BucketSet::with_capacity(0);
        assert!(set.add(PlaceRecord::at(0, 0, mask(0))));
        assert_eq!(set.bucket_count(), 1);
    }
}
