use super::{PlaceMatch, PlaceStore};
use crate::place::PlaceRecord;
use common::shapes::Point;

/// Unordered growable buffer. Appends always succeed, lookups scan linearly and
/// removal swaps the last record into the hole.
#[derive(Debug, Default)]
pub struct AppendBuffer {
    records: Vec<PlaceRecord>,
}

impl AppendBuffer {
    pub fn as_slice(&self) -> &[PlaceRecord] {
        &self.records
    }
}

impl PlaceStore for AppendBuffer {
    const DEDUPLICATES: bool = false;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    fn add(&mut self, record: PlaceRecord) -> bool {
        self.records.push(record);
        true
    }

    fn contains(&self, position: &Point) -> bool {
        self.records.iter().any(|record| record.is_at(position))
    }

    fn find(&self, query: &PlaceMatch) -> Option<&PlaceRecord> {
        self.records.iter().find(|record| query.matches(record))
    }

    fn find_mut(&mut self, query: &PlaceMatch) -> Option<&mut PlaceRecord> {
        self.records.iter_mut().find(|record| query.matches(record))
    }

    fn remove_matching(&mut self, query: &PlaceMatch) -> Option<PlaceRecord> {
        let index = self.records.iter().position(|record| query.matches(record))?;
        Some(self.records.swap_remove(index))
    }

    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&PlaceRecord),
    {
        self.records.iter().for_each(f);
    }

    fn size(&self) -> usize {
        self.records.len()
    }

    fn clear(&mut self) {
        self.records.clear();
    }

    fn take_all(&mut self) -> Vec<PlaceRecord> {
        std::mem::take(&mut self.records)
    }
}
