use crate::services::{ServiceId, ServiceMask};
use common::shapes::Point;

/// A located entity and the services it offers.
///
/// Stores identify a record by its position alone: two records at the same
/// point are the same place as far as lookup, deletion and deduplication are
/// concerned, whatever their masks. The derived `PartialEq` compares both
/// fields and is only meant for inspecting results.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaceRecord {
    pub position: Point,
    pub services: ServiceMask,
}

impl PlaceRecord {
    pub fn new(position: Point, services: ServiceMask) -> Self {
        Self { position, services }
    }

    pub fn at(x: i32, y: i32, services: ServiceMask) -> Self {
        Self::new(Point::new(x, y), services)
    }

    pub fn offers(&self, service: ServiceId) -> bool {
        self.services.has(service)
    }

    /// Same place under the store equality policy.
    pub fn is_at(&self, position: &Point) -> bool {
        self.position == *position
    }

    pub fn distance_sq(&self, target: &Point) -> u64 {
        self.position.distance_sq(target)
    }
}
