//! Service categories and the bit masks that record which ones a place offers.
//!
//! A [`ServiceCatalog`] is plain configuration: it names up to
//! [`MAX_SERVICES`] categories and is the only way to obtain a [`ServiceId`].
//! Raw indices coming from callers are checked against the catalog before any
//! mask is touched.

use crate::error::{QuadtreeError, QuadtreeResult};
use std::fmt;

/// Width of [`ServiceMask`] in bits.
pub const MAX_SERVICES: usize = 64;

/// Names of the catalog returned by [`ServiceCatalog::standard`].
pub const STANDARD_SERVICES: [&str; 10] = [
    "ATM",
    "RESTAURANT",
    "HOSPITAL",
    "GAS_STATION",
    "COFFEE_SHOP",
    "GROCERY_STORE",
    "PHARMACY",
    "HOTEL",
    "BANK",
    "BOOK_STORE",
];

/// Index of a service inside a catalog. Only minted by [`ServiceCatalog`], so
/// it always fits in a [`ServiceMask`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(u8);

impl ServiceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `1 << id`
    pub fn encode(self) -> ServiceMask {
        ServiceMask(1u64 << self.0)
    }
}

/// One bit per service category.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ServiceMask(u64);

impl ServiceMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wraps raw bits without checking them against a catalog. Masks built this
    /// way are validated when they enter a quadtree.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn has(self, id: ServiceId) -> bool {
        self.0 & id.encode().0 != 0
    }

    pub fn add(&mut self, id: ServiceId) {
        self.0 |= id.encode().0;
    }

    pub fn remove(&mut self, id: ServiceId) {
        self.0 &= !id.encode().0;
    }

    pub fn with(mut self, id: ServiceId) -> Self {
        self.add(id);
        self
    }

    pub fn without(mut self, id: ServiceId) -> Self {
        self.remove(id);
        self
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Set bits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ServiceId> {
        let bits = self.0;
        (0..MAX_SERVICES as u8).filter_map(move |i| (bits & (1u64 << i) != 0).then_some(ServiceId(i)))
    }
}

impl fmt::Debug for ServiceMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceMask({:#b})", self.0)
    }
}

impl FromIterator<ServiceId> for ServiceMask {
    fn from_iter<I: IntoIterator<Item = ServiceId>>(iter: I) -> Self {
        iter.into_iter().fold(ServiceMask::empty(), ServiceMask::with)
    }
}

/// Ordered list of service names. The position of a name is its bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    names: Vec<String>,
}

impl ServiceCatalog {
    pub fn new<I, N>(names: I) -> QuadtreeResult<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() > MAX_SERVICES {
            return Err(QuadtreeError::CatalogTooLarge {
                len: names.len(),
                max: MAX_SERVICES,
            });
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(QuadtreeError::EmptyServiceName);
            }
            if names[..i].contains(name) {
                return Err(QuadtreeError::DuplicateServiceName { name: name.clone() });
            }
        }
        Ok(Self { names })
    }

    /// ATM, restaurant, hospital, gas station, coffee shop, grocery store,
    /// pharmacy, hotel, bank and book store, in that bit order.
    pub fn standard() -> Self {
        Self {
            names: STANDARD_SERVICES.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn id(&self, index: usize) -> QuadtreeResult<ServiceId> {
        if index < self.names.len() {
            Ok(ServiceId(index as u8))
        } else {
            Err(QuadtreeError::InvalidServiceId {
                id: index,
                catalog_size: self.names.len(),
            })
        }
    }

    pub fn lookup(&self, name: &str) -> Option<ServiceId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| ServiceId(index as u8))
    }

    pub fn name(&self, id: ServiceId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = ServiceId> + '_ {
        (0..self.names.len()).map(|index| ServiceId(index as u8))
    }

    pub fn encode(&self, index: usize) -> QuadtreeResult<ServiceMask> {
        Ok(self.id(index)?.encode())
    }

    pub fn has(&self, mask: ServiceMask, index: usize) -> QuadtreeResult<bool> {
        Ok(mask.has(self.id(index)?))
    }

    pub fn add(&self, mask: &mut ServiceMask, index: usize) -> QuadtreeResult<()> {
        let id = self.id(index)?;
        mask.add(id);
        Ok(())
    }

    pub fn remove(&self, mask: &mut ServiceMask, index: usize) -> QuadtreeResult<()> {
        let id = self.id(index)?;
        mask.remove(id);
        Ok(())
    }

    /// Builds a mask from raw indices. Nothing is built if any index is out of
    /// range.
    pub fn mask_of<I>(&self, indices: I) -> QuadtreeResult<ServiceMask>
    where
        I: IntoIterator<Item = usize>,
    {
        indices
            .into_iter()
            .try_fold(ServiceMask::empty(), |mask, index| -> QuadtreeResult<ServiceMask> {
                Ok(mask.with(self.id(index)?))
            })
    }

    /// Mask with every catalog service set.
    pub fn full_mask(&self) -> ServiceMask {
        if self.names.len() == MAX_SERVICES {
            ServiceMask(u64::MAX)
        } else {
            ServiceMask((1u64 << self.names.len()) - 1)
        }
    }

    pub fn validate(&self, mask: ServiceMask) -> QuadtreeResult<()> {
        if mask.0 & !self.full_mask().0 == 0 {
            Ok(())
        } else {
            Err(QuadtreeError::MaskOutsideCatalog {
                mask: mask.0,
                catalog_size: self.names.len(),
            })
        }
    }

    pub fn names_of(&self, mask: ServiceMask) -> Vec<&str> {
        mask.iter().filter_map(|id| self.name(id)).collect()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_sets_single_bit() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.encode(0).unwrap().bits(), 1);
        assert_eq!(catalog.encode(9).unwrap().bits(), 1 << 9);
    }

    #[test]
    fn add_has_remove() {
        let catalog = ServiceCatalog::standard();
        let mut mask = ServiceMask::empty();
        catalog.add(&mut mask, 1).unwrap();
        catalog.add(&mut mask, 4).unwrap();
        assert!(catalog.has(mask, 1).unwrap());
        assert!(catalog.has(mask, 4).unwrap());
        assert!(!catalog.has(mask, 0).unwrap());

        catalog.remove(&mut mask, 1).unwrap();
        assert!(!catalog.has(mask, 1).unwrap());
        assert_eq!(mask.bits(), 1 << 4);
    }

    #[test]
    fn out_of_range_id_is_rejected_without_mutation() {
        let catalog = ServiceCatalog::standard();
        let mut mask = catalog.encode(2).unwrap();
        let err = catalog.add(&mut mask, 10).unwrap_err();
        assert_eq!(
            err,
            QuadtreeError::InvalidServiceId {
                id: 10,
                catalog_size: 10
            }
        );
        assert_eq!(mask.bits(), 1 << 2);
        assert!(catalog.remove(&mut mask, 64).is_err());
        assert!(catalog.has(mask, 11).is_err());
        assert_eq!(mask.bits(), 1 << 2);
    }

    #[test]
    fn mask_of_fails_fast() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.mask_of([0, 3]).unwrap().bits(), 0b1001);
        assert!(catalog.mask_of([0, 30]).is_err());
    }

    #[test]
    fn lookup_by_name() {
        let catalog = ServiceCatalog::standard();
        let atm = catalog.lookup("ATM").unwrap();
        assert_eq!(atm.index(), 0);
        assert_eq!(catalog.name(atm), Some("ATM"));
        assert_eq!(catalog.lookup("CINEMA"), None);
        let mask = ServiceMask::empty().with(atm).with(catalog.lookup("HOTEL").unwrap());
        assert_eq!(catalog.names_of(mask), vec!["ATM", "HOTEL"]);
    }

    #[test]
    fn catalog_validation() {
        assert!(ServiceCatalog::new(["A", "B"]).is_ok());
        assert_eq!(
            ServiceCatalog::new(["A", "B", "A"]).unwrap_err(),
            QuadtreeError::DuplicateServiceName { name: "A".into() }
        );
        assert_eq!(
            ServiceCatalog::new(["A", ""]).unwrap_err(),
            QuadtreeError::EmptyServiceName
        );
        let too_many: Vec<String> = (0..65).map(|i| format!("S{i}")).collect();
        assert!(matches!(
            ServiceCatalog::new(too_many),
            Err(QuadtreeError::CatalogTooLarge { len: 65, max: 64 })
        ));
    }

    #[test]
    fn full_catalog_uses_every_bit() {
        let names: Vec<String> = (0..64).map(|i| format!("S{i}")).collect();
        let catalog = ServiceCatalog::new(names).unwrap();
        assert_eq!(catalog.full_mask().bits(), u64::MAX);
        assert!(catalog.validate(ServiceMask::from_bits(u64::MAX)).is_ok());
        assert!(catalog.has(ServiceMask::from_bits(1 << 63), 63).unwrap());
    }

    #[test]
    fn validate_rejects_foreign_bits() {
        let catalog = ServiceCatalog::new(["A", "B", "C"]).unwrap();
        assert!(catalog.validate(ServiceMask::from_bits(0b111)).is_ok());
        assert_eq!(
            catalog.validate(ServiceMask::from_bits(0b1000)),
            Err(QuadtreeError::MaskOutsideCatalog {
                mask: 0b1000,
                catalog_size: 3
            })
        );
    }

    #[test]
    fn iter_lists_set_bits() {
        let catalog = ServiceCatalog::standard();
        let mask = catalog.mask_of([7, 2, 5]).unwrap();
        let ids: Vec<usize> = mask.iter().map(ServiceId::index).collect();
        assert_eq!(ids, vec![2, 5, 7]);
        assert_eq!(mask.count(), 3);
    }
}
