use crate::{
    core::{bounds::Bounds, geo::Point},
    MapError, Result,
};

use rstar::{RTree, RTreeObject, AABB};

/// An entry of the spatial index: a key plus its extent in projected metres
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub key: u32,
    pub bounds: Bounds,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(key: u32, bounds: Bounds, data: T) -> Self {
        Self { key, bounds, data }
    }

    pub fn from_point(key: u32, point: Point, data: T) -> Self {
        Self::new(key, Bounds::new(point, point), data)
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

/// R-tree index of map features; keys are unique
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T: Clone> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    pub fn insert(&mut self, item: SpatialItem<T>) -> Result<()> {
        if !item.bounds.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "spatial item {} has inverted bounds",
                item.key
            ))
            .into());
        }
        if self.get(item.key).is_some() {
            return Err(MapError::Layer(format!("duplicate spatial key {}", item.key)).into());
        }

        self.rtree.insert(item);
        Ok(())
    }

    /// Items whose extent intersects `bounds`, in no particular order
    pub fn query(&self, bounds: &Bounds) -> Vec<&SpatialItem<T>> {
        let envelope =
            AABB::from_corners([bounds.min.x, bounds.min.y], [bounds.max.x, bounds.max.y]);
        self.rtree.locate_in_envelope_intersecting(&envelope).collect()
    }

    pub fn remove(&mut self, key: u32) -> Option<SpatialItem<T>> {
        let found = self.get(key).cloned()?;
        self.rtree.remove(&found)
    }

    pub fn get(&self, key: u32) -> Option<&SpatialItem<T>> {
        self.rtree.iter().find(|item| item.key == key)
    }

    /// Extent of all indexed items
    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        let envelope = self.rtree.root().envelope();
        Some(Bounds::from_coords(
            envelope.lower()[0],
            envelope.lower()[1],
            envelope.upper()[0],
            envelope.upper()[1],
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn clear(&mut self) {
        self.rtree = RTree::new();
    }
}

impl<T: Clone> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SpatialIndex<usize> {
        let mut index = SpatialIndex::new();
        index
            .insert(SpatialItem::from_point(0, Point::new(0.0, 0.0), 0))
            .unwrap();
        index
            .insert(SpatialItem::from_point(1, Point::new(100.0, 100.0), 1))
            .unwrap();
        index
            .insert(SpatialItem::from_point(2, Point::new(-50.0, 20.0), 2))
            .unwrap();
        index
    }

    #[test]
    fn test_query_returns_intersecting_items() {
        let index = index();
        let mut keys: Vec<u32> = index
            .query(&Bounds::from_coords(-60.0, -10.0, 10.0, 30.0))
            .iter()
            .map(|item| item.key)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![0, 2]);
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let mut index = index();
        assert!(index
            .insert(SpatialItem::from_point(1, Point::new(5.0, 5.0), 9))
            .is_err());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_remove_and_bounds() {
        let mut index = index();
        let bounds = index.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(-50.0, 0.0));
        assert_eq!(bounds.max, Point::new(100.0, 100.0));

        let removed = index.remove(1).unwrap();
        assert_eq!(removed.data, 1);
        assert!(index.get(1).is_none());
        assert!(index.remove(1).is_none());

        index.clear();
        assert!(index.is_empty());
        assert!(index.bounds().is_none());
    }
}
