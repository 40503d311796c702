use glam::Vec2;

use crate::geometry::{Rect, Region};

/// Subdivision stops here even if a leaf is over capacity; more than
/// `capacity` coincident points would otherwise split forever.
const MAX_DEPTH: usize = 16;

/// A point quadtree over a fixed region of world space.
///
/// Entries are `(index, position)` pairs, the index keying into whatever
/// collection the tree was built from. The tree is a positional snapshot:
/// it is built once from the current positions, queried, and thrown away.
/// There is no removal or rebalancing.
#[derive(Debug)]
pub struct QuadTree {
    bounds: Rect,
    capacity: usize,
    depth: usize,
    entries: Vec<(usize, Vec2)>,
    /// NE, NW, SE, SW once split; a node is either a leaf with at most
    /// `capacity` entries or an internal node with empty `entries`.
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    pub fn new(bounds: Rect, capacity: usize) -> Self {
        Self::node(bounds, capacity.max(1), 0)
    }

    fn node(bounds: Rect, capacity: usize, depth: usize) -> Self {
        QuadTree {
            bounds,
            capacity,
            depth,
            entries: Vec::with_capacity(capacity),
            children: None,
        }
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Number of entries stored in this subtree.
    pub fn len(&self) -> usize {
        self.entries.len()
            + self
                .children
                .as_ref()
                .map_or(0, |children| children.iter().map(QuadTree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an entry. Positions outside this node's bounds are silently
    /// dropped; returns whether the entry was accepted.
    pub fn insert(&mut self, index: usize, position: Vec2) -> bool {
        if !self.bounds.contains(position) {
            return false;
        }

        if self.children.is_none() {
            if self.entries.len() < self.capacity || self.depth >= MAX_DEPTH {
                self.entries.push((index, position));
                return true;
            }
            self.split();
        }

        Self::insert_into_children(self.children.as_mut().unwrap(), index, position)
    }

    /// Offers the entry to all four children; containment filters it into the
    /// first quadrant that holds it, so a point on a shared edge still lands
    /// exactly once.
    fn insert_into_children(children: &mut [QuadTree; 4], index: usize, position: Vec2) -> bool {
        children.iter_mut().any(|child| child.insert(index, position))
    }

    /// Quarters the bounds into four children and moves the buffered entries
    /// down into them; afterwards this node holds no entries of its own.
    fn split(&mut self) {
        let quarter_w = self.bounds.half_width / 2.;
        let quarter_h = self.bounds.half_height / 2.;
        let center = self.bounds.center;

        let child = |dx: f32, dy: f32| {
            Self::node(
                Rect::new(
                    Vec2::new(center.x + dx * quarter_w, center.y + dy * quarter_h),
                    self.bounds.half_width,
                    self.bounds.half_height,
                ),
                self.capacity,
                self.depth + 1,
            )
        };

        let mut children = Box::new([
            child(1., 1.),   // NE
            child(-1., 1.),  // NW
            child(1., -1.),  // SE
            child(-1., -1.), // SW
        ]);

        for (index, position) in self.entries.drain(..) {
            Self::insert_into_children(&mut children, index, position);
        }

        self.children = Some(children);
    }

    /// Indices of all entries whose position lies in `region`, each exactly
    /// once, in no particular order.
    pub fn query(&self, region: &Region) -> Vec<usize> {
        let mut found = Vec::new();
        self.query_into(region, &mut found);
        found
    }

    fn query_into(&self, region: &Region, found: &mut Vec<usize>) {
        if !self.bounds.intersects(region) {
            return;
        }

        for &(index, position) in &self.entries {
            if region.contains(position) {
                found.push(index);
            }
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(region, found);
            }
        }
    }

    #[cfg(test)]
    fn max_depth(&self) -> usize {
        self.children.as_ref().map_or(self.depth, |children| {
            children.iter().map(QuadTree::max_depth).max().unwrap_or(self.depth)
        })
    }
}
