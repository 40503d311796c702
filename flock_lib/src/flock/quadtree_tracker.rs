use glam::Vec2;
use log::trace;

use crate::boid::Boid;
use crate::geometry::{Circle, Region};
use crate::options::RunOptions;
use crate::quadtree::QuadTree;

use super::tracker::Tracker;

/// Tracks the flock through a point quadtree that is discarded and rebuilt
/// from the current positions on every tick. Neighbour lookup is a circular
/// range query against that snapshot, so a tick costs roughly
/// O(n log n) instead of the naive O(n^2).
pub struct QuadTreeTracker {
    boids: Vec<Boid>,
    /// frozen positional snapshot; entry indices point into `boids`
    tree: QuadTree,
    /// leaf capacity the current snapshot was built with, kept for restarts
    capacity: usize,
}

impl QuadTreeTracker {
    fn build_tree(boids: &[Boid], run_options: &RunOptions) -> QuadTree {
        let mut tree = QuadTree::new(run_options.world.rect(), run_options.quadtree_capacity);
        for (index, boid) in boids.iter().enumerate() {
            tree.insert(index, boid.position);
        }
        tree
    }
}

impl Tracker for QuadTreeTracker {
    fn new(entities: &[Boid], run_options: &RunOptions) -> Self {
        QuadTreeTracker {
            tree: Self::build_tree(entities, run_options),
            boids: entities.to_vec(),
            capacity: run_options.quadtree_capacity,
        }
    }

    fn update(&mut self, dt: f32, run_options: &RunOptions) {
        // rebuild phase
        self.capacity = run_options.quadtree_capacity;
        self.tree = Self::build_tree(&self.boids, run_options);
        trace!("rebuilt index over {} boids", self.boids.len());

        // advance phase, in two passes: all accelerations are computed
        // against the frozen snapshot before anything moves
        let mut accelerations: Vec<Vec2> = Vec::with_capacity(self.boids.len());
        for boid in self.boids.iter() {
            let neighbours = self.get_neighbours(boid, run_options.sight_radius);
            let close_neighbours = self.get_neighbours(boid, run_options.separation_distance);
            accelerations.push(boid.run_rules(&neighbours, &close_neighbours, run_options));
        }

        for (boid, acceleration) in self.boids.iter_mut().zip(accelerations) {
            boid.apply_force(acceleration);
            boid.update_location(dt, run_options);
        }
    }

    fn insert_single(&mut self, entity: Boid, _run_options: &RunOptions) {
        // keep the current snapshot queryable between ticks; the next update
        // rebuilds it anyway
        self.tree.insert(self.boids.len(), entity.position);
        self.boids.push(entity);
    }

    fn restart(&mut self, entities: &[Boid]) {
        self.boids = entities.to_vec();
        // bounds and capacity are unchanged, only the occupancy resets
        let mut tree = QuadTree::new(*self.tree.bounds(), self.capacity);
        for (index, boid) in self.boids.iter().enumerate() {
            tree.insert(index, boid.position);
        }
        self.tree = tree;
    }

    fn view<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Boid> + 'a> {
        Box::new(self.boids.iter())
    }

    fn get_neighbours<'a>(&'a self, boid: &Boid, radius: f32) -> Vec<&'a Boid> {
        let region = Region::Circle(Circle::new(boid.position, radius));
        self.query_region(&region)
    }

    fn query_region<'a>(&'a self, region: &Region) -> Vec<&'a Boid> {
        self.tree
            .query(region)
            .into_iter()
            .map(|index| &self.boids[index])
            .collect()
    }

    fn get_no_entities(&self) -> usize {
        self.boids.len()
    }
}
