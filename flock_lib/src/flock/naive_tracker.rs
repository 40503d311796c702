use glam::Vec2;

use crate::boid::Boid;
use crate::geometry::Region;
use crate::options::RunOptions;

use super::tracker::Tracker;

/// Brute-force tracking: every neighbourhood query is a linear scan over the
/// whole population, O(n^2) per tick. Kept as the reference implementation
/// the quadtree tracker is checked and benchmarked against.
pub struct NaiveTracker {
    boids: Vec<Boid>,
}

impl NaiveTracker {
    pub fn get_neighbours_naive<'a>(
        boid: &Boid,
        all_boids: &'a [Boid],
        radius: f32,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        for b_other in all_boids {
            if b_other.position.distance_squared(boid.position) < radius * radius {
                neighbours.push(b_other);
            }
        }
    }
}

impl Tracker for NaiveTracker {
    fn new(entities: &[Boid], _run_options: &RunOptions) -> Self {
        NaiveTracker {
            boids: entities.to_vec(),
        }
    }

    fn update(&mut self, dt: f32, run_options: &RunOptions) {
        let mut accelerations: Vec<Vec2> = Vec::with_capacity(self.boids.len());

        {
            let mut neighbours: Vec<&Boid> = Vec::new();
            let mut close_neighbours: Vec<&Boid> = Vec::new();

            for boid in self.boids.iter() {
                neighbours.clear();
                close_neighbours.clear();

                Self::get_neighbours_naive(
                    boid,
                    &self.boids,
                    run_options.sight_radius,
                    &mut neighbours,
                );
                Self::get_neighbours_naive(
                    boid,
                    &self.boids,
                    run_options.separation_distance,
                    &mut close_neighbours,
                );

                accelerations.push(boid.run_rules(&neighbours, &close_neighbours, run_options));
            }
        }

        for (boid, acceleration) in self.boids.iter_mut().zip(accelerations) {
            boid.apply_force(acceleration);
            boid.update_location(dt, run_options);
        }
    }

    fn insert_single(&mut self, entity: Boid, _run_options: &RunOptions) {
        self.boids.push(entity);
    }

    fn restart(&mut self, entities: &[Boid]) {
        self.boids = entities.to_vec();
    }

    fn view<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Boid> + 'a> {
        Box::new(self.boids.iter())
    }

    fn get_neighbours<'a>(&'a self, boid: &Boid, radius: f32) -> Vec<&'a Boid> {
        let mut neighbours = Vec::new();
        Self::get_neighbours_naive(boid, &self.boids, radius, &mut neighbours);
        neighbours
    }

    fn query_region<'a>(&'a self, region: &Region) -> Vec<&'a Boid> {
        self.boids
            .iter()
            .filter(|boid| region.contains(boid.position))
            .collect()
    }

    fn get_no_entities(&self) -> usize {
        self.boids.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::boid::Boid;
    use crate::flock::tracker::Tracker;
    use crate::options::RunOptions;

    use super::NaiveTracker;

    #[test]
    fn neighbourhood_includes_self_and_respects_radius() {
        let ro = RunOptions::default();
        let boids = vec![
            Boid::new(0., 0., Vec2::ZERO, 0),
            Boid::new(10., 0., Vec2::ZERO, 1),
            Boid::new(100., 0., Vec2::ZERO, 2),
        ];
        let tracker = NaiveTracker::new(&boids, &ro);

        let neighbours = tracker.get_neighbours(&boids[0], 64.);
        let mut ids: Vec<usize> = neighbours.iter().map(|boid| boid.id).collect();
        ids.sort_unstable();

        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn radius_is_strict() {
        let ro = RunOptions::default();
        let boids = vec![
            Boid::new(0., 0., Vec2::ZERO, 0),
            Boid::new(64., 0., Vec2::ZERO, 1),
        ];
        let tracker = NaiveTracker::new(&boids, &ro);

        let neighbours = tracker.get_neighbours(&boids[0], 64.);

        assert_eq!(neighbours.len(), 1, "a boid exactly at the radius is out");
    }
}
