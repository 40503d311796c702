use crate::boid::Boid;
use crate::geometry::Region;
use crate::options::RunOptions;

/// Seam between the flock and its spatial bookkeeping: a tracker owns the
/// boids, keeps whatever index structure it needs to answer neighbourhood
/// queries, and advances the simulation by one tick at a time.
pub trait Tracker {
    fn new(entities: &[Boid], run_options: &RunOptions) -> Self
    where
        Self: Sized;

    /// One tick. Implementations rebuild their spatial snapshot first, then
    /// steer and integrate every boid against that same frozen snapshot; a
    /// boid's movement within a tick must never leak into another boid's
    /// neighbourhood query of the same tick.
    fn update(&mut self, dt: f32, run_options: &RunOptions);

    fn insert_single(&mut self, entity: Boid, run_options: &RunOptions);

    fn restart(&mut self, entities: &[Boid]);

    fn view<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Boid> + 'a>;

    /// All boids strictly within `radius` of `boid`'s position. The result
    /// includes `boid` itself; callers discount it by id.
    fn get_neighbours<'a>(&'a self, boid: &Boid, radius: f32) -> Vec<&'a Boid>;

    /// All boids whose position lies in `region`.
    fn query_region<'a>(&'a self, region: &Region) -> Vec<&'a Boid>;

    fn get_no_entities(&self) -> usize;
}
