use glam::Vec2;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::geometry::Region;
use crate::options::{OptionsError, RunOptions, TrackerType};

pub mod naive_tracker;
pub mod quadtree_tracker;
pub mod tracker;

use naive_tracker::NaiveTracker;
use quadtree_tracker::QuadTreeTracker;
use tracker::Tracker;

/// The simulation context: owns the boids (through a tracker), the id
/// counter and the RNG. There is no ambient global state; everything a tick
/// needs arrives through `update`'s parameters.
pub struct Flock {
    tracker: Box<dyn Tracker>,
    rng: Xoshiro256PlusPlus,
    next_id: usize,
}

impl Flock {
    pub fn new(run_options: &RunOptions) -> Result<Self, OptionsError> {
        run_options.validate()?;

        let mut rng = match run_options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        let boids = get_boids(&mut rng, run_options);

        let tracker: Box<dyn Tracker> = match run_options.tracker_type {
            TrackerType::QuadTree => Box::new(QuadTreeTracker::new(&boids, run_options)),
            TrackerType::Naive => Box::new(NaiveTracker::new(&boids, run_options)),
        };

        debug!(
            "flock of {} boids in a {}x{} world ({:?} tracker)",
            boids.len(),
            run_options.world.width,
            run_options.world.height,
            run_options.tracker_type
        );

        Ok(Flock {
            tracker,
            rng,
            next_id: run_options.init_boids,
        })
    }

    /// One tick: the tracker rebuilds its spatial snapshot from the current
    /// positions, then every boid steers against that frozen snapshot and
    /// integrates over `dt`.
    pub fn update(&mut self, dt: f32, run_options: &RunOptions) {
        self.tracker.update(dt, run_options);
    }

    /// External spawn event (e.g. a pointer drag in a front end): a new boid
    /// at the given position with a randomized heading. Returns its id.
    pub fn spawn(&mut self, x: f32, y: f32, run_options: &RunOptions) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let boid = get_boid(&mut self.rng, x, y, id, run_options);
        self.tracker.insert_single(boid, run_options);

        id
    }

    /// Re-seeds the population, keeping tracker choice and options.
    pub fn restart(&mut self, run_options: &RunOptions) {
        let boids = get_boids(&mut self.rng, run_options);
        self.next_id = boids.len();
        self.tracker.restart(&boids);
    }

    /// Read-only snapshot of every boid, for rendering or capture.
    pub fn view<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Boid> + 'a> {
        self.tracker.view()
    }

    /// All boids whose position lies in `region`; lets a front end e.g.
    /// highlight boids under a cursor.
    pub fn query_region<'a>(&'a self, region: &Region) -> Vec<&'a Boid> {
        self.tracker.query_region(region)
    }

    pub fn get_no_entities(&self) -> usize {
        self.tracker.get_no_entities()
    }
}

fn get_boids(rng: &mut Xoshiro256PlusPlus, run_options: &RunOptions) -> Vec<Boid> {
    (0..run_options.init_boids)
        .map(|id| {
            let x = rng.gen::<f32>() * run_options.world.width;
            let y = rng.gen::<f32>() * run_options.world.height;
            get_boid(rng, x, y, id, run_options)
        })
        .collect()
}

/// New boid with a randomized heading at cruising speed.
fn get_boid(
    rng: &mut Xoshiro256PlusPlus,
    x: f32,
    y: f32,
    id: usize,
    run_options: &RunOptions,
) -> Boid {
    let heading = rng.gen::<f32>() * std::f32::consts::TAU;
    let velocity = Vec2::new(heading.cos(), heading.sin()) * run_options.max_speed;

    Boid::new(x, y, velocity, id)
}
