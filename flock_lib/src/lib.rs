use thiserror::Error;

use birdwatcher::{Birdwatcher, BoidData, CaptureError};
use flock::Flock;
use options::{OptionsError, RunOptions};

pub mod birdwatcher;
pub mod boid;
pub mod flock;
pub mod geometry;
pub mod options;
pub mod quadtree;

#[derive(Debug, Error)]
pub enum FlockError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Runs a headless simulation for `no_iter` fixed-step ticks and returns the
/// sampled data, saving it according to the run options.
pub fn flock_base(no_iter: u64, run_options: RunOptions) -> Result<Vec<BoidData>, FlockError> {
    let ro = run_options;
    let mut flock = Flock::new(&ro)?;
    let mut bird_watcher = Birdwatcher::new(ro.sample_rate);

    (0..no_iter).for_each(|_| {
        flock.update(1., &ro);
        bird_watcher.watch(&flock);
    });

    let data = bird_watcher.pop_data_save(&ro.save_options)?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use crate::options::RunOptions;

    use super::flock_base;

    #[test]
    fn headless_run_collects_samples() {
        let mut ro = RunOptions::default();
        ro.init_boids = 10;
        ro.seed = Some(3);
        ro.sample_rate = 5;
        ro.save_options.save_locations = false;

        let data = flock_base(20, ro).unwrap();

        // 4 samples of 10 boids
        assert_eq!(data.len(), 40);
    }
}
