use std::fs::OpenOptions;
use std::mem;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::flock::Flock;
use crate::options::SaveOptions;

/// One sampled observation of one boid.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct BoidData {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// sample counter, ticks / sample_rate
    pub time: u64,
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Accumulates periodic snapshots of the flock for later analysis.
pub struct Birdwatcher {
    locations: Vec<BoidData>,
    render_ticker: u64,
    sample_rate: u64,
}

const PREFIX: &str = "flock-data";

impl Birdwatcher {
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            render_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection; a no-op on off-sample ticks.
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let time = self.render_ticker / self.sample_rate;
        self.locations.extend(flock.view().map(|boid| BoidData {
            id: boid.id,
            x: boid.position.x,
            y: boid.position.y,
            vx: boid.velocity.x,
            vy: boid.velocity.y,
            time,
        }));
    }

    pub fn restart(&mut self) {
        self.locations.clear();
        self.render_ticker = 0;
    }

    /// Drains the accumulated data, ordered by sample time then boid id.
    pub fn pop_data(&mut self) -> Vec<BoidData> {
        mem::take(&mut self.locations)
            .into_iter()
            .sorted_by_key(|data| (data.time, data.id))
            .collect()
    }

    /// Saves the accumulated data as CSV, then returns it while emptying the
    /// birdwatcher's memory.
    ///
    /// Depending on save options, either overwrites a fixed file name or
    /// writes a new timestamped file.
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<BoidData>, CaptureError> {
        let data = self.pop_data();

        if !save_options.save_locations {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_locations_path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = Birdwatcher::get_dataset_name(save_options, Utc::now())
            );

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for data_point in &data {
                wtr.serialize(data_point)?;
            }
            wtr.flush()?;
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_locations_timestamp {
            true => format!("{PREFIX}_{datetime}.csv", datetime = now.timestamp_millis()),
            false => format!("{PREFIX}.csv"),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;

        self.render_ticker % self.sample_rate == 0
    }
}
