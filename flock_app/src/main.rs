mod cliargs;

use std::fs;
use std::time::Instant;

use clap_serde_derive::clap::Parser;
use clap_serde_derive::ClapSerde;
use log::{error, info};

use flock_lib::birdwatcher::Birdwatcher;
use flock_lib::flock::Flock;
use flock_lib::options::{RunOptions, TrackerType};

use cliargs::{Args, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = Args::parse();
    let config = match fs::read_to_string(&args.config_path) {
        Ok(content) => match toml::from_str::<<Config as ClapSerde>::Opt>(&content) {
            Ok(file_config) => Config::from(file_config).merge(&mut args.config),
            Err(err) => {
                error!("error in configuration file: {err}");
                return Err(err.into());
            }
        },
        Err(_) => Config::from(&mut args.config),
    };

    let ro = to_run_options(&config);
    let mut flock = Flock::new(&ro)?;
    let mut bird_watcher = Birdwatcher::new(ro.sample_rate);

    info!(
        "running {} ticks over {} boids ({:?} tracker)",
        config.ticks, config.no_boids, ro.tracker_type
    );

    let started = Instant::now();
    let mut last_tick = started;
    for tick in 0..config.ticks {
        let dt = if config.realtime {
            let now = Instant::now();
            let dt = (now - last_tick).as_secs_f32();
            last_tick = now;
            dt
        } else {
            1.
        };

        if config.spawn_every != 0 && tick % config.spawn_every == 0 {
            flock.spawn(ro.world.width / 2., ro.world.height / 2., &ro);
        }

        flock.update(dt, &ro);
        bird_watcher.watch(&flock);

        if tick % 500 == 0 {
            info!("tick {tick}, {} boids", flock.get_no_entities());
        }
    }

    let data = bird_watcher.pop_data_save(&ro.save_options)?;
    info!(
        "finished {} ticks in {:.2?}, {} samples collected",
        config.ticks,
        started.elapsed(),
        data.len()
    );

    Ok(())
}

fn to_run_options(config: &Config) -> RunOptions {
    let mut ro = RunOptions::default();

    ro.init_boids = config.no_boids;
    ro.world.width = config.world_width;
    ro.world.height = config.world_height;
    ro.max_speed = config.max_speed;
    ro.sight_radius = config.sight_radius;
    ro.separation_distance = config.separation_distance;
    ro.group_weight = config.group_weight;
    ro.alignment_weight = config.alignment_weight;
    ro.separation_weight = config.separation_weight;
    ro.seek_weight = config.seek_weight;
    ro.flee_weight = config.flee_weight;
    ro.flee_panic_radius = config.flee_panic_radius;
    ro.quadtree_capacity = config.quadtree_capacity;
    ro.tracker_type = if config.naive {
        TrackerType::Naive
    } else {
        TrackerType::QuadTree
    };
    ro.seed = match config.seed {
        0 => None,
        seed => Some(seed),
    };
    ro.sample_rate = config.sample_rate;
    ro.save_options.save_locations = config.save;
    ro.save_options.save_locations_timestamp = config.save_timestamp;

    ro
}
