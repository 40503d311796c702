use clap_serde_derive::{
    clap::{self, Parser},
    ClapSerde,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Headless driver for the quadtree-accelerated flocking simulation.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde)]
/// Programmatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the
/// `-c` or `--config` arg option
pub struct Config {
    #[default(100)]
    #[arg(short = 'n', long)]
    /// number of boids at startup
    pub no_boids: usize,

    #[default(1000)]
    #[arg(long)]
    /// number of simulation ticks to run
    pub ticks: u64,

    #[default(false)]
    #[arg(long)]
    /// advance by measured wall-clock seconds instead of one unit per tick
    pub realtime: bool,

    #[default(1280.)]
    #[arg(short = 'x', long)]
    pub world_width: f32,

    #[default(720.)]
    #[arg(short = 'y', long)]
    pub world_height: f32,

    #[default(3.)]
    #[arg(long)]
    /// cruising speed
    pub max_speed: f32,

    #[default(64.)]
    #[arg(long = "sight")]
    pub sight_radius: f32,

    #[default(20.)]
    #[arg(long = "sep_dist")]
    pub separation_distance: f32,

    #[default(0.15)]
    #[arg(long = "group")]
    pub group_weight: f32,

    #[default(0.2)]
    #[arg(long = "align")]
    pub alignment_weight: f32,

    #[default(0.7)]
    #[arg(long = "separate")]
    pub separation_weight: f32,

    #[default(0.5)]
    #[arg(long = "seek")]
    pub seek_weight: f32,

    #[default(0.5)]
    #[arg(long = "flee")]
    pub flee_weight: f32,

    #[default(100.)]
    #[arg(long = "panic")]
    pub flee_panic_radius: f32,

    #[default(4)]
    #[arg(long = "capacity")]
    /// quadtree leaf capacity
    pub quadtree_capacity: usize,

    #[default(false)]
    #[arg(long)]
    /// use the naive O(n^2) tracker instead of the quadtree
    pub naive: bool,

    #[default(0)]
    #[arg(long)]
    /// RNG seed; 0 draws one from the OS
    pub seed: u64,

    #[default(0)]
    #[arg(long)]
    /// spawn one extra boid every N ticks, 0 disables
    pub spawn_every: u64,

    #[default(1)]
    #[arg(short = 'r', long)]
    /// ratio of ticks/sample_rate, e.g. 4 = sample every 4th tick
    pub sample_rate: u64,

    #[default(true)]
    #[arg(short = 's', long)]
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,
}
