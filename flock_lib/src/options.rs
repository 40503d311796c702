use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Rect;

/// Tunables for a run. Read-only during a tick; the caller may adjust fields
/// in between ticks (weights in particular are meant to be live-tuned by an
/// outer control layer).
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub init_boids: usize,
    pub world: WorldSize,

    /// cruising speed; every desired velocity is scaled to this magnitude
    pub max_speed: f32,

    // per-force magnitude caps
    pub group_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub seek_weight: f32,
    pub flee_weight: f32,

    /// neighbourhood radius for the group and alignment rules
    pub sight_radius: f32,
    /// tighter radius for the separation rule
    pub separation_distance: f32,
    /// distance to the target under which flee starts pushing away
    pub flee_panic_radius: f32,

    pub seek_on: bool,
    pub flee_on: bool,
    /// pointer/goal position consumed by seek and flee
    pub target: Option<Vec2>,

    /// leaf split threshold of the spatial index
    pub quadtree_capacity: usize,
    pub tracker_type: TrackerType,

    /// seeds the flock RNG; `None` draws a seed from the OS
    pub seed: Option<u64>,

    pub sample_rate: u64,
    pub save_options: SaveOptions,
}

impl RunOptions {
    /// Rejects configurations that would push garbage geometry through the
    /// tree or NaN through the steering math.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.world.width > 0. && self.world.height > 0.) {
            return Err(OptionsError::NonPositiveWorld {
                width: self.world.width,
                height: self.world.height,
            });
        }

        if self.quadtree_capacity == 0 {
            return Err(OptionsError::ZeroCapacity);
        }

        let non_negative = [
            ("max_speed", self.max_speed),
            ("group_weight", self.group_weight),
            ("alignment_weight", self.alignment_weight),
            ("separation_weight", self.separation_weight),
            ("seek_weight", self.seek_weight),
            ("flee_weight", self.flee_weight),
            ("sight_radius", self.sight_radius),
            ("separation_distance", self.separation_distance),
            ("flee_panic_radius", self.flee_panic_radius),
        ];
        for (name, value) in non_negative {
            if !(value >= 0. && value.is_finite()) {
                return Err(OptionsError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        let init_boids = 100;
        let world = WorldSize {
            width: 1280.,
            height: 720.,
        };

        let max_speed = 3.;

        let group_weight = 0.15;
        let alignment_weight = 0.2;
        let separation_weight = 0.7;
        let seek_weight = 0.5;
        let flee_weight = 0.5;

        let sight_radius = 64.;
        let separation_distance = 20.;
        let flee_panic_radius = 100.;

        RunOptions {
            init_boids,
            world,
            max_speed,
            group_weight,
            alignment_weight,
            separation_weight,
            seek_weight,
            flee_weight,
            sight_radius,
            separation_distance,
            flee_panic_radius,
            seek_on: false,
            flee_on: false,
            target: None,
            quadtree_capacity: 4,
            tracker_type: TrackerType::QuadTree,
            seed: None,
            sample_rate: 1,
            save_options: SaveOptions {
                save_locations: false,
                save_locations_path: Some("./".to_owned()),
                save_locations_timestamp: true,
            },
        }
    }
}

/// Simulation world, `[0, width] x [0, height]`.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    /// The world as a bounding box, e.g. for the spatial index root.
    pub fn rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.width / 2., self.height / 2.),
            self.width,
            self.height,
        )
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrackerType {
    QuadTree,
    Naive,
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub save_locations: bool,
    pub save_locations_path: Option<String>,
    pub save_locations_timestamp: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    NonPositiveWorld { width: f32, height: f32 },
    #[error("quadtree leaf capacity must be at least 1")]
    ZeroCapacity,
    #[error("{name} must be a non-negative finite number, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{OptionsError, RunOptions};

    #[test]
    fn default_options_are_valid() {
        assert_eq!(RunOptions::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_world() {
        let mut ro = RunOptions::default();
        ro.world.width = 0.;

        assert!(matches!(
            ro.validate(),
            Err(OptionsError::NonPositiveWorld { .. })
        ));
    }

    #[test]
    fn rejects_zero_capacity() {
        let mut ro = RunOptions::default();
        ro.quadtree_capacity = 0;

        assert_eq!(ro.validate(), Err(OptionsError::ZeroCapacity));
    }

    #[rstest]
    #[case(-1.)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn rejects_degenerate_radii(#[case] value: f32) {
        let mut ro = RunOptions::default();
        ro.sight_radius = value;

        assert!(matches!(
            ro.validate(),
            Err(OptionsError::InvalidParameter {
                name: "sight_radius",
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_weights() {
        let mut ro = RunOptions::default();
        ro.separation_weight = -0.1;

        assert!(matches!(
            ro.validate(),
            Err(OptionsError::InvalidParameter {
                name: "separation_weight",
                ..
            })
        ));
    }
}
