use glam::Vec2;

use crate::options::RunOptions;

#[derive(Debug, Clone, Copy)]
pub struct Boid {
    /// sequential id starting from 0; identity for self-exclusion in
    /// neighbourhood queries
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(x: f32, y: f32, velocity: Vec2, id: usize) -> Self {
        Boid {
            id,
            position: Vec2::new(x, y),
            velocity,
            acceleration: Vec2::ZERO,
        }
    }

    /// Sums the steering contributions for one tick.
    ///
    /// `neighbours` is the sight-radius neighbourhood, `close_neighbours` the
    /// tighter separation-distance one; both come from the same frozen
    /// spatial snapshot and both may contain this boid itself.
    pub fn run_rules(
        &self,
        neighbours: &[&Boid],
        close_neighbours: &[&Boid],
        run_options: &RunOptions,
    ) -> Vec2 {
        let mut sum = Vec2::ZERO;

        sum += self.group(neighbours, run_options);
        sum += self.alignment(neighbours, run_options);
        sum += self.separation(close_neighbours, run_options);

        if let Some(target) = run_options.target {
            if run_options.seek_on {
                sum += self.seek(target, run_options);
            }
            if run_options.flee_on {
                sum += self.flee(target, run_options);
            }
        }

        sum
    }

    /// Group (cohesion): steer towards the average position of the
    /// neighbourhood.
    pub fn group(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut center = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            if other.id == self.id {
                continue;
            }
            center += other.position;
            count += 1;
        }

        if count == 0 {
            return Vec2::ZERO;
        }
        center /= count as f32;

        self.steer_towards(center - self.position, run_options.group_weight, run_options)
    }

    /// Alignment: steer towards the average velocity of the neighbourhood.
    /// The average is used as the desired velocity as-is, without re-scaling
    /// to cruising speed.
    pub fn alignment(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut avg = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            if other.id == self.id {
                continue;
            }
            avg += other.velocity;
            count += 1;
        }

        if count == 0 {
            return Vec2::ZERO;
        }
        avg /= count as f32;

        (avg - self.velocity).clamp_length_max(run_options.alignment_weight)
    }

    /// Separation: per close neighbour, a push along the neighbour-to-self
    /// direction with magnitude 1/distance, so the closest neighbours repel
    /// disproportionately harder.
    pub fn separation(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut repulsion = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            if other.id == self.id {
                continue;
            }

            let to_self = self.position - other.position;
            let dist_sq = to_self.length_squared();
            if dist_sq == 0. {
                // exact coincidence gives no direction to push along
                continue;
            }

            // to_self / dist_sq == unit direction scaled by 1/dist
            repulsion += to_self / dist_sq;
            count += 1;
        }

        if count == 0 {
            return Vec2::ZERO;
        }
        repulsion /= count as f32;

        self.steer_towards(repulsion, run_options.separation_weight, run_options)
    }

    /// Seek: steer towards an externally supplied target point.
    pub fn seek(&self, target: Vec2, run_options: &RunOptions) -> Vec2 {
        self.steer_towards(target - self.position, run_options.seek_weight, run_options)
    }

    /// Flee: steer away from the target, but only inside the panic radius;
    /// beyond it the force is zero.
    pub fn flee(&self, target: Vec2, run_options: &RunOptions) -> Vec2 {
        let away = self.position - target;
        if away.length_squared() >= run_options.flee_panic_radius * run_options.flee_panic_radius {
            return Vec2::ZERO;
        }

        self.steer_towards(away, run_options.flee_weight, run_options)
    }

    /// Desired-velocity steering: head along `desired` at cruising speed,
    /// steering = desired - velocity, clamped to `max_force`. A zero-length
    /// `desired` contributes nothing rather than a NaN.
    fn steer_towards(&self, desired: Vec2, max_force: f32, run_options: &RunOptions) -> Vec2 {
        match desired.try_normalize() {
            Some(direction) => {
                (direction * run_options.max_speed - self.velocity).clamp_length_max(max_force)
            }
            None => Vec2::ZERO,
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Integrates acceleration and velocity over `dt`, clears the
    /// accumulator, then wraps the position at the world edges.
    pub fn update_location(&mut self, dt: f32, run_options: &RunOptions) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.acceleration = Vec2::ZERO;

        self.wrap(run_options.world.width, run_options.world.height);
    }

    fn wrap(&mut self, width: f32, height: f32) {
        if self.position.x > width {
            self.position.x = 0.;
        }
        if self.position.x < 0. {
            self.position.x = width;
        }
        if self.position.y > height {
            self.position.y = 0.;
        }
        if self.position.y < 0. {
            self.position.y = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;
    use rstest::rstest;

    use crate::options::RunOptions;

    use super::Boid;

    fn scenario_options() -> RunOptions {
        let mut ro = RunOptions::default();
        ro.max_speed = 3.;
        ro.group_weight = 0.1;
        ro.sight_radius = 64.;
        ro.separation_distance = 20.;
        ro
    }

    #[test]
    fn isolated_boid_feels_no_flocking_force() {
        let ro = RunOptions::default();
        let boid = Boid::new(100., 100., Vec2::new(1., 0.), 0);

        // the neighbourhood query always returns the boid itself
        let neighbours = [&boid];

        assert_eq!(boid.group(&neighbours, &ro), Vec2::ZERO);
        assert_eq!(boid.alignment(&neighbours, &ro), Vec2::ZERO);
        assert_eq!(boid.separation(&neighbours, &ro), Vec2::ZERO);
        assert_eq!(boid.run_rules(&neighbours, &neighbours, &ro), Vec2::ZERO);
    }

    #[test]
    fn two_boids_pull_together_and_push_apart() {
        let ro = scenario_options();
        let a = Boid::new(0., 0., Vec2::ZERO, 0);
        let b = Boid::new(10., 0., Vec2::ZERO, 1);
        let neighbours = [&a, &b];

        // cohesion pulls a towards b and b towards a, capped by the group
        // weight
        let group_a = a.group(&neighbours, &ro);
        let group_b = b.group(&neighbours, &ro);
        assert!(group_a.x > 0.);
        assert!(group_b.x < 0.);
        assert_relative_eq!(group_a.length(), ro.group_weight, epsilon = 1e-6);
        assert_relative_eq!(group_a.y, 0.);

        // 10 apart is within the separation distance, so separation pushes
        // the opposite way
        let sep_a = a.separation(&neighbours, &ro);
        let sep_b = b.separation(&neighbours, &ro);
        assert!(sep_a.x < 0.);
        assert!(sep_b.x > 0.);
        assert_relative_eq!(sep_a.y, 0.);

        // both terms present in the summed acceleration, correctly signed
        let sum_a = a.run_rules(&neighbours, &neighbours, &ro);
        assert_relative_eq!(sum_a.x, group_a.x + sep_a.x, epsilon = 1e-6);
    }

    #[test]
    fn closer_neighbours_repel_harder() {
        let ro = scenario_options();
        let boid = Boid::new(0., 0., Vec2::ZERO, 0);
        // near boid on the right, farther boid on the left: with the inverse
        // distance weighting the near push (1/2) beats the far push (1/12),
        // so the net repulsion points left
        let near = Boid::new(2., 0., Vec2::ZERO, 1);
        let far = Boid::new(-12., 0., Vec2::ZERO, 2);

        let force = boid.separation(&[&boid, &near, &far], &ro);

        assert!(force.x < 0.);
        assert_relative_eq!(force.y, 0.);
    }

    #[test]
    fn coincident_neighbour_contributes_nothing() {
        let ro = RunOptions::default();
        let a = Boid::new(50., 50., Vec2::new(1., 1.), 0);
        let b = Boid::new(50., 50., Vec2::new(-1., 1.), 1);

        let force = a.separation(&[&a, &b], &ro);

        assert_eq!(force, Vec2::ZERO);
        assert!(force.is_finite());
    }

    #[test]
    fn seek_steers_towards_target() {
        let ro = RunOptions::default();
        let boid = Boid::new(100., 100., Vec2::ZERO, 0);

        let force = boid.seek(Vec2::new(200., 100.), &ro);

        assert!(force.x > 0.);
        assert_relative_eq!(force.y, 0.);
        assert!(force.length() <= ro.seek_weight + 1e-6);
    }

    #[test]
    fn seek_at_target_is_zero() {
        let ro = RunOptions::default();
        let boid = Boid::new(100., 100., Vec2::ZERO, 0);

        assert_eq!(boid.seek(Vec2::new(100., 100.), &ro), Vec2::ZERO);
    }

    #[rstest]
    #[case(Vec2::new(150., 100.), true)] // inside the panic radius
    #[case(Vec2::new(300., 100.), false)] // outside, no force
    fn flee_only_inside_panic_radius(#[case] target: Vec2, #[case] expect_force: bool) {
        let mut ro = RunOptions::default();
        ro.flee_panic_radius = 100.;
        let boid = Boid::new(100., 100., Vec2::ZERO, 0);

        let force = boid.flee(target, &ro);

        if expect_force {
            assert!(force.x < 0., "should push away from the target");
        } else {
            assert_eq!(force, Vec2::ZERO);
        }
    }

    #[test]
    fn integration_accumulates_and_clears_forces() {
        let ro = RunOptions::default();
        let mut boid = Boid::new(10., 10., Vec2::ZERO, 0);

        boid.apply_force(Vec2::new(1., 0.));
        boid.apply_force(Vec2::new(0., 2.));
        boid.update_location(1., &ro);

        assert_relative_eq!(boid.velocity.x, 1.);
        assert_relative_eq!(boid.velocity.y, 2.);
        assert_relative_eq!(boid.position.x, 11.);
        assert_relative_eq!(boid.position.y, 12.);

        // accumulator is cleared; a force-free tick just coasts
        boid.update_location(1., &ro);
        assert_relative_eq!(boid.velocity.x, 1.);
        assert_relative_eq!(boid.position.x, 12.);
    }

    #[test]
    fn dt_scales_the_step() {
        let ro = RunOptions::default();
        let mut boid = Boid::new(0., 0., Vec2::new(2., 0.), 0);

        boid.update_location(0.5, &ro);

        assert_relative_eq!(boid.position.x, 1.);
    }

    #[rstest]
    #[case(Vec2::new(1281., 100.), Vec2::new(0., 100.))] // past the right edge
    #[case(Vec2::new(-1., 100.), Vec2::new(1280., 100.))] // past the left edge
    #[case(Vec2::new(100., 721.), Vec2::new(100., 0.))]
    #[case(Vec2::new(100., -1.), Vec2::new(100., 720.))]
    fn wrap_resets_to_opposite_edge(#[case] start: Vec2, #[case] expected: Vec2) {
        let ro = RunOptions::default();
        let mut boid = Boid::new(start.x, start.y, Vec2::ZERO, 0);

        boid.update_location(1., &ro);

        assert_eq!(boid.position, expected);
    }
}
