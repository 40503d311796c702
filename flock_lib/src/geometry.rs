use glam::Vec2;

/// Axis-aligned bounding box, stored as center plus half-extents with the
/// four edges cached at construction.
///
/// World coordinates run `[0, width]` left to right and `[0, height]` bottom
/// to top, so `bottom = cy - hh` and `top = cy + hh`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl Rect {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        let half_width = width / 2.;
        let half_height = height / 2.;

        Rect {
            center,
            half_width,
            half_height,
            left: center.x - half_width,
            right: center.x + half_width,
            bottom: center.y - half_height,
            top: center.y + half_height,
        }
    }

    /// True iff the point lies within the box, all four edges inclusive.
    /// NaN coordinates are never contained.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }

    /// Standard AABB overlap test; touching edges count as intersecting.
    pub fn intersects_rect(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.bottom <= other.top
            && self.top >= other.bottom
    }

    /// Closest-point test. Clamping the circle center onto the box covers the
    /// inside, edge and corner regions in one expression; a per-axis distance
    /// check would accept circles diagonally off a corner that do not reach it.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        let closest = circle.center.clamp(
            Vec2::new(self.left, self.bottom),
            Vec2::new(self.right, self.top),
        );

        circle.center.distance_squared(closest) <= circle.radius * circle.radius
    }

    pub fn intersects(&self, region: &Region) -> bool {
        match region {
            Region::Rect(rect) => self.intersects_rect(rect),
            Region::Circle(circle) => self.intersects_circle(circle),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Circle { center, radius }
    }

    /// Strictly inside, the circumference itself excluded.
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) < self.radius * self.radius
    }
}

/// Query shape for spatial range lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Rect(Rect),
    Circle(Circle),
}

impl Region {
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Region::Rect(rect) => rect.contains(point),
            Region::Circle(circle) => circle.contains(point),
        }
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Region::Rect(rect)
    }
}

impl From<Circle> for Region {
    fn from(circle: Circle) -> Self {
        Region::Circle(circle)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rstest::rstest;

    use super::{Circle, Rect, Region};

    fn unit_rect() -> Rect {
        Rect::new(Vec2::new(0., 0.), 10., 10.)
    }

    #[rstest]
    #[case(Vec2::new(0., 0.), true)]
    #[case(Vec2::new(5., 5.), true)] // corners are inclusive
    #[case(Vec2::new(-5., -5.), true)]
    #[case(Vec2::new(5., -5.), true)]
    #[case(Vec2::new(5.001, 0.), false)]
    #[case(Vec2::new(0., -5.001), false)]
    fn rect_contains(#[case] point: Vec2, #[case] expected: bool) {
        assert_eq!(unit_rect().contains(point), expected);
    }

    #[test]
    fn rect_never_contains_nan() {
        assert!(!unit_rect().contains(Vec2::new(f32::NAN, 0.)));
        assert!(!unit_rect().contains(Vec2::new(0., f32::NAN)));
    }

    #[rstest]
    #[case(Rect::new(Vec2::new(8., 0.), 10., 10.), true)] // overlap on x
    #[case(Rect::new(Vec2::new(10., 0.), 10., 10.), true)] // touching edges
    #[case(Rect::new(Vec2::new(11., 0.), 10., 10.), false)]
    #[case(Rect::new(Vec2::new(0., 12.), 10., 2.), false)] // past the top
    #[case(Rect::new(Vec2::new(0., 0.), 1., 1.), true)] // fully inside
    fn rect_intersects_rect(#[case] other: Rect, #[case] expected: bool) {
        assert_eq!(unit_rect().intersects_rect(&other), expected);
        assert_eq!(other.intersects_rect(&unit_rect()), expected);
    }

    #[rstest]
    // center inside the box
    #[case(Circle::new(Vec2::new(0., 0.), 1.), true)]
    // edge region: closest point is (5, 0)
    #[case(Circle::new(Vec2::new(6., 0.), 1.), true)]
    #[case(Circle::new(Vec2::new(6.1, 0.), 1.), false)]
    // corner region: closest point is (5, 5), distance sqrt(2) from (6, 6);
    // a per-axis check would pass the first case wrongly
    #[case(Circle::new(Vec2::new(6., 6.), 1.), false)]
    #[case(Circle::new(Vec2::new(6., 6.), 1.5), true)]
    fn rect_intersects_circle(#[case] circle: Circle, #[case] expected: bool) {
        assert_eq!(unit_rect().intersects_circle(&circle), expected);
    }

    #[test]
    fn circle_contains_is_strict() {
        let circle = Circle::new(Vec2::new(0., 0.), 5.);

        assert!(circle.contains(Vec2::new(0., 0.)));
        assert!(circle.contains(Vec2::new(4.999, 0.)));
        assert!(!circle.contains(Vec2::new(5., 0.)));
        assert!(!circle.contains(Vec2::new(3.6, 3.6)));
    }

    #[test]
    fn region_dispatches_containment() {
        let rect_region = Region::from(unit_rect());
        let circle_region = Region::from(Circle::new(Vec2::new(0., 0.), 5.));

        // on the rim: inside the inclusive box, outside the strict circle
        assert!(rect_region.contains(Vec2::new(5., 0.)));
        assert!(!circle_region.contains(Vec2::new(5., 0.)));
    }
}
