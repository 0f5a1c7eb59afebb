use glam::Vec2;

/// Shortest distance from `p` to the segment `a..b`.
/// A zero-length segment degenerates to the distance to `a`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Unit vector from `from` towards `to`, or zero when the points coincide.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Center of the grid cell containing `p`.
pub fn snap_to_grid(p: Vec2, cell: f32) -> Vec2 {
    (p / cell).floor() * cell + Vec2::splat(cell / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn segment_distance_projects_onto_interior() {
        let d = distance_to_segment(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < EPS);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!((distance_to_segment(Vec2::new(-3.0, 4.0), a, b) - 5.0).abs() < EPS);
        assert!((distance_to_segment(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < EPS);
    }

    #[test]
    fn zero_length_segment_is_a_point() {
        let a = Vec2::new(2.0, 2.0);
        assert!((distance_to_segment(Vec2::new(5.0, 6.0), a, a) - 5.0).abs() < EPS);
    }

    #[test]
    fn direction_is_unit_or_zero() {
        let d = direction(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert!((d.length() - 1.0).abs() < EPS);
        assert!((d.x - 0.6).abs() < EPS);

        assert_eq!(direction(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), Vec2::ZERO);
    }

    #[test]
    fn snapping_picks_cell_center() {
        assert_eq!(snap_to_grid(Vec2::new(0.0, 0.0), 40.0), Vec2::new(20.0, 20.0));
        assert_eq!(snap_to_grid(Vec2::new(79.9, 41.0), 40.0), Vec2::new(60.0, 60.0));
        assert_eq!(snap_to_grid(Vec2::new(80.0, 119.0), 40.0), Vec2::new(100.0, 100.0));
    }
}
