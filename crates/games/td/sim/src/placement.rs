use crate::geometry::{distance_to_segment, snap_to_grid};
use glam::Vec2;

/// Grid snapping plus path-clearance and overlap checks for new towers.
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    pub grid_size: f32,
    pub width: f32,
    pub height: f32,
    pub path: &'a [Vec2],
}

impl Placement<'_> {
    /// Snapped cell center for a raw cursor position, or None when the cell
    /// is off the field, within one cell of the path, or already taken.
    pub fn validate(&self, raw: Vec2, occupied: impl IntoIterator<Item = Vec2>) -> Option<Vec2> {
        if raw.x < 0.0 || raw.y < 0.0 || raw.x >= self.width || raw.y >= self.height {
            return None;
        }

        let cell = snap_to_grid(raw, self.grid_size);

        let too_close = self
            .path
            .windows(2)
            .any(|seg| distance_to_segment(cell, seg[0], seg[1]) < self.grid_size);
        if too_close {
            return None;
        }

        if occupied.into_iter().any(|p| p == cell) {
            return None;
        }

        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TdConfig;

    fn check(config: &TdConfig, raw: Vec2, occupied: &[Vec2]) -> Option<Vec2> {
        Placement {
            grid_size: config.grid_size,
            width: config.width,
            height: config.height,
            path: &config.path,
        }
        .validate(raw, occupied.iter().copied())
    }

    #[test]
    fn accepts_open_cell_and_snaps() {
        let config = TdConfig::default();
        assert_eq!(
            check(&config, Vec2::new(91.0, 115.0), &[]),
            Some(Vec2::new(100.0, 100.0))
        );
    }

    #[test]
    fn rejects_cells_on_or_near_path() {
        let config = TdConfig::default();
        // first segment runs along y = 300
        assert_eq!(check(&config, Vec2::new(50.0, 300.0), &[]), None);
        // cell center (60, 340) is exactly 40 away, which is allowed
        assert!(check(&config, Vec2::new(50.0, 330.0), &[]).is_some());
        // a cell centered 20 px off the vertical leg at x = 200
        assert_eq!(check(&config, Vec2::new(225.0, 200.0), &[]), None);
    }

    #[test]
    fn rejects_occupied_cell() {
        let config = TdConfig::default();
        let taken = [Vec2::new(100.0, 100.0)];
        assert_eq!(check(&config, Vec2::new(85.0, 85.0), &taken), None);
        assert!(check(&config, Vec2::new(140.0, 100.0), &taken).is_some());
    }

    #[test]
    fn rejects_off_field() {
        let config = TdConfig::default();
        assert_eq!(check(&config, Vec2::new(-1.0, 100.0), &[]), None);
        assert_eq!(check(&config, Vec2::new(100.0, 600.0), &[]), None);
    }
}
