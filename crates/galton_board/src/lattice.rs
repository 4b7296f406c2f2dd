use glam::Vec2;

use crate::settings::BoardSettings;

/// Gap between the underside of a pin and the point a particle bounces off.
const COLLISION_CLEARANCE: f32 = 0.1;

/// Triangular pin layout. Row 0 is the apex; rows grow upward and widen by
/// one column each.
#[derive(Debug, Clone)]
pub struct Lattice {
    pin_rows: usize,
    start: Vec2,
    vertical_gap: f32,
    horizontal_gap: f32,
    pin_size: f32,
}

impl Lattice {
    pub fn new(settings: &BoardSettings) -> Self {
        Self {
            pin_rows: settings.pin_rows,
            start: Vec2::new(settings.start_x, settings.start_y),
            vertical_gap: settings.vertical_gap,
            horizontal_gap: settings.horizontal_gap,
            pin_size: settings.pin_size,
        }
    }

    pub fn pin_rows(&self) -> usize {
        self.pin_rows
    }

    fn node(&self, row: usize, col: usize) -> Vec2 {
        let y = self.start.y + row as f32 * self.vertical_gap;
        let x_start = self.start.x - row as f32 * self.horizontal_gap;
        Vec2::new(x_start + col as f32 * self.horizontal_gap * 2.0, y)
    }

    /// Centers of every pin, row by row.
    pub fn pin_positions(&self) -> Vec<Vec2> {
        (0..self.pin_rows)
            .flat_map(|row| (0..=row).map(move |col| (row, col)))
            .map(|(row, col)| self.node(row, col))
            .collect()
    }

    /// Bounce points just below each pin, including one extra row past the
    /// last pins where the bins start. Indexed `[row][col]` with `col <= row`.
    pub fn collision_points(&self) -> Vec<Vec<Vec2>> {
        (0..=self.pin_rows)
            .map(|row| {
                (0..=row)
                    .map(|col| {
                        self.node(row, col) - Vec2::Y * (self.pin_size + COLLISION_CLEARANCE)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn pin_count_is_triangular() {
        let lattice = Lattice::new(&BoardSettings::default());
        assert_eq!(lattice.pin_positions().len(), 7 * 8 / 2);
    }

    #[test]
    fn pins_widen_symmetrically_around_apex() {
        let lattice = Lattice::new(&BoardSettings::default());
        let pins = lattice.pin_positions();

        assert!(approx(pins[0], Vec2::new(-3.0, -3.0)));
        // Row 1: two pins at apex.x -/+ horizontal gap.
        assert!(approx(pins[1], Vec2::new(-3.4, -2.4)));
        assert!(approx(pins[2], Vec2::new(-2.6, -2.4)));
    }

    #[test]
    fn collision_points_sit_below_pins() {
        let settings = BoardSettings::default();
        let lattice = Lattice::new(&settings);
        let points = lattice.collision_points();

        assert_eq!(points.len(), settings.pin_rows + 1);
        for (row, cols) in points.iter().enumerate() {
            assert_eq!(cols.len(), row + 1);
        }
        assert!(approx(points[0][0], Vec2::new(-3.0, -3.3)));
        // Extra row past the last pins: x from -5.8 to -0.2.
        assert!(approx(points[7][0], Vec2::new(-5.8, 0.9)));
        assert!(approx(points[7][7], Vec2::new(-0.2, 0.9)));
    }
}
