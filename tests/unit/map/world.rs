//! Tests for cell and world-position conversion

#[cfg(test)]
mod tests {
    use tilepath::map::world::{WorldPosition, cell_center, cell_containing};
    use tilepath::spatial::index::Cell;

    // Tests cell centers scale with the tile size
    // Verified by dividing by the tile size instead
    #[test]
    fn test_cell_center_scales() {
        assert_eq!(
            cell_center(Cell::new(3, -2), 2.0),
            WorldPosition::new(6.0, 0.0, -4.0)
        );
        assert_eq!(
            cell_center(Cell::new(0, 0), 0.5),
            WorldPosition::default()
        );
    }

    // Tests nearest-cell lookup with halves rounding to even
    // Verified by using round instead of round_ties_even
    #[test]
    fn test_cell_containing_rounds_half_to_even() {
        let at = |x: f32, z: f32| cell_containing(WorldPosition::new(x, 0.0, z), 1.0);

        assert_eq!(at(0.4, -0.4), Some(Cell::new(0, 0)));
        assert_eq!(at(0.5, 1.5), Some(Cell::new(0, 2)));
        assert_eq!(at(2.5, -0.5), Some(Cell::new(2, 0)));
        assert_eq!(at(-1.6, 3.49), Some(Cell::new(-2, 3)));
    }

    // Tests conversion round-trips through a non-unit tile size
    // Verified by ignoring the tile size in cell_containing
    #[test]
    fn test_center_maps_back_to_cell() {
        for cell in [Cell::new(7, -3), Cell::new(-120, 45), Cell::new(0, 0)] {
            assert_eq!(cell_containing(cell_center(cell, 2.5), 2.5), Some(cell));
        }
        // Vertical offset plays no part
        assert_eq!(
            cell_containing(WorldPosition::new(5.0, 100.0, 5.0), 2.5),
            Some(Cell::new(2, 2))
        );
    }

    // Tests positions that cannot become a cell
    // Verified by saturating instead of rejecting
    #[test]
    fn test_cell_containing_rejects_unrepresentable() {
        assert_eq!(cell_containing(WorldPosition::new(f32::NAN, 0.0, 0.0), 1.0), None);
        assert_eq!(cell_containing(WorldPosition::new(0.0, 0.0, f32::INFINITY), 1.0), None);
        assert_eq!(cell_containing(WorldPosition::new(1e12, 0.0, 0.0), 1.0), None);
    }

    // Tests straight-line distance in three dimensions
    // Verified by omitting the vertical term
    #[test]
    fn test_distance() {
        let a = WorldPosition::new(1.0, 2.0, 3.0);
        let b = WorldPosition::new(4.0, 6.0, 3.0);

        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
        assert!(a.distance(&a).abs() < f32::EPSILON);
    }
}
