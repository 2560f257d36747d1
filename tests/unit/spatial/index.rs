//! Tests for cell hashing, range checks and hash inversion

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use tilepath::TileMapError;
    use tilepath::spatial::index::{Cell, CellHash, SpatialIndex};

    // Tests the documented range for the default column count
    // Verified by computing max_coordinate as full - half
    #[test]
    fn test_default_range_bounds() {
        let index = SpatialIndex::new(10_000).unwrap();

        assert_eq!(index.min_coordinate(), -5000);
        assert_eq!(index.max_coordinate(), 4999);
        assert_eq!(index.full_range(), 10_000);
    }

    // Tests the corner hashes of the default range
    // Verified by swapping the column and row terms
    #[test]
    fn test_hash_corners() {
        let index = SpatialIndex::new(10_000).unwrap();

        assert_eq!(index.hash(Cell::new(-5000, -5000)).unwrap(), CellHash(0));
        assert_eq!(index.hash(Cell::new(4999, -5000)).unwrap(), CellHash(9999));
        assert_eq!(index.hash(Cell::new(-5000, -4999)).unwrap(), CellHash(10_000));
        assert_eq!(
            index.hash(Cell::new(4999, 4999)).unwrap(),
            CellHash(99_999_999)
        );
        assert_eq!(index.hash(Cell::new(0, 0)).unwrap(), CellHash(50_005_000));
    }

    // Tests that every in-range cell of a small index hashes uniquely
    // Verified by dropping the row multiplier
    #[test]
    fn test_hash_injective_on_small_index() {
        let index = SpatialIndex::new(7).unwrap();
        let mut seen = HashSet::new();

        for x in index.min_coordinate()..=index.max_coordinate() {
            for z in index.min_coordinate()..=index.max_coordinate() {
                assert!(seen.insert(index.hash(Cell::new(x, z)).unwrap()));
            }
        }

        assert_eq!(seen.len(), 49);
        assert_eq!(seen.iter().max(), Some(&CellHash(48)));
    }

    // Tests that a cell one past either bound is rejected
    // Verified by using an exclusive lower bound in contains
    #[test]
    fn test_out_of_range_cells_rejected() {
        let index = SpatialIndex::new(10_000).unwrap();

        for cell in [
            Cell::new(5000, 0),
            Cell::new(0, 5000),
            Cell::new(-5001, 0),
            Cell::new(0, -5001),
            Cell::new(i32::MIN, i32::MAX),
        ] {
            assert!(!index.contains(cell));
            assert!(index.try_hash(cell).is_none());
            assert!(matches!(
                index.hash(cell),
                Err(TileMapError::CoordinateOutOfRange {
                    min: -5000,
                    max: 4999,
                    ..
                })
            ));
        }
    }

    // Tests recovering cells from hashes across the range
    // Verified by subtracting the half range only from x
    #[test]
    fn test_cell_of_inverts_hash() {
        let index = SpatialIndex::new(10_000).unwrap();

        for cell in [
            Cell::new(-5000, -5000),
            Cell::new(4999, 4999),
            Cell::new(0, 0),
            Cell::new(-1, 1),
            Cell::new(123, -4567),
        ] {
            let hash = index.hash(cell).unwrap();
            assert_eq!(index.cell_of(hash), cell);
        }
    }

    // Tests an odd column count keeps one extra cell on the positive side
    // Verified by rounding the half range up
    #[test]
    fn test_odd_column_count() {
        let index = SpatialIndex::new(5).unwrap();

        assert_eq!(index.min_coordinate(), -2);
        assert_eq!(index.max_coordinate(), 2);
        assert_eq!(index.hash(Cell::new(2, 2)).unwrap(), CellHash(24));
    }

    // Tests the column count lower limit
    // Verified by accepting a single column
    #[test]
    fn test_rejects_degenerate_column_count() {
        assert!(SpatialIndex::new(1).is_err());
        assert!(SpatialIndex::new(0).is_err());
        assert!(SpatialIndex::new(-10).is_err());
        assert!(SpatialIndex::new(2).is_ok());
    }

    // Tests cell construction helpers
    // Verified by swapping offset axes
    #[test]
    fn test_cell_helpers() {
        let cell = Cell::from((3, -4));

        assert_eq!(cell, Cell::new(3, -4));
        assert_eq!(cell.offset(1, 0), Cell::new(4, -4));
        assert_eq!(cell.offset(0, -1), Cell::new(3, -5));
        assert_eq!(Cell::new(i32::MAX, 0).offset(1, 0).x, i32::MIN);
    }
}
