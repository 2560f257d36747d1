//! Tests for orientations, payload capability, hosts and palettes

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tilepath::map::world::WorldPosition;
    use tilepath::spatial::index::Cell;
    use tilepath::spatial::tiles::{
        NoopHost, Orientation, Placement, Prefab, TileHost, TilePayload, TileSet,
    };

    // Tests index and degree mapping of every orientation
    // Verified by offsetting the index table by one
    #[test]
    fn test_orientation_indices() {
        for (index, orientation) in Orientation::ALL.iter().enumerate() {
            let index = u8::try_from(index).unwrap();
            assert_eq!(orientation.index(), index);
            assert_eq!(Orientation::from_index(index), Some(*orientation));
        }

        assert_eq!(Orientation::from_index(4), None);
        assert_eq!(Orientation::West.degrees(), 270);
        assert_eq!(Orientation::default(), Orientation::North);
    }

    // Tests that random orientations cover all four rotations
    // Verified by drawing from 0..3
    #[test]
    fn test_random_orientation_covers_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let orientation = Orientation::random(&mut rng);
            if let Some(slot) = seen.get_mut(usize::from(orientation.index())) {
                *slot = true;
            }
        }

        assert_eq!(seen, [true; 4]);
    }

    // Tests that equal seeds give equal orientation sequences
    // Verified by seeding from entropy
    #[test]
    fn test_random_orientation_reproducible() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);

        let a: Vec<_> = (0..32).map(|_| Orientation::random(&mut first)).collect();
        let b: Vec<_> = (0..32).map(|_| Orientation::random(&mut second)).collect();

        assert_eq!(a, b);
    }

    // Tests prefab constructors set the path capability
    // Verified by swapping the walkable and solid flags
    #[test]
    fn test_prefab_capability() {
        assert!(Prefab::walkable("floor").is_path_node());
        assert!(!Prefab::solid("wall").is_path_node());
        assert_eq!(Prefab::solid("wall").name, "wall");
    }

    // Tests the no-op host realizes every payload
    // Verified by returning None from realize
    #[test]
    fn test_noop_host_realizes() {
        let mut host = NoopHost::<Prefab>::new();
        let placement = Placement {
            cell: Cell::new(1, 2),
            position: WorldPosition::new(1.0, 0.0, 2.0),
            orientation: Orientation::South,
        };

        let instance = host.realize(&Prefab::solid("wall"), &placement);
        assert_eq!(instance, Some(()));
        host.release(());
    }

    // Tests palette selection and bounds
    // Verified by allowing selection one past the end
    #[test]
    fn test_tile_set_selection() {
        let mut palette = TileSet::new(vec![Prefab::walkable("floor"), Prefab::solid("wall")]);

        assert_eq!(palette.payloads().len(), 2);
        assert_eq!(palette.selected(), Some(&Prefab::walkable("floor")));

        palette.select(1).unwrap();
        assert_eq!(palette.selected(), Some(&Prefab::solid("wall")));

        assert!(palette.select(2).is_err());
        assert_eq!(palette.selected(), Some(&Prefab::solid("wall")));
    }

    // Tests that an empty palette has no selection
    // Verified by defaulting the selection to zero
    #[test]
    fn test_empty_tile_set() {
        let mut palette = TileSet::<Prefab>::default();

        assert!(palette.selected().is_none());
        assert!(palette.select(0).is_err());
        assert!(TileSet::<Prefab>::new(Vec::new()).selected().is_none());
    }
}
