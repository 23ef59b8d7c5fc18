//! Tests for neighbor constraint propagation

#[cfg(test)]
mod tests {
    use tilecollapse::WfcError;
    use tilecollapse::algorithm::bitset::PossibilitySet;
    use tilecollapse::algorithm::propagation::{
        is_consistent, propagate, propagate_into, supported_possibilities,
    };
    use tilecollapse::algorithm::rules::AdjacencyRules;
    use tilecollapse::spatial::cell::CellChange;
    use tilecollapse::spatial::grid::{Direction, Grid, Position};
    use tilecollapse::tiles::catalog::EdgeCatalog;
    use tilecollapse::tiles::edge::{EdgeRef, EdgeType};
    use tilecollapse::tiles::possibility::build_possibilities;
    use tilecollapse::tiles::prototype::{TilePrototype, TileSet};

    // 0..4 grass, 4..8 straight road rotations (4 and 6 run north-south)
    fn rules() -> AdjacencyRules {
        let catalog =
            EdgeCatalog::from_types([EdgeType::symmetrical("grass"), EdgeType::asymmetrical("road")])
                .unwrap();
        let road = TilePrototype::new(
            "road",
            [
                EdgeRef::new("road"),
                EdgeRef::new("grass"),
                EdgeRef::reversed("road"),
                EdgeRef::new("grass"),
            ],
        );
        let set = TileSet::new(
            catalog.clone(),
            vec![TilePrototype::uniform("grass", "grass"), road],
        );
        AdjacencyRules::new(&build_possibilities(&set).unwrap(), &catalog).unwrap()
    }

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(width, height, &PossibilitySet::full(8))
    }

    // Tests a resolved road forces the matching road onto its northern neighbor
    // Verified by propagating towards the opposite direction
    #[test]
    fn test_resolved_source_constrains_neighbor() {
        let rules = rules();
        let mut grid = grid(1, 2);
        let source = Position::new(0, 0);
        grid.cell_mut(source).unwrap().resolve_to(4).unwrap();

        let changes = propagate(&mut grid, &rules, source).unwrap();

        assert_eq!(changes.len(), 1);
        let change = changes.first().unwrap();
        assert_eq!(change.position, Position::new(0, 1));
        assert_eq!(change.index, 1);
        assert_eq!(change.direction, Direction::North);
        assert_eq!(change.change, CellChange::Resolved { possibility: 4 });
        assert!(is_consistent(&grid, &rules));
    }

    // Tests every neighbor is visited clockwise and the source is left untouched
    // Verified by mutating the source cell instead of its neighbors
    #[test]
    fn test_neighbors_visited_clockwise() {
        let rules = rules();
        let mut grid = grid(3, 3);
        let centre = Position::new(1, 1);
        grid.cell_mut(centre).unwrap().resolve_to(0).unwrap();

        let changes = propagate(&mut grid, &rules, centre).unwrap();

        let directions: Vec<_> = changes.iter().map(|c| c.direction).collect();
        assert_eq!(directions, Direction::ALL.to_vec());
        for change in &changes {
            assert_eq!(change.change, CellChange::Updated { entropy: 6 });
        }
        assert_eq!(grid.cell(centre).unwrap().resolved_possibility(), Some(0));
        assert!(grid.cell(Position::new(0, 0)).unwrap().is_untouched());
    }

    // Tests a full source set constrains nothing
    // Verified by removing the is_full early return
    #[test]
    fn test_full_source_is_skipped() {
        let rules = rules();
        let mut grid = grid(2, 2);

        let changes = propagate(&mut grid, &rules, Position::new(0, 0)).unwrap();

        assert!(changes.is_empty());
        assert!(grid.cells().all(|c| c.is_untouched()));
    }

    // Tests propagation never grows a neighbor's set
    // Verified by uniting allowed neighbors into the neighbor set
    #[test]
    fn test_non_expansion() {
        let rules = rules();
        let mut grid = grid(2, 1);
        grid.cell_mut(Position::new(1, 0))
            .unwrap()
            .remove_possibilities(&PossibilitySet::from_indices(8, [0, 1, 5]))
            .unwrap();
        let before = grid.cell(Position::new(1, 0)).unwrap().possibilities().clone();

        grid.cell_mut(Position::new(0, 0)).unwrap().resolve_to(4).unwrap();
        propagate(&mut grid, &rules, Position::new(0, 0)).unwrap();

        let after = grid.cell(Position::new(1, 0)).unwrap().possibilities();
        assert!(after.count() <= before.count());
        assert!(after.difference(&before).is_empty());
        assert_eq!(after.to_vec(), vec![2, 3, 4, 6]);
    }

    // Tests an emptied neighbor raises a contradiction at its position
    // Verified by swallowing the remove_possibilities error
    #[test]
    fn test_contradiction_at_neighbor() {
        let rules = rules();
        let mut grid = grid(1, 2);
        grid.cell_mut(Position::new(0, 1)).unwrap().resolve_to(6).unwrap();
        grid.cell_mut(Position::new(0, 0)).unwrap().resolve_to(4).unwrap();

        let result = propagate(&mut grid, &rules, Position::new(0, 0));

        assert!(matches!(
            result,
            Err(WfcError::Contradiction { position, .. }) if position == Position::new(0, 1)
        ));
    }

    // Tests supported possibilities and grid consistency detect mismatched edges
    // Verified by checking only the north neighbor in supported_possibilities
    #[test]
    fn test_consistency_checks() {
        let rules = rules();
        let mut grid = grid(2, 1);
        grid.cell_mut(Position::new(0, 0)).unwrap().resolve_to(4).unwrap();
        grid.cell_mut(Position::new(1, 0)).unwrap().resolve_to(5).unwrap();

        let supported = supported_possibilities(&grid, &rules, Position::new(1, 0)).unwrap();
        assert!(supported.is_empty());
        assert!(!is_consistent(&grid, &rules));
        assert!(supported_possibilities(&grid, &rules, Position::new(5, 5)).is_none());
    }

    // Tests changes made before a contradiction stay in the caller's buffer
    // Verified by collecting changes locally and returning early with `?`
    #[test]
    fn test_changes_survive_contradiction() {
        let rules = rules();
        let mut grid = grid(2, 2);
        let source = Position::new(0, 0);
        grid.cell_mut(Position::new(1, 0)).unwrap().resolve_to(5).unwrap();
        grid.cell_mut(source).unwrap().resolve_to(4).unwrap();

        let mut changes = Vec::new();
        let result = propagate_into(&mut grid, &rules, source, &mut changes);

        assert!(matches!(
            result,
            Err(WfcError::Contradiction { position, .. }) if position == Position::new(1, 0)
        ));
        assert_eq!(changes.len(), 1);
        let change = changes.first().unwrap();
        assert_eq!(change.position, Position::new(0, 1));
        assert_eq!(change.change, CellChange::Resolved { possibility: 4 });
        assert_eq!(grid.cell(Position::new(0, 1)).unwrap().resolved_possibility(), Some(4));
    }
}
