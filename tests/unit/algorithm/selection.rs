//! Tests for cell selection and weighted collapse sampling

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use tilecollapse::algorithm::bitset::PossibilitySet;
    use tilecollapse::algorithm::selection::{RandomSelector, sample_possibility, select_cell};
    use tilecollapse::spatial::grid::{Grid, Position};
    use tilecollapse::tiles::catalog::EdgeCatalog;
    use tilecollapse::tiles::edge::EdgeType;
    use tilecollapse::tiles::possibility::{Possibility, build_possibilities};
    use tilecollapse::tiles::prototype::{TilePrototype, TileSet};

    // Prototype a has weight 1 and b weight 3, four rotations each
    fn possibilities() -> Vec<Possibility> {
        let catalog = EdgeCatalog::from_types([EdgeType::symmetrical("grass")]).unwrap();
        let set = TileSet::new(
            catalog,
            vec![
                TilePrototype::uniform("a", "grass"),
                TilePrototype::uniform("b", "grass").with_weight(3),
            ],
        );
        build_possibilities(&set).unwrap()
    }

    // Tests equal seeds reproduce the same draws
    // Verified by seeding from entropy instead of the given seed
    #[test]
    fn test_selector_is_deterministic() {
        let mut first = RandomSelector::new(42);
        let mut second = RandomSelector::new(42);

        for _ in 0..50 {
            assert_eq!(first.tiebreak(), second.tiebreak());
            assert_eq!(first.uniform_index(17), second.uniform_index(17));
            assert_eq!(first.weighted_choice(&[1, 2, 3]), second.weighted_choice(&[1, 2, 3]));
        }
        assert_eq!(first.uniform_index(0), None);
    }

    // Tests the first pick is spread over all cells while nothing is touched
    // Verified by always returning the first unresolved cell
    #[test]
    fn test_untouched_grid_picks_uniformly() {
        let possibilities = possibilities();
        let grid = Grid::new(3, 3, &PossibilitySet::full(possibilities.len()));
        let mut selector = RandomSelector::new(7);

        let picked: HashSet<Position> = (0..200)
            .filter_map(|_| select_cell(&grid, &possibilities, &mut selector))
            .collect();

        assert_eq!(picked.len(), 9);
    }

    // Tests touched cells win over untouched ones
    // Verified by including untouched cells in the entropy comparison
    #[test]
    fn test_touched_cell_preferred() {
        let possibilities = possibilities();
        let mut grid = Grid::new(3, 3, &PossibilitySet::full(possibilities.len()));
        let touched = Position::new(2, 1);
        grid.cell_mut(touched).unwrap().remove_possibility(0).unwrap();
        let mut selector = RandomSelector::new(7);

        for _ in 0..20 {
            assert_eq!(select_cell(&grid, &possibilities, &mut selector), Some(touched));
        }
    }

    // Tests the lowest weighted entropy wins and ties are broken at random
    // Verified by choosing the highest entropy instead
    #[test]
    fn test_minimum_weighted_entropy() {
        let possibilities = possibilities();
        let mut grid = Grid::new(3, 1, &PossibilitySet::full(possibilities.len()));
        let light = PossibilitySet::from_indices(8, [0, 1, 2, 3]);
        let three_heavy = PossibilitySet::from_indices(8, [4, 5, 6]);
        // Cell 0 keeps four light and one heavy option, cells 1 and 2 keep two heavy ones
        grid.cell_mut(Position::new(0, 0)).unwrap().remove_possibilities(&three_heavy).unwrap();
        grid.cell_mut(Position::new(1, 0)).unwrap().remove_possibilities(&light).unwrap();
        grid.cell_mut(Position::new(1, 0))
            .unwrap()
            .remove_possibilities(&PossibilitySet::from_indices(8, [4, 5]))
            .unwrap();
        grid.cell_mut(Position::new(2, 0)).unwrap().remove_possibilities(&light).unwrap();
        grid.cell_mut(Position::new(2, 0))
            .unwrap()
            .remove_possibilities(&PossibilitySet::from_indices(8, [6, 7]))
            .unwrap();

        let mut selector = RandomSelector::new(99);
        let picked: HashSet<Position> = (0..100)
            .filter_map(|_| select_cell(&grid, &possibilities, &mut selector))
            .collect();

        assert_eq!(
            picked,
            HashSet::from([Position::new(1, 0), Position::new(2, 0)])
        );
    }

    // Tests a fully resolved grid yields no cell
    // Verified by returning cells with entropy 1
    #[test]
    fn test_resolved_grid_has_no_candidates() {
        let possibilities = possibilities();
        let mut grid = Grid::new(2, 1, &PossibilitySet::full(possibilities.len()));
        grid.cell_at_mut(0).unwrap().resolve_to(1).unwrap();
        grid.cell_at_mut(1).unwrap().resolve_to(6).unwrap();

        let mut selector = RandomSelector::new(1);
        assert_eq!(select_cell(&grid, &possibilities, &mut selector), None);
    }

    // Tests sampling follows prototype weights within an unconstrained cell
    // Verified by sampling uniformly over the members
    #[test]
    fn test_sample_possibility_weight_bias() {
        let possibilities = possibilities();
        let grid = Grid::new(1, 1, &PossibilitySet::full(possibilities.len()));
        let cell = grid.cell_at(0).unwrap();
        let mut selector = RandomSelector::new(2024);

        let mut heavy = 0_u32;
        let mut light = 0_u32;
        for _ in 0..40_000 {
            let chosen = sample_possibility(cell, &possibilities, &mut selector).unwrap();
            if possibilities.get(chosen).unwrap().prototype_id() == "b" {
                heavy += 1;
            } else {
                light += 1;
            }
        }

        let ratio = f64::from(heavy) / f64::from(light);
        assert!((ratio - 3.0).abs() < 0.15, "b/a ratio {ratio}");
    }

    // Tests sampling only returns current members
    // Verified by indexing the global list with the weighted choice directly
    #[test]
    fn test_sample_possibility_members_only() {
        let possibilities = possibilities();
        let mut grid = Grid::new(1, 1, &PossibilitySet::full(possibilities.len()));
        grid.cell_at_mut(0)
            .unwrap()
            .remove_possibilities(&PossibilitySet::from_indices(8, [0, 1, 2, 4, 5]))
            .unwrap();
        let cell = grid.cell_at(0).unwrap();
        let mut selector = RandomSelector::new(5);

        for _ in 0..200 {
            let chosen = sample_possibility(cell, &possibilities, &mut selector).unwrap();
            assert!([3, 6, 7].contains(&chosen));
        }
    }
}
