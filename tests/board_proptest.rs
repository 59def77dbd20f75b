/// Property-based tests for board setup and swap resolution using proptest
///
/// Boards of random size, obstacle layout, catalog and seed are filled and
/// played to check the invariants that must hold for every level.
use match3::core::{finder, BoardConfig, PieceTemplate, StartingTile, TimingConfig};
use match3::engine::{hint, Board, SwapRejection};
use match3::types::{Coord, Direction, MatchValue, TileType};
use proptest::prelude::*;

// Strategy for a valid board configuration with a few obstacles
fn config_strategy() -> impl Strategy<Value = BoardConfig> {
    (3u8..=10, 3u8..=10, 3usize..=6)
        .prop_flat_map(|(width, height, colours)| {
            let obstacle = (0..width as i8, 0..height as i8).prop_map(|(x, y)| StartingTile {
                x,
                y,
                tile: TileType::Obstacle,
            });
            (
                Just(width),
                Just(height),
                Just(colours),
                prop::collection::vec(obstacle, 0..6),
            )
        })
        .prop_map(|(width, height, colours, starting_tiles)| BoardConfig {
            width,
            height,
            starting_tiles,
            pieces: MatchValue::ALL[..colours]
                .iter()
                .copied()
                .map(PieceTemplate::new)
                .collect(),
            ..BoardConfig::default()
        })
}

fn filled_board(config: BoardConfig, seed: u32) -> (Board, Vec<Coord>) {
    let mut board = Board::new(config, TimingConfig::instant(), seed).unwrap();
    let report = board.setup_board();
    board.drain_events();
    (board, report.exhausted)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_setup_fills_every_normal_cell(config in config_strategy(), seed in any::<u32>()) {
        let (board, exhausted) = filled_board(config, seed);
        let grid = board.grid();

        for at in grid.coords() {
            match grid.tile(at.x, at.y) {
                Some(TileType::Normal) => {
                    prop_assert!(grid.piece_at(at).is_some(), "empty Normal cell at {:?}", at);
                    if !exhausted.contains(&at) {
                        prop_assert!(!finder::has_match_on_fill(grid, at.x, at.y));
                    }
                }
                _ => prop_assert!(grid.piece_at(at).is_none(), "piece on obstacle at {:?}", at),
            }
        }
        prop_assert_eq!(grid.piece_count(), grid.normal_count());
        prop_assert!(grid.is_consistent());
    }

    #[test]
    fn test_cycle_conserves_piece_count(config in config_strategy(), seed in any::<u32>()) {
        let (mut board, _) = filled_board(config, seed);

        for _ in 0..3 {
            let Some((a, b)) = hint::find_matching_swap(board.grid()) else {
                break;
            };
            prop_assert!(board.request_swap(a, b));
            prop_assert!(board.settle());

            let grid = board.grid();
            prop_assert_eq!(grid.piece_count(), grid.normal_count());
            prop_assert!(grid.is_consistent());
            for at in grid.coords() {
                if grid.tile(at.x, at.y) == Some(TileType::Obstacle) {
                    prop_assert!(grid.piece_at(at).is_none());
                }
            }
        }
    }

    #[test]
    fn test_non_matching_swap_restores_grid(
        config in config_strategy(),
        seed in any::<u32>(),
        x in 0i8..10,
        y in 0i8..10,
        up in any::<bool>(),
    ) {
        let (mut board, _) = filled_board(config, seed);
        let a = Coord::new(x, y);
        let b = a.step(if up { Direction::Up } else { Direction::Right });
        let matching = hint::matching_swaps(board.grid());
        prop_assume!(!matching.contains(&(a, b)));

        let before = board.grid().clone();
        if board.request_swap(a, b) {
            prop_assert!(board.settle());
            prop_assert_eq!(board.cycles_completed(), 0);
        }
        prop_assert_eq!(board.grid(), &before);
    }

    #[test]
    fn test_non_adjacent_swap_is_always_rejected(
        config in config_strategy(),
        seed in any::<u32>(),
        a in (0i8..10, 0i8..10),
        b in (0i8..10, 0i8..10),
    ) {
        let (a, b) = (Coord::from(a), Coord::from(b));
        prop_assume!(!a.is_adjacent(b));

        let (mut board, _) = filled_board(config, seed);
        let before = board.grid().clone();
        let result = board.try_swap(a, b);

        prop_assert!(matches!(
            result,
            Err(SwapRejection::NotAdjacent) | Err(SwapRejection::OutOfBounds)
        ));
        prop_assert!(board.accepts_input());
        prop_assert_eq!(board.grid(), &before);
        prop_assert!(board.drain_events().is_empty());
    }
}
